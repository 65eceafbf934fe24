mod window;

pub use window::WindowDisplay;

use anyhow::Result;
use image::RgbImage;

/// Trait for interactive display sinks
pub trait DisplaySink {
    /// Present a frame and pump window events
    fn show_frame(&mut self, frame: &RgbImage) -> Result<()>;

    /// Whether the user asked to quit (ESC or window closed)
    fn should_close(&self) -> bool;
}
