use super::DisplaySink;
use anyhow::{Context, Result};
use image::RgbImage;
use minifb::{Key, Window, WindowOptions};

pub struct WindowDisplay {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl WindowDisplay {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        tracing::info!("Opening display window {}x{}", width, height);

        let window = Window::new(
            title,
            width as usize,
            height as usize,
            WindowOptions::default(),
        )
        .context("Failed to open display window")?;

        Ok(Self {
            window,
            buffer: vec![0; (width * height) as usize],
            width: width as usize,
            height: height as usize,
        })
    }
}

impl DisplaySink for WindowDisplay {
    fn show_frame(&mut self, frame: &RgbImage) -> Result<()> {
        // Window size is fixed to the first frame; later frames must match.
        anyhow::ensure!(
            frame.dimensions() == (self.width as u32, self.height as u32),
            "frame size {:?} does not match window {}x{}",
            frame.dimensions(),
            self.width,
            self.height
        );

        // Pack RGB8 into the window's 0RGB u32 buffer.
        for (slot, pixel) in self.buffer.iter_mut().zip(frame.pixels()) {
            let [r, g, b] = pixel.0;
            *slot = (r as u32) << 16 | (g as u32) << 8 | b as u32;
        }

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .context("Failed to present frame to window")?;

        Ok(())
    }

    fn should_close(&self) -> bool {
        !self.window.is_open() || self.window.is_key_down(Key::Escape)
    }
}
