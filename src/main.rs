mod capture;
mod classify;
mod config;
mod detect;
mod display;
mod overlay;

use anyhow::{Context, Result};
use capture::{CaptureSource, WebcamCapture};
use clap::Parser;
use config::TrackerConfig;
use display::{DisplaySink, WindowDisplay};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input webcam device index
    #[arg(short, long, default_value_t = 0)]
    input_device: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Disable the selfie-style horizontal mirror
    #[arg(long)]
    no_mirror: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let cfg = TrackerConfig::default();

    tracing::info!("Handzone starting");
    tracing::info!(
        "Boundary: ({},{})-({},{})",
        cfg.boundary_min.0,
        cfg.boundary_min.1,
        cfg.boundary_max.0,
        cfg.boundary_max.1
    );
    tracing::info!(
        "Thresholds: safe={} warning={} danger={}",
        cfg.safe_dist,
        cfg.warning_dist,
        cfg.danger_dist
    );
    tracing::info!("Target FPS: {}", args.fps);

    // Initialize capture
    let mut capture =
        WebcamCapture::new(args.input_device).context("Failed to initialize webcam capture")?;

    // Initialize display at the camera's resolution
    let (width, height) = capture.resolution();
    let mut display = WindowDisplay::new("Hand Tracking POC", width, height)
        .context("Failed to initialize display window")?;

    // Main loop
    run_pipeline(&mut capture, &mut display, &cfg, args.fps, !args.no_mirror)?;

    tracing::info!("Handzone stopped");
    Ok(())
}

fn run_pipeline<C, D>(
    capture: &mut C,
    display: &mut D,
    cfg: &TrackerConfig,
    target_fps: u32,
    mirror: bool,
) -> Result<()>
where
    C: CaptureSource,
    D: DisplaySink,
{
    let frame_duration = Duration::from_secs_f32(1.0 / target_fps as f32);
    let mut frame_count = 0u64;
    let mut total_capture_time = Duration::ZERO;
    let mut total_detect_time = Duration::ZERO;
    let mut total_display_time = Duration::ZERO;

    tracing::info!("Starting main pipeline loop");
    tracing::info!("Press ESC or close the window to stop");

    loop {
        // One exit poll per iteration
        if display.should_close() {
            tracing::info!("Exit requested");
            break;
        }

        let loop_start = Instant::now();

        // Capture frame
        let capture_start = Instant::now();
        let frame = capture
            .capture_frame()
            .context("Failed to capture frame")?;
        total_capture_time += capture_start.elapsed();

        let mut frame = if mirror {
            image::imageops::flip_horizontal(&frame)
        } else {
            frame
        };

        // Detect and classify; both are per-frame pure, nothing carries over
        let detect_start = Instant::now();
        let detection = detect::detect(&frame, cfg);
        let classification = classify::classify(detection.centroid, cfg);
        total_detect_time += detect_start.elapsed();

        tracing::debug!(
            "state={} distance={:?} centroid={:?}",
            classification.state.label(),
            classification.distance,
            detection.centroid
        );

        // Render overlay and present
        overlay::annotate(&mut frame, cfg, detection.centroid, &classification);

        let display_start = Instant::now();
        display
            .show_frame(&frame)
            .context("Failed to display frame")?;
        total_display_time += display_start.elapsed();

        frame_count += 1;

        // Log stats every 30 frames
        if frame_count % 30 == 0 {
            let avg_capture_ms = total_capture_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_detect_ms = total_detect_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_display_ms = total_display_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let total_ms = avg_capture_ms + avg_detect_ms + avg_display_ms;
            let actual_fps = 1000.0 / total_ms;

            tracing::info!(
                "Frame {}: capture={:.1}ms, detect={:.1}ms, display={:.1}ms, total={:.1}ms, fps={:.1}",
                frame_count,
                avg_capture_ms,
                avg_detect_ms,
                avg_display_ms,
                total_ms,
                actual_fps
            );
        }

        // Frame rate limiting
        let elapsed = loop_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }

    Ok(())
}
