use super::CaptureSource;
use anyhow::Result;
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use thiserror::Error;

/// The one genuinely fatal failure surface: the camera itself.
/// A bad frame downstream is a negative detection, never an error.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to open camera {index}")]
    Open {
        index: u32,
        #[source]
        source: nokhwa::NokhwaError,
    },
    #[error("failed to start camera stream")]
    Stream(#[source] nokhwa::NokhwaError),
    #[error("failed to read frame from camera")]
    Read(#[source] nokhwa::NokhwaError),
    #[error("failed to decode frame to RGB")]
    Decode(#[source] nokhwa::NokhwaError),
}

pub struct WebcamCapture {
    camera: Camera,
    width: u32,
    height: u32,
}

impl WebcamCapture {
    /// Open the camera at `device_index` and start streaming at the
    /// device's preferred resolution.
    pub fn new(device_index: u32) -> Result<Self, CaptureError> {
        tracing::info!("Initializing webcam {}", device_index);

        let index = CameraIndex::Index(device_index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let mut camera = Camera::new(index, requested).map_err(|source| CaptureError::Open {
            index: device_index,
            source,
        })?;

        camera.open_stream().map_err(CaptureError::Stream)?;

        let resolution = camera.resolution();
        let (width, height) = (resolution.width(), resolution.height());

        tracing::info!("Webcam initialized at {}x{}", width, height);

        Ok(Self {
            camera,
            width,
            height,
        })
    }
}

impl CaptureSource for WebcamCapture {
    fn capture_frame(&mut self) -> Result<RgbImage> {
        let frame = self.camera.frame().map_err(CaptureError::Read)?;

        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(CaptureError::Decode)?;

        Ok(decoded)
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
