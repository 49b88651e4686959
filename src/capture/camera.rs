use async_trait::async_trait;
use std::sync::Arc;

use super::CaptureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
}

/// A single device track. Stopping it turns the hardware off.
pub trait MediaTrack: Send {
    fn kind(&self) -> TrackKind;
    fn stop(&mut self);
    fn is_live(&self) -> bool;
}

pub struct MediaStream {
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }

    pub fn live_tracks(&self) -> usize {
        self.tracks.iter().filter(|track| track.is_live()).count()
    }

    fn stop_all(&mut self) {
        for track in &mut self.tracks {
            tracing::debug!(kind = ?track.kind(), "Stopping track");
            track.stop();
        }
    }
}

#[async_trait]
pub trait CameraDevice: Send + Sync {
    async fn open(&self) -> Result<MediaStream, CaptureError>;
}

/// Backend for platforms without any camera.
pub struct NoCamera;

#[async_trait]
impl CameraDevice for NoCamera {
    async fn open(&self) -> Result<MediaStream, CaptureError> {
        Err(CaptureError::Denied("no camera available".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Preview,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSlot {
    Live(Surface),
    Detached,
    Placeholder,
}

/// Owns the camera stream for the whole session.
pub struct CameraPreview {
    device: Arc<dyn CameraDevice>,
    stream: Option<MediaStream>,
    surface: Surface,
    attached: bool,
}

impl CameraPreview {
    pub fn new(device: Arc<dyn CameraDevice>) -> Self {
        Self {
            device,
            stream: None,
            surface: Surface::Preview,
            attached: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.stream.is_some()
    }

    pub async fn enable(&mut self) -> Result<(), CaptureError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let stream = self.device.open().await?;
        tracing::info!(tracks = stream.live_tracks(), "Camera enabled");
        self.stream = Some(stream);
        self.attached = true;
        Ok(())
    }

    /// Stops every track before letting go of the stream. Safe to call
    /// when nothing is open.
    pub fn disable(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_all();
            tracing::info!("Camera released");
        }
        self.attached = false;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Puts the already-open stream back on screen without touching the device.
    pub fn reattach(&mut self) {
        if self.stream.is_some() && !self.attached {
            tracing::debug!(surface = ?self.surface, "Reattaching camera stream");
            self.attached = true;
        }
    }

    pub fn move_to(&mut self, surface: Surface) {
        self.surface = surface;
    }

    pub fn slot(&self) -> VideoSlot {
        match (&self.stream, self.attached) {
            (None, _) => VideoSlot::Placeholder,
            (Some(_), true) => VideoSlot::Live(self.surface),
            (Some(_), false) => VideoSlot::Detached,
        }
    }
}

impl Drop for CameraPreview {
    fn drop(&mut self) {
        self.disable();
    }
}
