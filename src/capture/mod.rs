pub(crate) mod camera;
pub(crate) mod voice;

use std::sync::Arc;

use camera::{CameraDevice, CameraPreview, Surface, VideoSlot};
use voice::{RecognitionEvent, SpeechRecognizer, VoiceCapture};

use crate::conversation::Language;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Speech recognition is not supported on this platform")]
    Unsupported,
    #[error("Capture device unavailable: {0}")]
    Denied(String),
    #[error("The microphone is switched off")]
    MicrophoneOff,
}

/// Camera, microphone and voice capture for one session. Only the session
/// controller touches it.
pub struct CaptureState {
    camera: CameraPreview,
    voice: VoiceCapture,
    microphone_enabled: bool,
}

impl CaptureState {
    pub fn new(
        camera: Arc<dyn CameraDevice>,
        recognizer: Arc<dyn SpeechRecognizer>,
        language: Language,
    ) -> Self {
        Self {
            camera: CameraPreview::new(camera),
            voice: VoiceCapture::new(recognizer, language),
            microphone_enabled: false,
        }
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera.is_enabled()
    }

    pub fn microphone_enabled(&self) -> bool {
        self.microphone_enabled
    }

    pub fn is_capturing_voice(&self) -> bool {
        self.voice.is_capturing()
    }

    pub fn video_slot(&self) -> VideoSlot {
        self.camera.slot()
    }

    /// Final results of the running capture not yet flushed into the input.
    pub fn heard_so_far(&self) -> &str {
        self.voice.heard_so_far()
    }

    pub fn voice_notice(&self) -> Option<&str> {
        self.voice.notice()
    }

    pub fn voice_language(&self) -> Language {
        self.voice.language()
    }

    pub fn set_voice_language(&mut self, language: Language) {
        self.voice.set_language(language);
    }

    /// Returns whether the camera ends up on. A refused or missing camera
    /// leaves it off.
    pub async fn toggle_camera(&mut self) -> bool {
        if self.camera.is_enabled() {
            self.camera.disable();
        } else if let Err(err) = self.camera.enable().await {
            tracing::warn!(%err, "Camera unavailable, showing placeholder");
        }
        self.camera.is_enabled()
    }

    /// Switching the microphone off ends any running voice capture; the
    /// text heard so far is returned.
    pub fn set_microphone(&mut self, enabled: bool) -> Option<String> {
        self.microphone_enabled = enabled;
        if enabled { None } else { self.stop_voice() }
    }

    pub fn start_voice(&mut self) -> Result<(), CaptureError> {
        if !self.microphone_enabled {
            return Err(CaptureError::MicrophoneOff);
        }
        self.voice.start_capture()?;
        self.camera.detach();
        Ok(())
    }

    pub fn stop_voice(&mut self) -> Option<String> {
        let heard = self.voice.stop();
        self.camera.reattach();
        heard
    }

    pub fn on_voice_event(&mut self, event: RecognitionEvent) -> Option<String> {
        let heard = self.voice.handle(event);
        if !self.voice.is_capturing() {
            self.camera.reattach();
        }
        heard
    }

    pub fn show_on(&mut self, surface: Surface) {
        self.camera.move_to(surface);
        self.camera.reattach();
    }

    /// Camera first, then any running recognition.
    pub fn release(&mut self) {
        self.camera.disable();
        self.voice.abort();
    }
}
