/// The restoration session state machine
///
/// One struct owns everything mutable in the session: the original image,
/// the enhanced result, the in-flight flag, the current error message, the
/// quality tier and the comparison slider position. The UI phase is derived
/// from these fields rather than stored, so exactly one of Idle, Previewing,
/// Enhancing and Comparing is ever active.
///
/// Enhancement responses carry a request token handed out by
/// `begin_enhance`. Any transition that invalidates the in-flight request
/// (new file, reset) bumps the token, so a stale response arriving later is
/// discarded instead of overwriting newer state.

use crate::enhance::prompts::QualityTier;
use crate::media::validate::MediaType;

use super::image::{EnhancedImage, UploadedImage};

/// Slider position shown whenever a new comparison starts
pub const RESET_POSITION: f32 = 50.0;

/// The mutually exclusive view states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Previewing,
    Enhancing,
    Comparing,
}

/// Everything the enhancement task needs, captured at request time so the
/// state is free to change while the call is in flight
#[derive(Debug, Clone)]
pub struct EnhanceRequest {
    pub token: u64,
    pub payload: String,
    pub media_type: MediaType,
    pub tier: QualityTier,
}

/// Single owner of all mutable session state
#[derive(Debug)]
pub struct AppState {
    original: Option<UploadedImage>,
    enhanced: Option<EnhancedImage>,
    enhancing: bool,
    error: Option<String>,
    quality: QualityTier,
    compare_position: f32,
    request_seq: u64,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            original: None,
            enhanced: None,
            enhancing: false,
            error: None,
            quality: QualityTier::default(),
            compare_position: RESET_POSITION,
            request_seq: 0,
        }
    }

    /// Derive the current phase from the state fields
    pub fn phase(&self) -> Phase {
        if self.enhancing {
            Phase::Enhancing
        } else if self.enhanced.is_some() {
            Phase::Comparing
        } else if self.original.is_some() {
            Phase::Previewing
        } else {
            Phase::Idle
        }
    }

    pub fn original(&self) -> Option<&UploadedImage> {
        self.original.as_ref()
    }

    pub fn enhanced(&self) -> Option<&EnhancedImage> {
        self.enhanced.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn quality(&self) -> QualityTier {
        self.quality
    }

    pub fn set_quality(&mut self, tier: QualityTier) {
        self.quality = tier;
    }

    pub fn compare_position(&self) -> f32 {
        self.compare_position
    }

    pub fn set_compare_position(&mut self, position: f32) {
        self.compare_position = position.clamp(0.0, 100.0);
    }

    /// A picked file passed validation and loaded. From any state this is
    /// an implicit reset-then-select: the previous enhancement result and
    /// error are dropped and the session re-enters Previewing.
    pub fn select_succeeded(&mut self, image: UploadedImage) {
        self.request_seq += 1;
        self.enhancing = false;
        self.enhanced = None;
        self.error = None;
        self.original = Some(image);
    }

    /// Surface a non-fatal error (rejected file, failed save) without
    /// touching any already-loaded image.
    pub fn surface_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Start an enhancement request. Returns `None` (and surfaces an
    /// error) when no original image is loaded.
    pub fn begin_enhance(&mut self) -> Option<EnhanceRequest> {
        let Some(original) = &self.original else {
            self.error = Some("Please select an image first.".to_string());
            return None;
        };

        self.request_seq += 1;
        self.enhancing = true;
        self.enhanced = None;
        self.error = None;

        Some(EnhanceRequest {
            token: self.request_seq,
            payload: original.data.payload.clone(),
            media_type: original.media_type,
            tier: self.quality,
        })
    }

    /// Apply a successful enhancement response. Returns `false` when the
    /// response is stale or its payload cannot be decoded.
    pub fn enhance_succeeded(&mut self, token: u64, payload: String) -> bool {
        if !self.is_current(token) {
            println!("🗑️  Discarding stale enhancement response (token {token})");
            return false;
        }

        let Some(original) = &self.original else {
            // A current token implies an original; nothing to do otherwise
            self.enhancing = false;
            return false;
        };

        self.enhancing = false;

        match EnhancedImage::from_payload(original.media_type, payload) {
            Ok(image) => {
                self.enhanced = Some(image);
                self.error = None;
                self.compare_position = RESET_POSITION;
                true
            }
            Err(err) => {
                eprintln!("⚠️  Enhancement payload could not be decoded: {err}");
                self.error =
                    Some("The AI did not return a valid image. Please try again.".to_string());
                false
            }
        }
    }

    /// Apply a failed enhancement response: back to Previewing with the
    /// original retained and the error surfaced. Stale failures are dropped.
    pub fn enhance_failed(&mut self, token: u64, message: String) {
        if !self.is_current(token) {
            println!("🗑️  Discarding stale enhancement failure (token {token})");
            return;
        }

        self.enhancing = false;
        self.error = Some(message);
    }

    /// Back to Idle: drop both images, the error and any in-flight request
    pub fn reset(&mut self) {
        self.request_seq += 1;
        self.enhancing = false;
        self.original = None;
        self.enhanced = None;
        self.error = None;
        self.compare_position = RESET_POSITION;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn is_current(&self, token: u64) -> bool {
        self.enhancing && token == self.request_seq
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::encode::DataUri;

    fn jpeg_image(len: usize) -> UploadedImage {
        UploadedImage::from_bytes("gran.jpg".to_string(), MediaType::Jpeg, vec![0x2a; len])
    }

    fn enhanced_payload(bytes: &[u8]) -> String {
        DataUri::encode(MediaType::Jpeg, bytes).payload
    }

    #[test]
    fn test_starts_idle() {
        let state = AppState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.quality(), QualityTier::Standard);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_select_valid_file_enters_previewing() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(2 * 1024 * 1024));

        assert_eq!(state.phase(), Phase::Previewing);
        assert!(state.original().is_some());
        assert!(state.enhanced().is_none());
    }

    #[test]
    fn test_select_failure_keeps_state() {
        let mut state = AppState::new();
        state.surface_error("File is too large.".to_string());

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.error(), Some("File is too large."));
    }

    #[test]
    fn test_enhance_without_image_is_guarded() {
        let mut state = AppState::new();
        assert!(state.begin_enhance().is_none());
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.error().is_some());
    }

    #[test]
    fn test_happy_path_to_comparing_and_back() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(2 * 1024 * 1024));
        state.set_quality(QualityTier::High);

        let request = state.begin_enhance().unwrap();
        assert_eq!(state.phase(), Phase::Enhancing);
        assert_eq!(request.tier, QualityTier::High);
        assert_eq!(request.media_type, MediaType::Jpeg);

        assert!(state.enhance_succeeded(request.token, enhanced_payload(b"restored")));
        assert_eq!(state.phase(), Phase::Comparing);
        assert_eq!(
            state.enhanced().unwrap().media_type,
            state.original().unwrap().media_type
        );

        state.reset();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.original().is_none());
        assert!(state.enhanced().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failure_returns_to_previewing_with_original() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(100));

        let request = state.begin_enhance().unwrap();
        state.enhance_failed(request.token, "Could not enhance the photo.".to_string());

        assert_eq!(state.phase(), Phase::Previewing);
        assert!(state.original().is_some());
        assert!(state.enhanced().is_none());
        assert_eq!(state.error(), Some("Could not enhance the photo."));
    }

    #[test]
    fn test_begin_enhance_clears_prior_error_and_result() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(100));

        let first = state.begin_enhance().unwrap();
        assert!(state.enhance_succeeded(first.token, enhanced_payload(b"v1")));

        state.surface_error("some stray error".to_string());
        let second = state.begin_enhance().unwrap();

        assert_eq!(state.phase(), Phase::Enhancing);
        assert!(state.error().is_none());
        assert!(state.enhanced().is_none());
        assert_ne!(first.token, second.token);
    }

    #[test]
    fn test_stale_success_is_discarded() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(100));
        let request = state.begin_enhance().unwrap();

        // A new file arrives while the request is still in flight
        state.select_succeeded(jpeg_image(200));
        assert_eq!(state.phase(), Phase::Previewing);

        assert!(!state.enhance_succeeded(request.token, enhanced_payload(b"old")));
        assert_eq!(state.phase(), Phase::Previewing);
        assert!(state.enhanced().is_none());
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(100));
        let request = state.begin_enhance().unwrap();

        state.reset();
        state.enhance_failed(request.token, "too late".to_string());

        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_new_file_clears_enhancement_result() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(100));
        let request = state.begin_enhance().unwrap();
        assert!(state.enhance_succeeded(request.token, enhanced_payload(b"v1")));
        assert_eq!(state.phase(), Phase::Comparing);

        state.select_succeeded(jpeg_image(300));
        assert_eq!(state.phase(), Phase::Previewing);
        assert!(state.enhanced().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_undecodable_payload_surfaces_error() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(100));
        let request = state.begin_enhance().unwrap();

        assert!(!state.enhance_succeeded(request.token, "!!garbage!!".to_string()));
        assert_eq!(state.phase(), Phase::Previewing);
        assert!(state.error().is_some());
    }

    #[test]
    fn test_slider_resets_on_new_comparison() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(100));
        let request = state.begin_enhance().unwrap();
        assert!(state.enhance_succeeded(request.token, enhanced_payload(b"v1")));

        state.set_compare_position(87.5);
        assert_eq!(state.compare_position(), 87.5);

        let request = state.begin_enhance().unwrap();
        assert!(state.enhance_succeeded(request.token, enhanced_payload(b"v2")));
        assert_eq!(state.compare_position(), RESET_POSITION);
    }

    #[test]
    fn test_slider_position_is_clamped() {
        let mut state = AppState::new();
        state.set_compare_position(-40.0);
        assert_eq!(state.compare_position(), 0.0);
        state.set_compare_position(640.0);
        assert_eq!(state.compare_position(), 100.0);
    }

    #[test]
    fn test_clear_error_keeps_images() {
        let mut state = AppState::new();
        state.select_succeeded(jpeg_image(100));
        state.surface_error("oops".to_string());

        state.clear_error();
        assert!(state.error().is_none());
        assert_eq!(state.phase(), Phase::Previewing);
        assert!(state.original().is_some());
    }
}
