//! Stand-in analyzer used when no recognition backend is configured.

use super::{CameraImage, ImageService};
use crate::error::{Result, SecurityError};
use log::debug;
use rand::Rng;

/// Reports a cat at random.
///
/// Draws a confidence in `[0, 100)` for every frame and answers `true` when
/// it reaches the requested threshold, so a threshold of 50 finds a cat in
/// roughly half of all frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeImageService;

impl FakeImageService {
    pub fn new() -> Self {
        Self
    }
}

impl ImageService for FakeImageService {
    fn image_contains_cat(&self, image: &CameraImage, confidence_threshold: f32) -> Result<bool> {
        if !(0.0..=100.0).contains(&confidence_threshold) {
            return Err(SecurityError::ImageAnalysis(format!(
                "confidence threshold {} outside 0-100",
                confidence_threshold
            )));
        }
        let confidence: f32 = rand::thread_rng().gen_range(0.0..100.0);
        debug!(
            "[Fake] {}x{} frame ({} bytes) scored {:.1} (threshold {:.1})",
            image.width(),
            image.height(),
            image.data().len(),
            confidence,
            confidence_threshold
        );
        Ok(confidence >= confidence_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_threshold_always_finds_cat() {
        let service = FakeImageService::new();
        let image = CameraImage::new(1, 1, vec![0, 0, 0]);
        for _ in 0..100 {
            assert!(service.image_contains_cat(&image, 0.0).unwrap());
        }
    }

    #[test]
    fn test_full_threshold_never_finds_cat() {
        let service = FakeImageService::new();
        let image = CameraImage::default();
        for _ in 0..100 {
            assert!(!service.image_contains_cat(&image, 100.0).unwrap());
        }
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let service = FakeImageService::new();
        let result = service.image_contains_cat(&CameraImage::default(), 150.0);
        assert!(matches!(result, Err(SecurityError::ImageAnalysis(_))));
    }
}
