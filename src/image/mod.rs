//! Camera frames and the cat-recognition boundary.

pub mod fake;

pub use fake::FakeImageService;

use crate::error::Result;
use std::fs;
use std::path::Path;

/// A single camera frame as raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CameraImage {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Read an encoded image file from disk. Dimensions are left unknown (0x0).
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Ok(Self::new(0, 0, data))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Decides whether a frame shows a cat.
///
/// `confidence_threshold` is on a 0-100 scale. Implementations may call a
/// remote service or a local model; the caller only sees the boolean.
pub trait ImageService: Send + Sync {
    fn image_contains_cat(&self, image: &CameraImage, confidence_threshold: f32) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reads_bytes() {
        let path = std::env::temp_dir().join(format!("catpoint-frame-{}.bin", uuid::Uuid::new_v4()));
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let image = CameraImage::load(&path).unwrap();
        assert_eq!(image.data(), &[1, 2, 3]);
        assert_eq!((image.width(), image.height()), (0, 0));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_fails() {
        let path = std::env::temp_dir().join(format!("catpoint-missing-{}.bin", uuid::Uuid::new_v4()));
        assert!(CameraImage::load(&path).is_err());
    }
}
