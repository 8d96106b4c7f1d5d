use serde::{Deserialize, Serialize};

/// Packed pixel layouts accepted at the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Gray,
    GrayA,
    Rgb,
    Rgba,
}

/// Where each channel lives inside one interleaved pixel record.
///
/// The engine treats channels uniformly as pixelels and never interprets
/// them beyond these indices. None of the public formats carries a map
/// channel, but the metric honors one when `map_start` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatIndices {
    pub color_start: usize,
    /// Exclusive.
    pub color_end: usize,
    pub alpha: Option<usize>,
    pub map_start: Option<usize>,
    pub pixelels_per_pixel: usize,
}

impl ImageFormat {
    pub fn pixelels_per_pixel(self) -> usize {
        match self {
            ImageFormat::Gray => 1,
            ImageFormat::GrayA => 2,
            ImageFormat::Rgb => 3,
            ImageFormat::Rgba => 4,
        }
    }

    pub fn indices(self) -> FormatIndices {
        match self {
            ImageFormat::Gray => FormatIndices {
                color_start: 0,
                color_end: 1,
                alpha: None,
                map_start: None,
                pixelels_per_pixel: 1,
            },
            ImageFormat::GrayA => FormatIndices {
                color_start: 0,
                color_end: 1,
                alpha: Some(1),
                map_start: None,
                pixelels_per_pixel: 2,
            },
            ImageFormat::Rgb => FormatIndices {
                color_start: 0,
                color_end: 3,
                alpha: None,
                map_start: None,
                pixelels_per_pixel: 3,
            },
            ImageFormat::Rgba => FormatIndices {
                color_start: 0,
                color_end: 3,
                alpha: Some(3),
                map_start: None,
                pixelels_per_pixel: 4,
            },
        }
    }
}

impl FormatIndices {
    #[inline]
    pub fn color_count(&self) -> usize {
        self.color_end - self.color_start
    }
}
