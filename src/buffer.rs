use crate::format::FormatIndices;
use crate::map::{PixelMap, Point};

/// Caller-owned packed image bytes, mutated in place by synthesis.
///
/// `row_bytes` may exceed `width * pixelels` to express row padding; the
/// padding bytes are never read or written.
pub struct ImageBuffer<'a> {
    pub bytes: &'a mut [u8],
    pub width: u32,
    pub height: u32,
    pub row_bytes: usize,
}

/// Selection mask over the same geometry, one byte per pixel: 0 keeps a
/// pixel as corpus, 255 marks it for synthesis.
pub struct MaskBuffer<'a> {
    pub bytes: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub row_bytes: usize,
}

impl MaskBuffer<'_> {
    #[inline]
    pub(crate) fn value(&self, x: u32, y: u32) -> u8 {
        self.bytes[y as usize * self.row_bytes + x as usize]
    }
}

/// Copy the packed caller buffer into a tight interleaved pixel map.
pub(crate) fn unpack_image(image: &ImageBuffer<'_>, pixelels_per_pixel: usize) -> PixelMap {
    let map = PixelMap::new(image.width, image.height, pixelels_per_pixel);
    for y in 0..image.height {
        let row = y as usize * image.row_bytes;
        for x in 0..image.width {
            let record = row + x as usize * pixelels_per_pixel;
            for k in 0..pixelels_per_pixel {
                map.set(Point { x, y }, k, image.bytes[record + k]);
            }
        }
    }
    map
}

/// Write synthesized color pixelels back into the packed buffer.
///
/// Only committed target pixels are touched, and only their color
/// channels: corpus bytes and alpha bytes keep their input values.
pub(crate) fn write_back_targets(
    image: &mut ImageBuffer<'_>,
    map: &PixelMap,
    indices: &FormatIndices,
    targets: &[Point],
    has_value: &PixelMap,
) {
    for &p in targets {
        if has_value.get(p, 0) == 0 {
            continue;
        }
        let record = p.y as usize * image.row_bytes + p.x as usize * indices.pixelels_per_pixel;
        for k in indices.color_start..indices.color_end {
            image.bytes[record + k] = map.get(p, k);
        }
    }
}
