use super::Synthesizer;
use crate::buffer::{self, ImageBuffer, MaskBuffer};
use crate::config::SynthParams;
use crate::consts::{ALPHA_TOTALLY_TRANSPARENT, MASK_TOTALLY_SELECTED, PROBER_NONE};
use crate::error::{SynthError, SynthResult};
use crate::format::ImageFormat;
use crate::map::{DistanceMap, PixelMap, Point, SourceMap};
use crate::metric::MetricTables;
use crate::offsets;
use tracing::debug;

/// Validate the inputs and assemble the run state.
///
/// Every failure leaves the caller's buffers untouched; the image is only
/// copied, never mutated, until `write_back`.
pub(super) fn build(
    image: &ImageBuffer<'_>,
    mask: &MaskBuffer<'_>,
    format: ImageFormat,
    params: SynthParams,
) -> SynthResult<Synthesizer> {
    check_geometry(image, mask)?;
    params.validate()?;

    let indices = format.indices();
    let pixel_map = buffer::unpack_image(image, indices.pixelels_per_pixel);
    let mut rng = fastrand::Rng::with_seed(params.seed);

    // Fully selected pixels are synthesized; everything else that carries
    // color (alpha above total transparency) is legitimate source material.
    let mut target_points = Vec::new();
    let mut corpus_points = Vec::new();
    for y in 0..image.height {
        for x in 0..image.width {
            let p = Point { x, y };
            if mask.value(x, y) >= MASK_TOTALLY_SELECTED {
                target_points.push(p);
            } else {
                let opaque = match indices.alpha {
                    Some(a) => pixel_map.get(p, a) > ALPHA_TOTALLY_TRANSPARENT,
                    None => true,
                };
                if opaque {
                    corpus_points.push(p);
                }
            }
        }
    }
    if corpus_points.is_empty() {
        return Err(SynthError::EmptyCorpus);
    }
    if target_points.is_empty() {
        return Err(SynthError::EmptyTarget);
    }
    rng.shuffle(&mut target_points);
    rng.shuffle(&mut corpus_points);

    let has_value = PixelMap::new(image.width, image.height, 1);
    for &p in &corpus_points {
        has_value.set(p, 0, 1);
    }

    debug!(
        targets = target_points.len(),
        corpus = corpus_points.len(),
        neighbors = params.neighbors,
        "prepared point sequences"
    );

    Ok(Synthesizer {
        indices,
        image: pixel_map,
        has_value,
        recent_prober: PixelMap::filled(image.width, image.height, 1, PROBER_NONE),
        source_of: SourceMap::new(image.width, image.height),
        best_distance: DistanceMap::new(image.width, image.height),
        target_points,
        corpus_points,
        offsets: offsets::sorted_offsets(params.neighbors),
        tables: MetricTables::new(params.sensitivity_to_outliers, params.map_weight),
        params,
    })
}

fn check_geometry(image: &ImageBuffer<'_>, mask: &MaskBuffer<'_>) -> SynthResult<()> {
    if image.width != mask.width || image.height != mask.height {
        return Err(SynthError::MaskGeometryMismatch {
            image_width: image.width,
            image_height: image.height,
            mask_width: mask.width,
            mask_height: mask.height,
        });
    }
    // Source records pack coordinates into 16 bits apiece.
    if image.width > u16::MAX as u32 || image.height > u16::MAX as u32 {
        return Err(SynthError::InvalidParameters(format!(
            "image dimensions {}x{} exceed the supported 65535 limit",
            image.width, image.height
        )));
    }
    Ok(())
}
