use crate::buffer::{ImageBuffer, MaskBuffer};
use crate::config::SynthParams;
use crate::error::{SynthError, SynthResult};
use crate::format::ImageFormat;
use crate::progress::ProgressObserver;
use crate::synth::Synthesizer;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Fill the masked region of `image` with synthesized content drawn from
/// the unmasked remainder.
///
/// `image` is mutated in place: fully selected pixels (mask byte 255)
/// receive synthesized color, everything else, alpha bytes included, keeps
/// its input value. `None` parameters select the defaults. The observer is
/// called on integer percent advances; setting `cancel` from any thread
/// stops the run cooperatively, after which the buffer's target region is
/// only partially filled and should be treated as undefined.
pub fn image_synth(
    image: &mut ImageBuffer<'_>,
    mask: &MaskBuffer<'_>,
    format: ImageFormat,
    params: Option<SynthParams>,
    observer: &dyn ProgressObserver,
    cancel: &AtomicBool,
) -> SynthResult<()> {
    if cancel.load(Ordering::Relaxed) {
        return Err(SynthError::Cancelled);
    }
    let params = params.unwrap_or_default();
    let mut synth = Synthesizer::build(image, mask, format, params)?;

    info!(
        width = image.width,
        height = image.height,
        targets = synth.target_count(),
        corpus = synth.corpus_count(),
        "synthesizing"
    );

    let outcome = synth.run(observer, cancel);
    // A cancelled run still writes back whatever was committed; the
    // corpus region is untouched either way.
    synth.write_back(image);
    outcome
}
