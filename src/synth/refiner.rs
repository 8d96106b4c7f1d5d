use super::prober::Prober;
use super::Synthesizer;
use crate::consts::{MAX_PASSES, TERMINATE_FRACTION};
use crate::error::{SynthError, SynthResult};
use crate::progress::{ProgressMonitor, ProgressObserver};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Window ends over the shuffled target sequence: one short opening pass,
/// then whole-target passes. The opening pass runs on an empty target, so
/// its patches are sparse and cheap; later passes refine against the
/// synthesized result.
pub(super) fn pass_windows(n: usize) -> Vec<usize> {
    (0..MAX_PASSES).map(|pass| ((n << pass) >> 1).clamp(1, n)).collect()
}

/// Total pixels the schedule would visit, to convert worker counts into a
/// progress percentage.
pub(super) fn estimate_pixels(windows: &[usize]) -> u64 {
    windows.iter().map(|&w| w as u64).sum()
}

/// Drive up to `MAX_PASSES` passes, forking one prober per configured
/// worker and rejoining at every pass boundary. Stops early once a pass
/// betters less than `TERMINATE_FRACTION` of all target points, or when
/// the cancel flag is observed.
pub(super) fn refine(
    synth: &Synthesizer,
    observer: &dyn ProgressObserver,
    cancel: &AtomicBool,
) -> SynthResult<()> {
    let n = synth.target_points.len();
    let windows = pass_windows(n);
    let monitor = ProgressMonitor::new(estimate_pixels(&windows), observer);

    let thread_count = synth.params.threads;
    let mut probers: Vec<Prober> = (0..thread_count)
        .map(|t| Prober::new(t, thread_count, synth.params.seed, synth.offsets.len()))
        .collect();

    for (pass, &window) in windows.iter().enumerate() {
        let betters: u64 = probers
            .par_iter_mut()
            .map(|prober| prober.synthesize_span(synth, window, &monitor, cancel))
            .sum();

        if cancel.load(Ordering::Relaxed) {
            debug!(pass, "cancelled");
            return Err(SynthError::Cancelled);
        }

        debug!(pass, window, betters, "pass complete");

        // Fraction of all target points, not of this pass's window.
        if (betters as f32) / (n as f32) < TERMINATE_FRACTION {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_pass_is_short_then_whole_target() {
        assert_eq!(pass_windows(100), vec![50, 100, 100, 100, 100, 100]);
        assert_eq!(pass_windows(7), vec![3, 7, 7, 7, 7, 7]);
    }

    #[test]
    fn single_pixel_target_is_still_visited_every_pass() {
        assert_eq!(pass_windows(1), vec![1; MAX_PASSES]);
    }

    #[test]
    fn estimate_sums_the_windows() {
        let windows = pass_windows(100);
        assert_eq!(estimate_pixels(&windows), 550);
    }
}
