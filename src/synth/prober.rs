use super::Synthesizer;
use crate::config::MatchContext;
use crate::consts::{MAX_PIXELELS_PER_PIXEL, OUT_OF_IMAGE_PENALTY, PROBER_NONE, PROGRESS_CHUNK};
use crate::map::{PixelOffset, Point};
use crate::progress::ProgressMonitor;
use std::sync::atomic::{AtomicBool, Ordering};

/// One patch offset of the target neighborhood, classified once per visit.
struct Neighbor {
    offset: PixelOffset,
    /// `None` when the offset leaves the image: flat penalty, nothing to
    /// compare against.
    context: Option<NeighborContext>,
}

struct NeighborContext {
    /// Where the neighbor's own value came from, for coherence candidates.
    source: Option<Point>,
    /// Snapshot of the neighbor's record, taken once so the candidate loop
    /// reads it from registers instead of re-walking the map.
    pixelels: [u8; MAX_PIXELELS_PER_PIXEL],
}

/// Per-worker probe state: PRNG sub-stream, dedup tag, neighborhood
/// scratch. One prober lives across all passes so its random stream never
/// restarts.
pub(super) struct Prober {
    thread_index: usize,
    thread_count: usize,
    rng: fastrand::Rng,
    visit: u64,
    neighbors: Vec<Neighbor>,
}

impl Prober {
    pub fn new(thread_index: usize, thread_count: usize, seed: u64, patch_len: usize) -> Self {
        Self {
            thread_index,
            thread_count,
            rng: fastrand::Rng::with_seed(seed.wrapping_add(thread_index as u64)),
            visit: 0,
            neighbors: Vec::with_capacity(patch_len),
        }
    }

    /// Tag for the current visit. Tags cycle below `PROBER_NONE`; a stale
    /// collision merely re-probes one candidate, so no coordination is
    /// needed between workers.
    #[inline]
    fn tag(&self) -> u8 {
        let serial = self
            .visit
            .wrapping_mul(self.thread_count as u64)
            .wrapping_add(self.thread_index as u64);
        (serial % PROBER_NONE as u64) as u8
    }

    /// Worker body of one pass: visit this worker's interleaved share of
    /// the shuffled target points below `window`. Returns the number of
    /// pixels whose recorded distance decreased.
    pub fn synthesize_span(
        &mut self,
        synth: &Synthesizer,
        window: usize,
        monitor: &ProgressMonitor<'_>,
        cancel: &AtomicBool,
    ) -> u64 {
        let mut betters = 0u64;
        let mut since_report = 0u64;
        for index in (self.thread_index..window).step_by(self.thread_count) {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            let point = synth.target_points[index];
            self.visit += 1;
            if self.try_pixel(point, synth) {
                betters += 1;
            }
            since_report += 1;
            if since_report == PROGRESS_CHUNK {
                monitor.add(PROGRESS_CHUNK);
                since_report = 0;
            }
        }
        monitor.add(since_report);
        betters
    }

    /// Probe candidate sources for one target pixel and commit the best
    /// one found, if it strictly beats the recorded prior.
    fn try_pixel(&mut self, point: Point, synth: &Synthesizer) -> bool {
        self.prepare_neighbors(point, synth);

        let prior = synth.best_distance.get(point);
        let mut best = prior;
        let mut best_source: Option<Point> = None;
        let tag = self.tag();

        // Coherence first: a neighbor's source shifted back by the
        // neighbor's offset predicts a good source for the center.
        let mut coherent_improved = false;
        for i in 0..self.neighbors.len() {
            let offset = self.neighbors[i].offset;
            let source = match &self.neighbors[i].context {
                Some(ctx) => ctx.source,
                None => None,
            };
            let Some(source) = source else { continue };
            let Some(candidate) = synth.resolve(source, offset.negated()) else {
                continue;
            };
            if !synth.has_value_at(candidate) {
                continue;
            }
            if let Some(sum) = self.try_candidate(candidate, tag, best, synth) {
                best = sum;
                best_source = Some(candidate);
                coherent_improved = true;
            }
        }

        // Fall back to uniform draws from the corpus only when coherence
        // found nothing better than the pixel already has.
        if !coherent_improved {
            for _ in 0..synth.params.tries {
                let candidate =
                    synth.corpus_points[self.rng.usize(0..synth.corpus_points.len())];
                if let Some(sum) = self.try_candidate(candidate, tag, best, synth) {
                    best = sum;
                    best_source = Some(candidate);
                }
            }
        }

        match best_source {
            Some(source) => {
                self.commit(point, source, best, synth);
                true
            }
            None => false,
        }
    }

    /// Patch distance of `candidate` against the prepared neighborhood,
    /// abandoned as soon as it can no longer beat `best`. `Some(sum)`
    /// implies `sum < best`.
    fn try_candidate(
        &self,
        candidate: Point,
        tag: u8,
        best: u64,
        synth: &Synthesizer,
    ) -> Option<u64> {
        // Already probed for this target pixel this visit. The dedup is
        // approximate (tags cycle and collide across workers), so it is
        // ignored while the pixel has no value yet: the first visit must
        // never come up empty.
        if best != u64::MAX && synth.recent_prober.get(candidate, 0) == tag {
            return None;
        }
        synth.recent_prober.set(candidate, 0, tag);

        let indices = &synth.indices;
        let skip_center_color = synth.params.match_context == MatchContext::Directional;
        let mut sum = 0u64;

        for neighbor in &self.neighbors {
            let Some(ctx) = &neighbor.context else {
                sum += OUT_OF_IMAGE_PENALTY;
                if sum >= best {
                    return None;
                }
                continue;
            };
            match synth.resolve(candidate, neighbor.offset) {
                Some(probe) if synth.has_value_at(probe) => {
                    let mut term = 0u64;
                    if !(skip_center_color && neighbor.offset.is_zero()) {
                        for k in indices.color_start..indices.color_end {
                            term += synth
                                .tables
                                .color_diff(ctx.pixelels[k], synth.image.get(probe, k));
                        }
                    }
                    if let Some(m) = indices.map_start {
                        term += synth
                            .tables
                            .map_diff(ctx.pixelels[m], synth.image.get(probe, m));
                    }
                    if let Some(a) = indices.alpha {
                        // Both participants' opacity weigh the comparison.
                        let target_alpha = ctx.pixelels[a] as u64;
                        let probe_alpha = synth.image.get(probe, a) as u64;
                        term = term * target_alpha * probe_alpha / (255 * 255);
                    }
                    sum += term;
                }
                // Outside the image, or no committed value to compare
                // against: the candidate's patch is missing information
                // here, which costs as much as a full mismatch.
                _ => sum += OUT_OF_IMAGE_PENALTY,
            }
            if sum >= best {
                return None;
            }
        }
        Some(sum)
    }

    /// Classify every patch offset around `point`: cached context, flat
    /// penalty, or nothing yet.
    fn prepare_neighbors(&mut self, point: Point, synth: &Synthesizer) {
        self.neighbors.clear();
        let pixelels_per_pixel = synth.indices.pixelels_per_pixel;
        for &offset in &synth.offsets {
            match synth.resolve(point, offset) {
                Some(neighbor) => {
                    if !synth.has_value_at(neighbor) {
                        // No information yet; contributes nothing either way.
                        continue;
                    }
                    let mut pixelels = [0u8; MAX_PIXELELS_PER_PIXEL];
                    for (k, slot) in pixelels.iter_mut().enumerate().take(pixelels_per_pixel) {
                        *slot = synth.image.get(neighbor, k);
                    }
                    self.neighbors.push(Neighbor {
                        offset,
                        context: Some(NeighborContext {
                            source: synth.source_of.get(neighbor),
                            pixelels,
                        }),
                    });
                }
                None => self.neighbors.push(Neighbor {
                    offset,
                    context: None,
                }),
            }
        }
    }

    fn commit(&self, point: Point, source: Point, distance: u64, synth: &Synthesizer) {
        let indices = &synth.indices;
        for k in indices.color_start..indices.color_end {
            synth.image.set(point, k, synth.image.get(source, k));
        }
        synth.source_of.set(point, source);
        synth.has_value.set(point, 0, 1);
        synth.best_distance.set(point, distance);
    }
}
