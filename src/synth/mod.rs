mod prober;
mod refiner;
mod setup;

use crate::buffer::{self, ImageBuffer, MaskBuffer};
use crate::config::SynthParams;
use crate::error::SynthResult;
use crate::format::{FormatIndices, ImageFormat};
use crate::map::{self, DistanceMap, PixelMap, PixelOffset, Point, SourceMap};
use crate::metric::MetricTables;
use crate::progress::ProgressObserver;
use std::sync::atomic::AtomicBool;

/// All state of one synthesis run.
///
/// `build` unpacks the caller's buffers and prepares the point sequences,
/// offsets and tables; `run` drives the refinement passes; `write_back`
/// returns the synthesized color to the packed buffer. The one-call
/// wrapper in [`crate::api`] composes the three; splitting them lets a
/// caller inspect per-pixel state in between.
#[derive(Debug)]
pub struct Synthesizer {
    pub(crate) params: SynthParams,
    pub(crate) indices: FormatIndices,

    /// The image under synthesis, corpus and target pixels interleaved.
    pub(crate) image: PixelMap,
    /// One byte per pixel, non-zero once the pixel holds a committed value.
    pub(crate) has_value: PixelMap,
    /// Tag of the last prober that touched the pixel as a candidate.
    pub(crate) recent_prober: PixelMap,
    pub(crate) source_of: SourceMap,
    pub(crate) best_distance: DistanceMap,

    /// Shuffled, then read-only.
    pub(crate) target_points: Vec<Point>,
    pub(crate) corpus_points: Vec<Point>,
    pub(crate) offsets: Vec<PixelOffset>,
    pub(crate) tables: MetricTables,
}

impl Synthesizer {
    pub fn build(
        image: &ImageBuffer<'_>,
        mask: &MaskBuffer<'_>,
        format: ImageFormat,
        params: SynthParams,
    ) -> SynthResult<Self> {
        setup::build(image, mask, format, params)
    }

    /// Run the full pass schedule. Leaves the internal maps in their final
    /// state even on cancellation.
    pub fn run(&mut self, observer: &dyn ProgressObserver, cancel: &AtomicBool) -> SynthResult<()> {
        refiner::refine(self, observer, cancel)
    }

    /// Copy the synthesized color pixelels of committed target pixels into
    /// the packed buffer. Everything else keeps its input bytes.
    pub fn write_back(&self, image: &mut ImageBuffer<'_>) {
        buffer::write_back_targets(
            image,
            &self.image,
            &self.indices,
            &self.target_points,
            &self.has_value,
        );
    }

    /// Whether the pixel currently holds a committed value. Corpus pixels
    /// always do; target pixels do once a prober has visited them.
    pub fn is_synthesized(&self, x: u32, y: u32) -> bool {
        self.has_value_at(Point { x, y })
    }

    /// Best patch distance committed for the pixel so far, if any.
    pub fn recorded_distance(&self, x: u32, y: u32) -> Option<u64> {
        match self.best_distance.get(Point { x, y }) {
            u64::MAX => None,
            d => Some(d),
        }
    }

    pub fn target_count(&self) -> usize {
        self.target_points.len()
    }

    pub fn corpus_count(&self) -> usize {
        self.corpus_points.len()
    }

    #[inline]
    pub(crate) fn has_value_at(&self, p: Point) -> bool {
        self.has_value.get(p, 0) != 0
    }

    /// Resolve `p + o` under this run's wrap settings.
    #[inline]
    pub(crate) fn resolve(&self, p: Point, o: PixelOffset) -> Option<Point> {
        map::offset_within(
            p,
            o,
            self.image.width(),
            self.image.height(),
            self.params.make_tileable_horizontally,
            self.params.make_tileable_vertically,
        )
    }
}
