/// Upper bound on refinement passes over the target.
pub const MAX_PASSES: usize = 6;

/// A pass that improves fewer than this fraction of all target points is
/// the last pass.
pub const TERMINATE_FRACTION: f32 = 0.1;

/// Default number of synthesis workers forked per pass.
pub const THREAD_LIMIT: usize = 4;

/// Workers report completed pixels to the shared progress monitor in
/// chunks of this size.
pub const PROGRESS_CHUNK: u64 = 4096;

/// Mask byte at or above which a pixel is synthesized. Lower non-zero
/// values are weighted selections and stay on the corpus side.
pub const MASK_TOTALLY_SELECTED: u8 = 255;

/// Alpha byte at which a pixel carries no color information and cannot
/// serve as source material.
pub const ALPHA_TOTALLY_TRANSPARENT: u8 = 0;

/// Largest entry of the perceptual difference tables.
pub const MAX_WEIGHT: u16 = u16::MAX;

/// Widest pixel record the engine handles: up to three color channels,
/// one alpha channel, one map channel.
pub const MAX_PIXELELS_PER_PIXEL: usize = 5;

/// Charged per patch offset whose context pixel is unavailable.
/// Equivalent to three color channels plus a map channel, all maximally
/// different.
pub const OUT_OF_IMAGE_PENALTY: u64 = MAX_WEIGHT as u64 * 4;

/// 512 entries cover the signed byte difference range -255..=255.
pub const METRIC_TABLE_LEN: usize = 512;

/// Seed used when the caller does not care about reproducibility.
pub const DEFAULT_SEED: u64 = 42;

/// Prober tag meaning "never visited". Live tags stay below this value.
pub const PROBER_NONE: u8 = 255;
