//! Non-parametric neighborhood-matching image resynthesis.
//!
//! Given a packed raster image and a selection mask, the engine refills
//! the selected region so that every local neighborhood of the result
//! statistically matches some neighborhood of the unselected remainder.
//! The usual applications are content-aware hole filling and texture
//! transfer.
//!
//! [`image_synth`] is the one-call entry point; [`Synthesizer`] exposes
//! the same run in stages for callers that want to inspect per-pixel
//! state between building, refining and writing back.

pub mod api;
pub mod buffer;
pub mod config;
pub mod consts;
pub mod error;
pub mod format;
pub mod map;
pub mod metric;
pub mod offsets;
pub mod progress;
pub mod synth;

pub use api::image_synth;
pub use buffer::{ImageBuffer, MaskBuffer};
pub use config::{MatchContext, SynthParams};
pub use error::{SynthError, SynthResult};
pub use format::{FormatIndices, ImageFormat};
pub use progress::ProgressObserver;
pub use synth::Synthesizer;
