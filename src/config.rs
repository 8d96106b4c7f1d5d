use crate::consts::{DEFAULT_SEED, THREAD_LIMIT};
use crate::error::{SynthError, SynthResult};
use serde::{Deserialize, Serialize};

/// How the pixel under synthesis participates in its own patch metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchContext {
    /// The center offset contributes a color term like any other neighbor,
    /// which biases probes toward keeping the current value.
    Vanilla,
    /// The center offset contributes no color term; only the surrounding
    /// context drives the match.
    #[default]
    Directional,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthParams {
    /// Reserved selector for mask-derived corpus variants.
    pub corpus: u32,

    /// Offsets per patch.
    pub neighbors: usize,

    /// Candidate sources probed per target pixel.
    pub tries: usize,

    /// Wrap the metric across the left/right image edge.
    pub make_tileable_horizontally: bool,

    /// Wrap the metric across the top/bottom image edge.
    pub make_tileable_vertically: bool,

    pub match_context: MatchContext,

    /// Weight of the map channel relative to color, for formats that
    /// carry one.
    pub map_weight: f32,

    /// Gaussian sigma of the color table, as a fraction of the byte range.
    /// Small values treat moderate differences as outright mismatches.
    pub sensitivity_to_outliers: f32,

    /// Synthesis workers forked per pass.
    pub threads: usize,

    /// Seed of the engine-owned generator. Output is reproducible for a
    /// fixed seed and thread count.
    pub seed: u64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            corpus: 0,
            neighbors: 30,
            tries: 200,
            make_tileable_horizontally: false,
            make_tileable_vertically: false,
            match_context: MatchContext::Directional,
            map_weight: 0.5,
            sensitivity_to_outliers: 0.117,
            threads: THREAD_LIMIT,
            seed: DEFAULT_SEED,
        }
    }
}

impl SynthParams {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> SynthResult<()> {
        if self.neighbors == 0 {
            return Err(SynthError::InvalidParameters(
                "neighbors must be at least 1".into(),
            ));
        }
        if self.tries == 0 {
            return Err(SynthError::InvalidParameters(
                "tries must be at least 1".into(),
            ));
        }
        if self.threads == 0 {
            return Err(SynthError::InvalidParameters(
                "threads must be at least 1".into(),
            ));
        }
        if !self.map_weight.is_finite() || self.map_weight < 0.0 {
            return Err(SynthError::InvalidParameters(
                "map_weight must be finite and non-negative".into(),
            ));
        }
        if !self.sensitivity_to_outliers.is_finite() || self.sensitivity_to_outliers <= 0.0 {
            return Err(SynthError::InvalidParameters(
                "sensitivity_to_outliers must be finite and positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SynthParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.neighbors, 30);
        assert_eq!(params.tries, 200);
        assert_eq!(params.match_context, MatchContext::Directional);
    }

    #[test]
    fn degenerate_values_are_rejected() {
        for params in [
            SynthParams {
                neighbors: 0,
                ..Default::default()
            },
            SynthParams {
                tries: 0,
                ..Default::default()
            },
            SynthParams {
                threads: 0,
                ..Default::default()
            },
            SynthParams {
                map_weight: f32::NAN,
                ..Default::default()
            },
            SynthParams {
                sensitivity_to_outliers: 0.0,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                params.validate(),
                Err(SynthError::InvalidParameters(_))
            ));
        }
    }
}
