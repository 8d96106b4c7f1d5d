use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthError {
    #[error("corpus is empty: no pixel is both unselected and usable as source material")]
    EmptyCorpus,

    #[error("target is empty: no pixel is fully selected")]
    EmptyTarget,

    #[error("mask geometry {mask_width}x{mask_height} does not match image geometry {image_width}x{image_height}")]
    MaskGeometryMismatch {
        image_width: u32,
        image_height: u32,
        mask_width: u32,
        mask_height: u32,
    },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("synthesis was cancelled")]
    Cancelled,
}

impl SynthError {
    /// Stable numeric code for callers bridging to a C-style ABI.
    /// Success is 0.
    pub fn code(&self) -> i32 {
        match self {
            SynthError::EmptyCorpus => 1,
            SynthError::EmptyTarget => 2,
            SynthError::MaskGeometryMismatch { .. } => 3,
            SynthError::InvalidParameters(_) => 4,
            SynthError::Cancelled => 5,
        }
    }
}

pub type SynthResult<T> = Result<T, SynthError>;
