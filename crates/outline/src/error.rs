use crate::style::{ClipOperation, CompositionMode};

use thiserror::Error;

/// The outline extractor's result type.
pub type ExtractionResult<T = ()> = Result<T, ExtractionError>;

/// A drawing feature that cannot be represented as plain line geometry.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnsupportedFeature {
    #[error("clipping mode {0:?} not supported")]
    Clip(ClipOperation),
    #[error("composition mode {0:?} not supported")]
    CompositionMode(CompositionMode),
}

impl UnsupportedFeature {
    /// Short name of the offending style attribute.
    pub fn name(&self) -> &'static str {
        match self {
            UnsupportedFeature::Clip(_) => "clip",
            UnsupportedFeature::CompositionMode(_) => "compositionMode",
        }
    }
}

/// Fatal errors. Extraction stops at the first one and the outlines
/// collected so far must not be relied upon.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ExtractionError {
    #[error("Unsupported feature ({}): {}", .0.name(), .0)]
    UnsupportedFeature(#[from] UnsupportedFeature),
}

#[test]
fn error_messages_name_the_feature() {
    let err: ExtractionError = UnsupportedFeature::Clip(ClipOperation::ReplaceClip).into();
    assert_eq!(
        err.to_string(),
        "Unsupported feature (clip): clipping mode ReplaceClip not supported"
    );

    let err: ExtractionError = UnsupportedFeature::CompositionMode(CompositionMode::Xor).into();
    assert_eq!(
        err.to_string(),
        "Unsupported feature (compositionMode): composition mode Xor not supported"
    );
}
