/// Result decoding and normalization
pub mod normalize;
pub mod raw;

pub use normalize::{
    normalize, normalize_value, ConfidenceLevel, Indicator, IndicatorKind, NormalizedQuestion,
    NormalizedResult,
};
pub use raw::{PayloadVariant, RawQuestion, RawResult, ScoreSource};
