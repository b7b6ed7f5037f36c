//! Vectorizer trait definition.

use crate::error::Result;
use crate::ml::feature::FeatureVector;

/// Turns normalized text into the feature representation a classifier was
/// trained on.
///
/// Implementations must accept the empty string and must not mutate
/// themselves during `transform`; one instance serves every request.
pub trait Vectorizer: Send + Sync {
    /// Transform a normalized document into a feature vector.
    fn transform(&self, text: &str) -> Result<FeatureVector>;

    /// Output dimension, when known.
    fn dimension(&self) -> Option<usize> {
        None
    }

    /// Get the name of this vectorizer for debugging and logging.
    fn name(&self) -> &str;
}
