use crate::record::AlignedRecord;

/// The serving-time seam to a pre-trained classification model.
///
/// A classifier is loaded once at startup and shared read-only across
/// requests (`Arc<dyn Classifier>`): implementations must be safe to call
/// concurrently and must not mutate internal state while serving.
pub trait Classifier: Send + Sync {
    /// Input width the model was trained on.
    fn n_features(&self) -> usize;

    /// Predicted class label for the record.
    ///
    /// Total: concrete models resolve every record of the right width to
    /// a label without faulting.
    fn predict(&self, record: &AlignedRecord) -> i64;

    /// Class probability distribution for the record, when the model
    /// supports it.
    ///
    /// The default declines the capability. The pipeline treats `None` as
    /// "probability intentionally absent", never as a failure: label
    /// prediction stands on its own.
    fn predict_proba(&self, _record: &AlignedRecord) -> Option<Vec<f64>> {
        None
    }
}
