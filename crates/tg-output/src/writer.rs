//! The `OutputWriter` trait implemented by all backend writers.

use tg_model::SampleRow;

use crate::{OutputResult, PredictionRow};

/// Trait implemented by the CSV and SQLite writers.
pub trait OutputWriter {
    /// Append a batch of labeled samples.
    fn write_samples(&mut self, rows: &[SampleRow]) -> OutputResult<()>;

    /// Append a batch of per-node predictions.
    fn write_predictions(&mut self, rows: &[PredictionRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
