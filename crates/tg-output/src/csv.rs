//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `samples.csv`
//! - `predictions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use tg_model::SampleRow;

use crate::writer::OutputWriter;
use crate::{OutputResult, PredictionRow};

pub const SAMPLE_HEADER: [&str; 14] = [
    "timestamp",
    "intersection_id",
    "intersection_name",
    "lat",
    "lng",
    "road_type",
    "area_type",
    "time_of_day",
    "weather",
    "day_type",
    "congestion_level",
    "predicted_speed",
    "volume",
    "wait_time",
];

pub const PREDICTION_HEADER: [&str; 8] = [
    "hour",
    "weather",
    "day_type",
    "node_id",
    "congestion_level",
    "predicted_speed",
    "volume",
    "wait_time",
];

/// Writes samples and predictions to two CSV files.
pub struct CsvWriter {
    samples:     Writer<File>,
    predictions: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut samples = Writer::from_path(dir.join("samples.csv"))?;
        samples.write_record(SAMPLE_HEADER)?;

        let mut predictions = Writer::from_path(dir.join("predictions.csv"))?;
        predictions.write_record(PREDICTION_HEADER)?;

        Ok(Self { samples, predictions, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_samples(&mut self, rows: &[SampleRow]) -> OutputResult<()> {
        for row in rows {
            self.samples.write_record(&[
                row.timestamp.clone(),
                row.intersection_id.key(),
                row.intersection_name.clone(),
                row.lat.to_string(),
                row.lng.to_string(),
                row.road_type.to_string(),
                row.area_type.to_string(),
                row.time_of_day.to_string(),
                row.weather.to_string(),
                row.day_type.to_string(),
                row.congestion_level.to_string(),
                row.predicted_speed.to_string(),
                row.volume.to_string(),
                row.wait_time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_predictions(&mut self, rows: &[PredictionRow]) -> OutputResult<()> {
        for row in rows {
            let p = &row.prediction;
            self.predictions.write_record(&[
                row.hour.to_string(),
                row.weather.to_string(),
                row.day_type.to_string(),
                row.node.key(),
                p.congestion_level.to_string(),
                p.predicted_speed.to_string(),
                p.volume.to_string(),
                p.wait_time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.samples.flush()?;
        self.predictions.flush()?;
        Ok(())
    }
}
