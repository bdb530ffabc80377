//! `tg-output` — tabular writers for predictions and labeled samples.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                          |
//! |-----------|---------|----------------------------------------|
//! | *(none)*  | CSV     | `samples.csv`, `predictions.csv`       |
//! | `sqlite`  | SQLite  | `output.db`                            |
//!
//! Both implement [`OutputWriter`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use tg_output::{CsvWriter, OutputWriter, PredictionRow};
//!
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! writer.write_samples(&rows)?;
//! writer.write_predictions(&PredictionRow::from_map(&scenario, &map))?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::PredictionRow;
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
