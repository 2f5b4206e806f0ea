//! The output corpus: an append-safe CSV of result records.
//!
//! One record per classified line, flushed to disk before the driver
//! advances, so a crash after N records leaves a valid file holding
//! exactly those N records. The writer owns the file handle for its
//! whole lifetime; nothing else touches the output.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Header row of the output corpus.
pub const HEADER: [&str; 2] = ["Original_Sentence", "Classified_Label"];

/// Streaming writer for result records.
///
/// Opens in append mode. The header is written only when the file is
/// new or empty; re-running over an existing corpus appends a second
/// full set of records after the first (the pipeline is deliberately
/// not idempotent across restarts).
pub struct ResultWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    records_written: usize,
}

impl ResultWriter {
    /// Open (or create) the output corpus at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let is_empty = file.metadata()?.len() == 0;

        let mut writer = csv::Writer::from_writer(file);
        if is_empty {
            writer.write_record(HEADER)?;
            writer.flush()?;
        }

        Ok(Self {
            writer,
            path,
            records_written: 0,
        })
    }

    /// Append one result record and flush it to stable storage.
    pub fn append(&mut self, sentence: &str, label: &str) -> Result<()> {
        self.writer.write_record([sentence, label])?;
        self.writer.flush()?;
        self.records_written += 1;
        Ok(())
    }

    /// Records appended through this writer (excludes the header and
    /// any records from earlier runs).
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Final flush, surfacing any error the implicit drop would hide.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}
