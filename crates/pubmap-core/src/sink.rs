//! Output sinks: TSV/Parquet table writers and atomic JSON documents.
//!
//! Every sink writes to `<final>.tmp` and renames on finalize, so a crashed
//! run never leaves a half-written table behind a valid-looking name.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::datatypes::Schema;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde::Serialize;

fn tmp_path_for(final_path: &Path) -> PathBuf {
    let mut name = final_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    final_path.with_file_name(name)
}

fn remove_stale(tmp_path: &Path) -> io::Result<()> {
    if tmp_path.exists() {
        fs::remove_file(tmp_path)?;
    }
    Ok(())
}

/// Parquet table writer with atomic tmp→rename
pub struct ParquetSink {
    writer: ArrowWriter<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    row_count: usize,
}

impl std::fmt::Debug for ParquetSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParquetSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl ParquetSink {
    /// Create `<output_dir>/<table>.parquet` (written to a tmp file first)
    pub fn new(
        table: &str,
        output_dir: &Path,
        schema: &Schema,
        zstd_level: i32,
    ) -> Result<Self, io::Error> {
        let final_path = output_dir.join(format!("{table}.parquet"));
        let tmp_path = tmp_path_for(&final_path);
        remove_stale(&tmp_path)?;

        let file = File::create(&tmp_path)?;
        let level = ZstdLevel::try_new(zstd_level)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let props = WriterProperties::builder()
            .set_compression(Compression::ZSTD(level))
            .build();

        let writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))
            .map_err(io::Error::other)?;

        Ok(Self {
            writer,
            tmp_path,
            final_path,
            row_count: 0,
        })
    }

    /// Write a record batch
    pub fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), io::Error> {
        self.row_count += batch.num_rows();
        self.writer.write(batch).map_err(io::Error::other)
    }

    /// Finalize: flush footer and atomically rename tmp → final
    pub fn finalize(self) -> Result<usize, io::Error> {
        let row_count = self.row_count;
        self.writer.close().map_err(io::Error::other)?;
        fs::rename(&self.tmp_path, &self.final_path)?;
        Ok(row_count)
    }
}

/// Tab-separated table writer (header row from the serde field names)
pub struct TsvSink {
    writer: csv::Writer<BufWriter<File>>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    row_count: usize,
}

impl std::fmt::Debug for TsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsvSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl TsvSink {
    /// Create `<output_dir>/<table>.tsv` (written to a tmp file first)
    pub fn new(table: &str, output_dir: &Path) -> Result<Self, io::Error> {
        let final_path = output_dir.join(format!("{table}.tsv"));
        let tmp_path = tmp_path_for(&final_path);
        remove_stale(&tmp_path)?;

        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(BufWriter::new(File::create(&tmp_path)?));

        Ok(Self {
            writer,
            tmp_path,
            final_path,
            row_count: 0,
        })
    }

    pub fn write_row<T: Serialize>(&mut self, row: &T) -> Result<(), io::Error> {
        self.row_count += 1;
        self.writer.serialize(row).map_err(io::Error::other)
    }

    /// Flush and atomically rename tmp → final
    pub fn finalize(mut self) -> Result<usize, io::Error> {
        self.writer.flush()?;
        drop(self.writer);
        fs::rename(&self.tmp_path, &self.final_path)?;
        Ok(self.row_count)
    }
}

/// Serialize `value` as compact JSON to `path` via tmp→rename
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), io::Error> {
    let tmp_path = tmp_path_for(path);
    remove_stale(&tmp_path)?;

    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    serde_json::to_writer(&mut writer, value).map_err(io::Error::other)?;
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp_path, path)
}

/// Remove stale .tmp files in the output directory
pub fn cleanup_tmp_files(output_dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "tmp") {
            log::warn!("Removing stale tmp file: {}", path.display());
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
