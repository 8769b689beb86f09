use std::fs;
use std::io::{Read, Write};

use crate::core::{MeasurementRecord, SampleLog};
use crate::errors::{AlleleTraceError, Result};

/// CSV export and import of a `SampleLog`, one row per record with a header.
pub trait SampleLogIO: Sized {
    fn write(&self, writer: &mut dyn Write) -> Result<()>;
    fn read(reader: &mut dyn Read) -> Result<Self>;

    fn write_to_file(&self, path: &str) -> Result<()> {
        let file = fs::File::create(path)
            .map_err(|err| AlleleTraceError::WriteError(format!("Failed to create {path}: {err}")))?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    fn read_from_file(path: &str) -> Result<Self> {
        let file = fs::File::open(path)
            .map_err(|err| AlleleTraceError::ReadError(format!("Failed to open {path}: {err}")))?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }
}

impl SampleLogIO for SampleLog {
    fn write(&self, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer
            .write_record(MeasurementRecord::HEADER)
            .map_err(|err| AlleleTraceError::WriteError(format!("Failed to write header: {err}")))?;
        for record in self {
            csv_writer.serialize(record).map_err(|err| {
                AlleleTraceError::WriteError(format!("Failed to write record {record}: {err}"))
            })?;
        }
        csv_writer
            .flush()
            .map_err(|err| AlleleTraceError::WriteError(format!("Failed to flush: {err}")))
    }

    /// Reads records in file order. An empty input yields an empty log.
    fn read(reader: &mut dyn Read) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut log = SampleLog::new();
        // data rows start on line 2, below the header
        for (line, record) in (2..).zip(csv_reader.deserialize()) {
            let record: MeasurementRecord = record.map_err(|err| {
                AlleleTraceError::ReadError(format!("Failed to parse line {line}: {err}"))
            })?;
            log.push(record);
        }
        Ok(log)
    }
}
