/*! Sample writer.

Appends one JSON line per accepted ad. `serde_json` keeps non-ASCII
literal, matching the downstream annotation tooling's expectations.
!*/
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::document::ExtractedSample;
use crate::error::Error;

pub struct SampleWriter<W>
where
    W: Write,
{
    handle: W,
}

impl SampleWriter<BufWriter<File>> {
    /// Open `path` for appending, creating it if absent. Samples from
    /// earlier sources of the same run accumulate in the same file.
    pub fn append(path: &Path) -> Result<Self, Error> {
        let handle = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(handle)))
    }
}

impl<W> SampleWriter<W>
where
    W: Write,
{
    pub fn new(handle: W) -> Self {
        Self { handle }
    }

    pub fn write(&mut self, sample: &ExtractedSample) -> Result<(), Error> {
        serde_json::to_writer(&mut self.handle, sample)?;
        self.handle.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        Ok(self.handle.flush()?)
    }

    pub fn get_ref(&self) -> &W {
        &self.handle
    }
}
