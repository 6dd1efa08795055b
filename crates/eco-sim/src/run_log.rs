//! Per-run text log mirroring what is printed to the console.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use eco_world::Frame;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct RunLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RunLog {
    /// Create `dir/run_<timestamp>.txt`, creating `dir` if needed.
    pub fn create(dir: &Path, started_at: DateTime<Local>) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create results directory {}", dir.display()))?;

        let path = dir.join(file_name(started_at));
        let file = File::create(&path)
            .with_context(|| format!("cannot open run log {}", path.display()))?;

        info!("Results will be written to {}", path.display());
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.writer.write_all(render_frame(frame).as_bytes())?;
        Ok(())
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}

pub fn file_name(started_at: DateTime<Local>) -> String {
    format!("run_{}.txt", started_at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Summary line, grid, and the optional cell dump, as one text block
pub fn render_frame(frame: &Frame) -> String {
    let mut out = format!("{}\n{}", frame.summary, frame.grid);
    if let Some(detail) = &frame.detail {
        out.push_str(&detail.to_string());
        out.push('\n');
    }
    out
}
