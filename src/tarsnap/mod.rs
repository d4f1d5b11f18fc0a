pub mod paths;

use anyhow::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::archives::ArchiveStore;
use crate::error::TsrError;

/// A tarsnap binary bound to one configuration file.
#[derive(Debug, Clone)]
pub struct Tarsnap {
    bin: PathBuf,
    configfile: String,
}

impl Tarsnap {
    pub fn new(bin: PathBuf, configfile: String) -> Self {
        Self { bin, configfile }
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    fn run(&self, args: &[&OsStr]) -> Result<Output, TsrError> {
        let rendered: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
        let command = format!("{} {}", self.bin.display(), rendered.join(" "));
        tracing::debug!(%command, "running tarsnap");
        let out = Command::new(&self.bin)
            .args(args)
            .output()
            .map_err(|err| TsrError::ToolUnavailable {
                bin: self.bin.clone(),
                reason: err.to_string(),
            })?;
        if !out.status.success() {
            return Err(TsrError::ToolFailed {
                command,
                status: out.status,
                output: combined_output(&out),
            });
        }
        Ok(out)
    }
}

impl ArchiveStore for Tarsnap {
    fn list_archives(&self) -> Result<Vec<u8>> {
        let out = self.run(&[
            OsStr::new("--list-archives"),
            OsStr::new("--configfile"),
            OsStr::new(&self.configfile),
        ])?;
        Ok(out.stdout)
    }

    fn delete_archive(&self, name: &OsStr) -> Result<()> {
        self.run(&[
            OsStr::new("-d"),
            OsStr::new("--configfile"),
            OsStr::new(&self.configfile),
            OsStr::new("-f"),
            name,
        ])?;
        tracing::info!(archive = %name.to_string_lossy(), "archive deleted");
        Ok(())
    }
}

fn combined_output(out: &Output) -> String {
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let mut combined = String::with_capacity(stdout.len() + stderr.len());
    combined.push_str(stdout.trim_end());
    if !combined.is_empty() && !stderr.trim().is_empty() {
        combined.push('\n');
    }
    combined.push_str(stderr.trim_end());
    combined
}
