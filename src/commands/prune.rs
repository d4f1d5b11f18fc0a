use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::archives::retention::split_retained;
use crate::archives::{Archive, ArchiveStore};
use crate::error::TsrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Stop at the first failed delete.
    #[default]
    FailFast,
    /// Attempt every delete, then fail if any did.
    KeepGoing,
}

#[derive(Debug, Clone, Default)]
pub struct PruneOptions {
    pub keep: usize,
    pub policy: DeletePolicy,
    pub dry_run: bool,
    /// Print a JSON report on stdout; progress lines move to stderr.
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedDeletion {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PruneReport {
    pub kept: Vec<String>,
    /// With `dry_run`, the archives that would have been deleted.
    pub deleted: Vec<String>,
    pub failed: Vec<FailedDeletion>,
    pub dry_run: bool,
}

impl PruneReport {
    fn new(kept: &[Archive], dry_run: bool) -> Self {
        Self {
            kept: kept.iter().map(|a| a.name_lossy().into_owned()).collect(),
            deleted: Vec::new(),
            failed: Vec::new(),
            dry_run,
        }
    }

    pub fn ensure_complete(&self) -> Result<(), TsrError> {
        if self.failed.is_empty() {
            return Ok(());
        }
        Err(TsrError::PartialPrune {
            failed: self.failed.len(),
            attempted: self.failed.len() + self.deleted.len(),
        })
    }
}

/// Delete everything past the `keep` newest archives, oldest-but-`keep` first.
///
/// Progress lines go to `progress`; the caller decides what to do with the
/// returned report.
pub fn run(
    store: &impl ArchiveStore,
    archives: &[Archive],
    opts: &PruneOptions,
    progress: &mut impl Write,
) -> Result<PruneReport> {
    let (kept, doomed) = split_retained(archives, opts.keep);
    let mut report = PruneReport::new(kept, opts.dry_run);

    if doomed.is_empty() {
        writeln!(progress, "no archives to delete")?;
        return Ok(report);
    }

    for archive in doomed {
        let name = archive.name_lossy().into_owned();
        if opts.dry_run {
            archive.write_line(progress, "would delete: ")?;
            report.deleted.push(name);
            continue;
        }

        archive.write_line(progress, "deleting: ")?;
        progress.flush()?;
        match store.delete_archive(&archive.name_os()) {
            Ok(()) => report.deleted.push(name),
            Err(err) if opts.policy == DeletePolicy::FailFast => {
                return Err(err.context(format!("failed to delete {name}")));
            }
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(archive = %name, %error, "delete failed; continuing");
                report.failed.push(FailedDeletion { name, error });
            }
        }
    }

    Ok(report)
}
