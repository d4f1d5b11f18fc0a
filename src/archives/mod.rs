pub mod listing;
pub mod retention;
pub mod rfc1123;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Archive {
    /// Full line as reported by `--list-archives`, byte for byte.
    #[serde(serialize_with = "serialize_lossy")]
    pub name: Vec<u8>,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub date: DateTime<FixedOffset>,
    /// Reserved; never set.
    pub partial: bool,
}

impl Archive {
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// The name as handed to `tarsnap -f`.
    pub fn name_os(&self) -> Cow<'_, OsStr> {
        os_str_from_bytes(&self.name)
    }

    /// Write `label` followed by the raw name and a newline.
    pub fn write_line(&self, out: &mut impl Write, label: &str) -> std::io::Result<()> {
        out.write_all(label.as_bytes())?;
        out.write_all(&self.name)?;
        out.write_all(b"\n")
    }
}

#[cfg(unix)]
fn os_str_from_bytes(bytes: &[u8]) -> Cow<'_, OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn os_str_from_bytes(bytes: &[u8]) -> Cow<'_, OsStr> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => Cow::Borrowed(OsStr::new(s)),
        Cow::Owned(s) => Cow::Owned(s.into()),
    }
}

fn serialize_lossy<S: Serializer>(name: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(name))
}

fn serialize_rfc3339<S: Serializer>(
    date: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339())
}

/// Where archives come from and go to. `Tarsnap` is the real one.
pub trait ArchiveStore {
    fn list_archives(&self) -> Result<Vec<u8>>;
    fn delete_archive(&self, name: &OsStr) -> Result<()>;
}

/// Fetch the listing and return the archives under `prefix`, newest first.
pub fn list(store: &impl ArchiveStore, prefix: &str) -> Result<Vec<Archive>> {
    let raw = store.list_archives()?;
    let mut archives = listing::parse_listing(&raw, prefix)?;
    sort_newest_first(&mut archives);
    tracing::debug!(prefix, count = archives.len(), "archives matched");
    Ok(archives)
}

pub fn sort_newest_first(archives: &mut [Archive]) {
    archives.sort_by(|a, b| b.date.cmp(&a.date));
}
