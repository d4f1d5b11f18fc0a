use anyhow::{Context, Result};
use regex::bytes::Regex;

use crate::archives::{Archive, rfc1123};
use crate::error::TsrError;

/// Matches `<prefix>...(<timestamp>)` anywhere in a line.
///
/// The prefix is literal. Anything but `(` may sit between it and the
/// timestamp, and bytes outside the prefix need not be UTF-8.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    pattern: Regex,
}

impl PrefixMatcher {
    pub fn new(prefix: &str) -> Result<Self> {
        let source = format!(r"{}(?-u:[^(]*)\(((?-u:.*))\)", regex::escape(prefix));
        let pattern = Regex::new(&source)
            .with_context(|| format!("failed to compile archive pattern for prefix {prefix:?}"))?;
        Ok(Self { pattern })
    }

    pub fn timestamp<'a>(&self, line: &'a [u8]) -> Option<&'a [u8]> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_bytes())
    }
}

fn unparseable(line: &[u8], reason: String) -> TsrError {
    TsrError::Unparseable {
        line: String::from_utf8_lossy(line).into_owned(),
        reason,
    }
}

/// Turn raw `--list-archives` output into records, in listing order.
///
/// A matching line whose timestamp does not parse fails the whole listing.
pub fn parse_listing(raw: &[u8], prefix: &str) -> Result<Vec<Archive>> {
    let matcher = PrefixMatcher::new(prefix)?;
    let mut archives = Vec::new();
    for line in raw.split(|b| *b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let Some(stamp) = matcher.timestamp(line) else {
            continue;
        };
        let stamp = std::str::from_utf8(stamp)
            .map_err(|err| unparseable(line, format!("timestamp is not UTF-8: {err}")))?;
        let date = rfc1123::parse(stamp).map_err(|err| unparseable(line, format!("{err:#}")))?;
        archives.push(Archive {
            name: line.to_vec(),
            date,
            partial: false,
        });
    }
    Ok(archives)
}
