use anyhow::Result;
use std::io::Write;

use crate::archives::Archive;
use crate::commands::write_json;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub json: bool,
}

pub fn run(archives: &[Archive], opts: &ListOptions, out: &mut impl Write) -> Result<()> {
    if opts.json {
        return write_json(out, &archives);
    }
    for archive in archives {
        archive.write_line(out, "")?;
    }
    Ok(())
}
