pub mod list;
pub mod prune;
pub mod time;

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

pub fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
