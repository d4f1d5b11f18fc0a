use anyhow::Result;
use std::io::Write;

use crate::archives::rfc1123;

pub fn run(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", rfc1123::now_local())?;
    Ok(())
}
