use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::TsrError;

const DEFAULT_CONFIGFILE: &str = "~/.tarsnaprc";

#[derive(Debug, Clone)]
pub struct TarsnapPaths {
    pub bin: PathBuf,
    pub configfile: String,
}

fn env_nonempty(var: &str) -> Option<String> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

fn default_configfile(home_dir: Option<PathBuf>) -> String {
    match home_dir {
        Some(home) => home.join(".tarsnaprc").to_string_lossy().into_owned(),
        None => DEFAULT_CONFIGFILE.to_string(),
    }
}

fn resolve_configfile(flag: Option<String>) -> String {
    flag.or_else(|| env_nonempty("TSR_CONFIGFILE"))
        .unwrap_or_else(|| default_configfile(dirs::home_dir()))
}

fn resolve_tarsnap_bin(custom: Option<&Path>) -> Result<PathBuf, TsrError> {
    if let Some(custom) = custom {
        if custom.exists() {
            return Ok(custom.to_path_buf());
        }
        tracing::warn!(
            bin = %custom.display(),
            "TSR_TARSNAP_BIN does not exist; falling back to PATH"
        );
    }
    which::which("tarsnap").map_err(|err| TsrError::ToolUnavailable {
        bin: custom
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("tarsnap")),
        reason: format!("not found in TSR_TARSNAP_BIN or PATH ({err})"),
    })
}

pub fn resolve_paths(configfile_flag: Option<String>) -> Result<TarsnapPaths> {
    let custom_bin = env_nonempty("TSR_TARSNAP_BIN").map(PathBuf::from);
    let bin = resolve_tarsnap_bin(custom_bin.as_deref())?;
    let configfile = resolve_configfile(configfile_flag);
    Ok(TarsnapPaths { bin, configfile })
}
