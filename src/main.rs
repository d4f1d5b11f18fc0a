mod archives;
mod cli;
mod commands;
mod error;
mod logging;
mod tarsnap;

fn main() {
    if let Err(err) = cli::run() {
        if let Some(tsr_err) = err.downcast_ref::<error::TsrError>() {
            tracing::debug!(kind = tsr_err.kind(), "tsr failed");
        }
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
