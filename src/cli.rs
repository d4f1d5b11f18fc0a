use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};

use crate::archives;
use crate::commands;
use crate::commands::list::ListOptions;
use crate::commands::prune::{DeletePolicy, PruneOptions};
use crate::logging;
use crate::tarsnap::Tarsnap;
use crate::tarsnap::paths::resolve_paths;

const USAGE_HINT: &str = "Provide a archive prefix to list/delete";

/// Long flags that may also be spelled with a single dash (`-number=5`).
const SINGLE_DASH_LONG_FLAGS: &[&str] = &[
    "time",
    "number",
    "delete",
    "configfile",
    "dry-run",
    "keep-going",
    "json",
    "verbose",
    "help",
    "version",
];

#[derive(Debug, Parser)]
#[command(
    name = "tsr",
    version,
    about = "List tarsnap archives by prefix and prune all but the most recent"
)]
struct Cli {
    /// Just print the current time in RFC 1123 format and exit
    #[arg(long)]
    time: bool,

    /// Number of archives to keep
    #[arg(long, value_name = "N", default_value_t = 3)]
    number: usize,

    /// Keep the `number` newest archives, delete the rest
    #[arg(long)]
    delete: bool,

    /// Location of tarsnaprc [env: TSR_CONFIGFILE] [default: ~/.tarsnaprc]
    #[arg(long, value_name = "PATH")]
    configfile: Option<String>,

    /// With --delete, print what would be deleted and delete nothing
    #[arg(long)]
    dry_run: bool,

    /// With --delete, continue past failed deletions and fail at the end
    #[arg(long)]
    keep_going: bool,

    /// Print JSON instead of plain lines
    #[arg(long)]
    json: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Archive prefix
    #[arg(value_name = "PREFIX")]
    prefix: Vec<String>,
}

#[derive(Debug, Clone)]
enum Mode {
    List(ListOptions),
    Prune(PruneOptions),
}

/// Everything one invocation needs, fixed after argument parsing.
#[derive(Debug, Clone)]
struct Settings {
    prefix: String,
    configfile: Option<String>,
    mode: Mode,
}

impl Settings {
    /// `None` unless exactly one prefix was given.
    fn from_cli(cli: Cli) -> Option<Self> {
        let [prefix] = <[String; 1]>::try_from(cli.prefix).ok()?;
        let mode = if cli.delete {
            Mode::Prune(PruneOptions {
                keep: cli.number,
                policy: if cli.keep_going {
                    DeletePolicy::KeepGoing
                } else {
                    DeletePolicy::FailFast
                },
                dry_run: cli.dry_run,
                json: cli.json,
            })
        } else {
            Mode::List(ListOptions { json: cli.json })
        };
        Some(Self {
            prefix,
            configfile: cli.configfile,
            mode,
        })
    }
}

fn single_dash_long(arg: &str) -> Option<String> {
    let rest = arg.strip_prefix('-')?;
    if rest.starts_with('-') {
        return None;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    SINGLE_DASH_LONG_FLAGS
        .contains(&name)
        .then(|| format!("-{arg}"))
}

/// Rewrite `-flag` into `--flag` so either spelling reaches clap.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut out = Vec::new();
    let mut verbatim = false;
    for (idx, arg) in args.into_iter().enumerate() {
        if idx == 0 || verbatim {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            verbatim = true;
            out.push(arg);
            continue;
        }
        match arg.to_str().and_then(single_dash_long) {
            Some(rewritten) => out.push(OsString::from(rewritten)),
            None => out.push(arg),
        }
    }
    out
}

fn print_usage() -> Result<()> {
    println!("{USAGE_HINT}");
    let help = Cli::command().render_help();
    let mut stderr = io::stderr().lock();
    write!(stderr, "{help}")?;
    Ok(())
}

fn execute(settings: &Settings) -> Result<()> {
    let paths = resolve_paths(settings.configfile.clone())?;
    let tarsnap = Tarsnap::new(paths.bin, paths.configfile);
    tracing::debug!(bin = %tarsnap.bin().display(), prefix = %settings.prefix, "listing archives");

    let archives = archives::list(&tarsnap, &settings.prefix)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &settings.mode {
        Mode::List(opts) => commands::list::run(&archives, opts, &mut out),
        Mode::Prune(opts) if opts.json => {
            let report =
                commands::prune::run(&tarsnap, &archives, opts, &mut io::stderr().lock())?;
            commands::write_json(&mut out, &report)?;
            report.ensure_complete()?;
            Ok(())
        }
        Mode::Prune(opts) => {
            let report = commands::prune::run(&tarsnap, &archives, opts, &mut out)?;
            report.ensure_complete()?;
            Ok(())
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(env::args_os()));
    logging::init(cli.verbose);

    if cli.time {
        return commands::time::run(&mut io::stdout().lock());
    }

    let Some(settings) = Settings::from_cli(cli) else {
        return print_usage();
    };
    execute(&settings)
}

#[cfg(test)]
mod tests {
    use super::{Cli, Mode, Settings, normalize_args, single_dash_long};
    use crate::commands::prune::DeletePolicy;
    use clap::Parser;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("tsr")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::try_parse_from(normalize_args(argv)).expect("parse")
    }

    #[test]
    fn single_dash_long_flags_are_rewritten() {
        assert_eq!(single_dash_long("-time").as_deref(), Some("--time"));
        assert_eq!(single_dash_long("-number=5").as_deref(), Some("--number=5"));
        assert_eq!(single_dash_long("--delete"), None);
        assert_eq!(single_dash_long("-v"), None);
        assert_eq!(single_dash_long("-unknown"), None);
        assert_eq!(single_dash_long("web-"), None);
    }

    #[test]
    fn go_style_invocation_parses() {
        let cli = parse(&["-number", "5", "-delete", "-configfile", "/etc/ts.rc", "web-"]);
        assert_eq!(cli.number, 5);
        assert!(cli.delete);
        assert_eq!(cli.configfile.as_deref(), Some("/etc/ts.rc"));
        assert_eq!(cli.prefix, ["web-"]);
    }

    #[test]
    fn arguments_after_double_dash_are_untouched() {
        let cli = parse(&["--", "-time"]);
        assert!(!cli.time);
        assert_eq!(cli.prefix, ["-time"]);
    }

    #[test]
    fn defaults_to_list_mode_keeping_three() {
        let settings = Settings::from_cli(parse(&["web-"])).expect("settings");
        assert_eq!(settings.prefix, "web-");
        assert!(matches!(settings.mode, Mode::List(_)));

        let settings = Settings::from_cli(parse(&["-delete", "web-"])).expect("settings");
        match settings.mode {
            Mode::Prune(opts) => {
                assert_eq!(opts.keep, 3);
                assert_eq!(opts.policy, DeletePolicy::FailFast);
                assert!(!opts.dry_run);
            }
            Mode::List(_) => panic!("expected prune mode"),
        }
    }

    #[test]
    fn keep_going_selects_best_effort_policy() {
        let settings =
            Settings::from_cli(parse(&["--delete", "--keep-going", "web-"])).expect("settings");
        assert!(matches!(
            settings.mode,
            Mode::Prune(ref opts) if opts.policy == DeletePolicy::KeepGoing
        ));
    }

    #[test]
    fn json_flag_follows_the_selected_mode() {
        let settings = Settings::from_cli(parse(&["--json", "web-"])).expect("settings");
        assert!(matches!(settings.mode, Mode::List(ref opts) if opts.json));

        let settings =
            Settings::from_cli(parse(&["--delete", "--json", "web-"])).expect("settings");
        assert!(matches!(settings.mode, Mode::Prune(ref opts) if opts.json));

        let settings = Settings::from_cli(parse(&["--delete", "web-"])).expect("settings");
        assert!(matches!(settings.mode, Mode::Prune(ref opts) if !opts.json));
    }

    #[test]
    fn wrong_prefix_count_yields_no_settings() {
        assert!(Settings::from_cli(parse(&[])).is_none());
        assert!(Settings::from_cli(parse(&["a", "b"])).is_none());
    }

    #[test]
    fn negative_number_is_rejected() {
        let argv = ["tsr", "-number", "-1", "web-"].map(OsString::from);
        assert!(Cli::try_parse_from(normalize_args(argv)).is_err());
    }
}
