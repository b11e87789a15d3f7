#![forbid(unsafe_code)]

//! Command-line argument parsing for the ZIP demo.
//!
//! Parses args manually with `ZIP_DEMO_*` environment overrides. Explicit
//! flags win over the environment.

use std::env;
use std::path::PathBuf;
use std::process;

use crate::route::Route;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
ZIP Demo: zero-fee tips for the social web, with a guided product tour

USAGE:
    zip-demo [OPTIONS]

OPTIONS:
    --page=PAGE          Start page: landing (default), dashboard, profile
    --state-file=PATH    Where the tour remembers it was seen
                         (default: $XDG_STATE_HOME/zip/state.json)
    --memory-state       Keep tour state in memory only
    --reset-tour         Forget that the tour was seen before starting
    --no-auto-start      Never start the tour automatically
    --no-mouse           Disable mouse capture
    --log-file=PATH      Write logs to PATH (filter with ZIP_LOG)
    --exit-after-ms=N    Quit after N milliseconds (for testing)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Enter / Right   Next tour step (Enter also starts the tour on the landing page)
    Left            Previous tour step
    Esc             Close the tour
    t               Show the tutorial again
    Tab / f         Switch dashboard view / time filter
    p / d           Go to profile / dashboard
    Backspace       Back
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    ZIP_DEMO_PAGE             Default for --page
    ZIP_DEMO_STATE_FILE       Default for --state-file
    ZIP_DEMO_NO_AUTO_START    Set to 1 to disable auto-start
    ZIP_DEMO_EXIT_AFTER_MS    Default for --exit-after-ms
    ZIP_DEMO_LOG              Default for --log-file
    ZIP_LOG                   Log filter directives (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub start: Route,
    pub state_file: Option<PathBuf>,
    pub memory_state: bool,
    pub reset_tour: bool,
    pub auto_start: bool,
    pub mouse: bool,
    pub log_file: Option<PathBuf>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            start: Route::Landing,
            state_file: None,
            memory_state: false,
            reset_tour: false,
            auto_start: true,
            mouse: true,
            log_file: None,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

fn truthy(value: &str) -> bool {
    !matches!(value.trim(), "" | "0" | "false" | "no")
}

impl Opts {
    /// Parse the process arguments and environment, printing help, version,
    /// or usage errors and exiting where appropriate.
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::parse_from(|key| env::var(key).ok(), args) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("zip-demo {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from an explicit environment lookup and argument list.
    pub fn parse_from<E, I>(env: E, args: I) -> Result<Command, String>
    where
        E: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut opts = Self::default();

        if let Some(val) = env("ZIP_DEMO_PAGE")
            && let Some(route) = Route::from_name(&val)
        {
            opts.start = route;
        }
        if let Some(val) = env("ZIP_DEMO_STATE_FILE")
            && !val.is_empty()
        {
            opts.state_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env("ZIP_DEMO_NO_AUTO_START")
            && truthy(&val)
        {
            opts.auto_start = false;
        }
        if let Some(val) = env("ZIP_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = env("ZIP_DEMO_LOG")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--memory-state" => opts.memory_state = true,
                "--reset-tour" => opts.reset_tour = true,
                "--no-auto-start" => opts.auto_start = false,
                "--no-mouse" => opts.mouse = false,
                other => {
                    if let Some(val) = other.strip_prefix("--page=") {
                        opts.start = Route::from_name(val)
                            .ok_or_else(|| format!("Invalid --page value: {val}"))?;
                    } else if let Some(val) = other.strip_prefix("--state-file=") {
                        opts.state_file = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip_tour::page::Page;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(env: impl Fn(&str) -> Option<String>, list: &[&str]) -> Opts {
        match Opts::parse_from(env, args(list)) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = run(no_env, &[]);
        assert_eq!(opts, Opts::default());
        assert_eq!(opts.start, Route::Landing);
        assert!(opts.auto_start);
        assert!(opts.mouse);
        assert_eq!(opts.exit_after_ms, 0);
    }

    #[test]
    fn flags() {
        let opts = run(
            no_env,
            &[
                "--page=profile",
                "--state-file=/tmp/zip.json",
                "--memory-state",
                "--reset-tour",
                "--no-auto-start",
                "--no-mouse",
                "--log-file=zip.log",
                "--exit-after-ms=250",
            ],
        );
        assert_eq!(opts.start, Route::Tour(Page::Profile));
        assert_eq!(opts.state_file, Some(PathBuf::from("/tmp/zip.json")));
        assert!(opts.memory_state && opts.reset_tour);
        assert!(!opts.auto_start && !opts.mouse);
        assert_eq!(opts.log_file, Some(PathBuf::from("zip.log")));
        assert_eq!(opts.exit_after_ms, 250);
    }

    #[test]
    fn env_overrides_and_flag_precedence() {
        let env = |key: &str| match key {
            "ZIP_DEMO_PAGE" => Some("dashboard".to_string()),
            "ZIP_DEMO_NO_AUTO_START" => Some("1".to_string()),
            "ZIP_DEMO_EXIT_AFTER_MS" => Some("900".to_string()),
            _ => None,
        };
        let opts = run(env, &[]);
        assert_eq!(opts.start, Route::Tour(Page::Dashboard));
        assert!(!opts.auto_start);
        assert_eq!(opts.exit_after_ms, 900);

        let opts = run(env, &["--page=landing", "--exit-after-ms=5"]);
        assert_eq!(opts.start, Route::Landing);
        assert_eq!(opts.exit_after_ms, 5);
    }

    #[test]
    fn falsy_env_keeps_auto_start() {
        let env = |key: &str| (key == "ZIP_DEMO_NO_AUTO_START").then(|| "0".to_string());
        assert!(run(env, &[]).auto_start);
    }

    #[test]
    fn help_and_version() {
        assert_eq!(Opts::parse_from(no_env, args(&["-h"])), Ok(Command::Help));
        assert_eq!(
            Opts::parse_from(no_env, args(&["--no-mouse", "--version"])),
            Ok(Command::Version)
        );
    }

    #[test]
    fn errors() {
        assert_eq!(
            Opts::parse_from(no_env, args(&["--page=settings"])),
            Err("Invalid --page value: settings".to_string())
        );
        assert!(Opts::parse_from(no_env, args(&["--exit-after-ms=soon"])).is_err());
        assert_eq!(
            Opts::parse_from(no_env, args(&["--bogus"])),
            Err("Unknown argument: --bogus".to_string())
        );
    }

    #[test]
    fn help_text_mentions_every_env_var() {
        for var in [
            "ZIP_DEMO_PAGE",
            "ZIP_DEMO_STATE_FILE",
            "ZIP_DEMO_NO_AUTO_START",
            "ZIP_DEMO_EXIT_AFTER_MS",
            "ZIP_DEMO_LOG",
            "ZIP_LOG",
        ] {
            assert!(HELP_TEXT.contains(var), "{var}");
        }
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
