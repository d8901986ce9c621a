//! Command-line flags.

/// Parsed command-line flags.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    /// Log level forced by `-v` flags; `None` keeps the configured level.
    pub log_level: Option<&'static str>,
    /// `-f/--config` path.
    pub config_path: Option<String>,
    pub help: bool,
}

pub const USAGE: &str = "\
Usage: bca-expert [OPTIONS]

Options:
  -h, --help                 Print help
  -f, --config <PATH>        Path to configuration file (default: config/default.toml)
  -v, -vv, -vvv, -vvvv       Increase logging verbosity";

/// Parse flags from an argument iterator (program name already skipped).
pub fn parse<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut verbosity = 0u8;
    let mut out = CliArgs::default();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }
        match arg.as_str() {
            "-h" | "--help" => out.help = true,
            "-f" | "--config" => match iter.next() {
                Some(path) => out.config_path = Some(path),
                None => return Err("-f/--config requires a path argument".to_string()),
            },
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.len() > 1 && a.starts_with('-') && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    //   -v → warn, -vv → info, -vvv → debug, -vvvv+ → trace
    out.log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };
    Ok(out)
}
