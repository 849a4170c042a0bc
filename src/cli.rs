//! Command-line parsing.
//!
//! Parsing never prints or exits. It yields a [`Command`] or an [`Error`],
//! and the binary decides what goes to stdout, stderr and the exit code.

use crate::config::DEFAULT_QUALITY;
use crate::error::{Error, Result};
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Name printed in the version line and used as `argv[0]` for clap.
pub const BIN_NAME: &str = "webpify";

/// Help text printed for `-h`/`--help` and after a missing input error.
pub const USAGE: &str = "
webpify - Convert images to WebP format

Usage: webpify <file> [options]

Options:
  -q, --quality <n>    Set quality (1-100, default: 80)
  -o, --output <path>  Output file path (default: same as input with .webp extension)
  -h, --help           Show this help message
  -v, --version        Show version

Examples:
  webpify image.png
  webpify image.jpg -q 90
  webpify image.png -o converted/image.webp
";

/// The `webpify vX.Y.Z` line.
pub fn version_line() -> String {
    format!("{} v{}", BIN_NAME, env!("CARGO_PKG_VERSION"))
}

/// Raw flags as clap sees them. Validation happens in [`parse_args`].
#[derive(Debug, Parser)]
#[command(
    name = "webpify",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Args {
    /// Input image file; anything after the first is ignored.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
    quality: Option<String>,

    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::SetTrue)]
    help: bool,

    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    version: bool,
}

/// A validated request to convert one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    input: PathBuf,
    quality: u8,
    output: Option<PathBuf>,
}

impl Invocation {
    /// Build an invocation, rejecting qualities outside `1..=100`.
    pub fn new(input: impl Into<PathBuf>, quality: u8, output: Option<PathBuf>) -> Result<Self> {
        if !(1..=100).contains(&quality) {
            return Err(Error::InvalidQuality(quality.to_string()));
        }
        Ok(Invocation {
            input: input.into(),
            quality,
            output,
        })
    }

    /// The input image path.
    pub fn input(&self) -> &std::path::Path {
        &self.input
    }

    /// Quality in `1..=100`.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Explicit output path, if one was given.
    pub fn output(&self) -> Option<&std::path::Path> {
        self.output.as_deref()
    }
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print [`USAGE`] and exit successfully.
    Help,
    /// Print [`version_line`] and exit successfully.
    Version,
    /// Convert one image.
    Convert(Invocation),
}

/// Parse process arguments, excluding the program name.
pub fn parse_args<I, T>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let argv = std::iter::once(OsString::from(BIN_NAME)).chain(args.iter().cloned());

    let parsed = match Args::try_parse_from(argv) {
        Ok(parsed) => parsed,
        Err(err) => {
            if requests_help(&args) {
                return Ok(Command::Help);
            }
            return Err(Error::Usage(clap_message(&err)));
        }
    };

    if parsed.help {
        return Ok(Command::Help);
    }

    if parsed.version {
        return Ok(Command::Version);
    }

    let mut files = parsed.files.into_iter();
    let input = files.next().ok_or(Error::MissingInput)?;
    let ignored = files.count();
    if ignored > 0 {
        log::debug!("ignoring {} extra positional argument(s)", ignored);
    }

    let raw_quality = parsed
        .quality
        .unwrap_or_else(|| DEFAULT_QUALITY.to_string());
    let quality = parse_quality(&raw_quality)?;

    Invocation::new(input, quality, parsed.output).map(Command::Convert)
}

/// Parse a quality value the way `parseInt(value, 10)` reads it: leading
/// whitespace, an optional sign, then the longest run of digits. Trailing
/// text is ignored. The result must lie in `1..=100`.
pub fn parse_quality(raw: &str) -> Result<u8> {
    let invalid = || Error::InvalidQuality(raw.to_string());

    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(invalid());
    }

    // Anything longer than this is out of range whatever the digits are.
    let digits_str = s[..digits].trim_start_matches('0');
    if digits_str.len() > 3 {
        return Err(invalid());
    }
    let value: u16 = if digits_str.is_empty() {
        0
    } else {
        digits_str.parse().map_err(|_| invalid())?
    };

    if negative || !(1..=100).contains(&value) {
        return Err(invalid());
    }

    Ok(value as u8)
}

fn requests_help(args: &[OsString]) -> bool {
    args.iter()
        .take_while(|arg| *arg != "--")
        .any(|arg| arg == "-h" || arg == "--help")
}

fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first
        .strip_prefix("error: ")
        .unwrap_or(first)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        parse_args(args.iter().copied())
    }

    fn invocation(args: &[&str]) -> Invocation {
        match parse(args) {
            Ok(Command::Convert(inv)) => inv,
            other => panic!("expected conversion for {:?}, got {:?}", args, other),
        }
    }

    #[test]
    fn test_defaults() {
        let inv = invocation(&["photo.png"]);
        assert_eq!(inv.input(), std::path::Path::new("photo.png"));
        assert_eq!(inv.quality(), 80);
        assert_eq!(inv.output(), None);
    }

    #[test]
    fn test_short_and_long_flags() {
        let inv = invocation(&["-q", "90", "-o", "out/x.webp", "in.jpg"]);
        assert_eq!(inv.quality(), 90);
        assert_eq!(inv.output(), Some(std::path::Path::new("out/x.webp")));

        let inv = invocation(&["in.jpg", "--quality", "35", "--output", "y.webp"]);
        assert_eq!(inv.quality(), 35);
        assert_eq!(inv.output(), Some(std::path::Path::new("y.webp")));

        let inv = invocation(&["in.jpg", "--quality=12"]);
        assert_eq!(inv.quality(), 12);
    }

    #[test]
    fn test_every_quality_in_range_is_accepted() {
        for q in 1..=100u8 {
            let inv = invocation(&["in.png", "-q", &q.to_string()]);
            assert_eq!(inv.quality(), q);
        }
    }

    #[test]
    fn test_out_of_range_and_garbage_quality_rejected() {
        for bad in ["0", "101", "-5", "abc", "", "1000", "99999999999999999999999"] {
            let err = parse(&["in.png", "-q", bad]).unwrap_err();
            assert!(
                matches!(err, Error::InvalidQuality(_)),
                "{:?} gave {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_quality_integer_prefix() {
        assert_eq!(parse_quality("50").unwrap(), 50);
        assert_eq!(parse_quality("  75").unwrap(), 75);
        assert_eq!(parse_quality("+42").unwrap(), 42);
        assert_eq!(parse_quality("007").unwrap(), 7);
        assert_eq!(parse_quality("85.9").unwrap(), 85);
        assert_eq!(parse_quality("60abc").unwrap(), 60);
        assert!(parse_quality("-0").is_err());
        assert!(parse_quality(" ").is_err());
        assert!(parse_quality("x50").is_err());
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["in.png", "-q", "0", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-v", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--bogus", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-h", "-q"]).unwrap(), Command::Help);
        assert!(matches!(parse(&["-q"]), Err(Error::Usage(_))));
    }

    #[test]
    fn test_version_before_validation() {
        assert_eq!(parse(&["-v"]).unwrap(), Command::Version);
        assert_eq!(parse(&["--version", "-q", "500"]).unwrap(), Command::Version);
        assert!(version_line().starts_with("webpify v"));
        assert!(version_line().ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(parse(&[]).unwrap_err(), Error::MissingInput);
        assert_eq!(parse(&["-q", "50"]).unwrap_err(), Error::MissingInput);
    }

    #[test]
    fn test_missing_input_reported_before_bad_quality() {
        assert_eq!(parse(&["-q", "abc"]).unwrap_err(), Error::MissingInput);
    }

    #[test]
    fn test_extra_positionals_ignored() {
        let inv = invocation(&["first.png", "second.png", "third.png"]);
        assert_eq!(inv.input(), std::path::Path::new("first.png"));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let inv = invocation(&["in.png", "-q", "10", "-q", "20"]);
        assert_eq!(inv.quality(), 20);
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        match parse(&["in.png", "--resize", "50"]).unwrap_err() {
            Error::Usage(msg) => assert!(msg.contains("--resize"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_flag_after_double_dash_is_positional() {
        let inv = invocation(&["--", "-h"]);
        assert_eq!(inv.input(), std::path::Path::new("-h"));
    }

    #[test]
    fn test_invocation_new_checks_range() {
        assert!(Invocation::new("a.png", 0, None).is_err());
        assert!(Invocation::new("a.png", 101, None).is_err());
        assert!(Invocation::new("a.png", 1, None).is_ok());
        assert!(Invocation::new("a.png", 100, None).is_ok());
    }
}
