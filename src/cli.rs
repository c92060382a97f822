//! CLI argument parsing for arithprof

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arithprof")]
#[command(version)]
#[command(about = "Classify and rank arithmetic instructions by function", long_about = None)]
pub struct Cli {
    /// Report output file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "arithmetic_profile.txt"
    )]
    pub output: PathBuf,

    /// Function name pattern to instrument (repeatable; exact or substring match)
    #[arg(short = 'f', long = "function", value_name = "NAME")]
    pub functions: Vec<String>,

    /// Verbose diagnostics to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Disable call hierarchy tracking (on by default)
    #[arg(long = "no-call-tracking")]
    pub no_call_tracking: bool,

    /// Include shared-library routines in the instrumentation
    #[arg(short = 'l', long = "include-libraries")]
    pub include_libraries: bool,

    /// Recorded instrumentation event stream to replay (JSON lines; - for stdin)
    #[arg(long = "trace", value_name = "FILE")]
    pub trace: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["arithprof", "--trace", "events.jsonl"]);
        assert_eq!(cli.output, PathBuf::from("arithmetic_profile.txt"));
        assert!(cli.functions.is_empty());
        assert!(!cli.verbose);
        assert!(!cli.no_call_tracking);
        assert!(!cli.include_libraries);
        assert_eq!(cli.trace, PathBuf::from("events.jsonl"));
    }

    #[test]
    fn test_cli_output_path() {
        let cli = Cli::parse_from(["arithprof", "-o", "report.txt", "--trace", "t.jsonl"]);
        assert_eq!(cli.output, PathBuf::from("report.txt"));
    }

    #[test]
    fn test_cli_repeatable_function_filter() {
        let cli = Cli::parse_from([
            "arithprof", "-f", "main", "-f", "calculate", "--trace", "t.jsonl",
        ]);
        assert_eq!(cli.functions, vec!["main", "calculate"]);
    }

    #[test]
    fn test_cli_toggles() {
        let cli = Cli::parse_from([
            "arithprof",
            "-v",
            "--no-call-tracking",
            "-l",
            "--trace",
            "t.jsonl",
        ]);
        assert!(cli.verbose);
        assert!(cli.no_call_tracking);
        assert!(cli.include_libraries);
    }

    #[test]
    fn test_cli_requires_trace() {
        assert!(Cli::try_parse_from(["arithprof"]).is_err());
    }
}
