use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "seqpatch",
    about = "Line-oriented diff and patch built on a Myers edit path search",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with default options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two files line by line
    Diff(DiffArgs),
    /// Apply a JSON patch to a file
    Apply(ApplyArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub original: PathBuf,
    pub revised: PathBuf,
    /// Treat lines that differ only in whitespace as equal
    #[arg(short = 'w', long)]
    pub ignore_whitespace: bool,
    /// Abort the comparison after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args)]
pub struct ApplyArgs {
    pub input: PathBuf,
    pub patch: PathBuf,
    /// Undo the patch instead of applying it
    #[arg(short = 'R', long)]
    pub reverse: bool,
    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["seqpatch", "diff", "a.txt", "b.txt"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.original, PathBuf::from("a.txt"));
            assert_eq!(args.revised, PathBuf::from("b.txt"));
            assert!(!args.ignore_whitespace);
            assert!(args.timeout_ms.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff_options() {
        let cli = Cli::try_parse_from(["seqpatch", "diff", "-w", "--timeout-ms", "500", "a", "b"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert!(args.ignore_whitespace);
            assert_eq!(args.timeout_ms, Some(500));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_apply_reverse() {
        let cli = Cli::try_parse_from(["seqpatch", "apply", "-R", "new.txt", "p.json", "-o", "old.txt"]).unwrap();
        if let Command::Apply(args) = cli.command {
            assert!(args.reverse);
            assert_eq!(args.patch, PathBuf::from("p.json"));
            assert_eq!(args.output, Some(PathBuf::from("old.txt")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["seqpatch", "--format", "json", "diff", "a", "b"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_globals_after_subcommand() {
        let cli = Cli::try_parse_from(["seqpatch", "diff", "a", "b", "--verbose", "--no-color", "--config", "sp.toml"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("sp.toml")));
    }

    #[test]
    fn missing_operand_is_an_error() {
        assert!(Cli::try_parse_from(["seqpatch", "diff", "a"]).is_err());
    }
}
