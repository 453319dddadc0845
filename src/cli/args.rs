/// CLI argument definitions via clap derive.
use clap::{Args, Parser, Subcommand, ValueEnum};

/// tagctl — look up tag metadata on a remote tagging service.
#[derive(Debug, Parser)]
#[command(
    name = "tagctl",
    about = "Look up tag metadata on a vCenter tagging service",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output format. `auto` renders the aligned text report.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    /// Omit table headers (only affects --output table).
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Print per-phase timing to stderr for debugging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings for the tagging service.
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Service URL: `https://host`, `host`, or `user:pass@host`.
    #[arg(long, global = true, env = "TAGCTL_URL", value_name = "URL")]
    pub url: Option<String>,

    /// Username. Overrides any user embedded in --url.
    #[arg(long, global = true, env = "TAGCTL_USERNAME", value_name = "USER")]
    pub username: Option<String>,

    /// Password. Overrides any password embedded in --url.
    #[arg(
        long,
        global = true,
        env = "TAGCTL_PASSWORD",
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Skip TLS certificate verification.
    #[arg(long, global = true, env = "TAGCTL_INSECURE")]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[arg(
        long,
        global = true,
        env = "TAGCTL_TIMEOUT",
        value_name = "SECS",
        default_value_t = 30
    )]
    pub timeout: u64,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Same as `text`.
    #[default]
    Auto,
    /// Aligned `Name:` / `ID:` report blocks, one per tag.
    Text,
    /// Bordered grid with one row per tag.
    Table,
    /// JSON array (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
    /// Tag ID only, one per line.
    Id,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get tag info by tag ID, or by tag name and category ID.
    #[command(
        override_usage = "tagctl info [OPTIONS] TAGNAME CATEGORYID\n       tagctl info [OPTIONS] -i TAGID",
        after_help = "Examples:\n  tagctl info -i TAGID\n  tagctl info TAGNAME CATEGORYID"
    )]
    Info(InfoArgs),
}

/// Arguments for `tagctl info`.
#[derive(Debug, Parser)]
pub struct InfoArgs {
    /// Treat the single positional argument as a tag ID.
    #[arg(short = 'i', long = "id")]
    pub by_id: bool,

    /// `TAGID` with -i, otherwise `TAGNAME CATEGORYID`.
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_id() {
        let cli = Cli::try_parse_from(["tagctl", "info", "-i", "urn:tag:1"]).unwrap();
        let Command::Info(args) = cli.command;
        assert!(args.by_id);
        assert_eq!(args.args, vec!["urn:tag:1".to_owned()]);
    }

    #[test]
    fn test_parse_keeps_extra_positionals() {
        // The argument count is validated by the lookup layer, not clap.
        let cli = Cli::try_parse_from(["tagctl", "info", "env", "cat-1", "extra"]).unwrap();
        let Command::Info(args) = cli.command;
        assert!(!args.by_id);
        assert_eq!(args.args.len(), 3);
    }

    #[test]
    fn test_json_conflicts_with_output() {
        let result = Cli::try_parse_from(["tagctl", "--json", "--output", "table", "info", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_connection_flags() {
        let cli = Cli::try_parse_from([
            "tagctl",
            "--url",
            "vc.example.com",
            "--insecure",
            "--timeout",
            "5",
            "info",
            "-i",
            "urn:tag:1",
        ])
        .unwrap();
        assert_eq!(cli.connection.url.as_deref(), Some("vc.example.com"));
        assert!(cli.connection.insecure);
        assert_eq!(cli.connection.timeout, 5);
    }
}
