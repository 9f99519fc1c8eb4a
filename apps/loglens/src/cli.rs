//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "loglens",
    version,
    about = "Security log and grammar analysis client",
    long_about = "loglens — send a server log or a prose fragment to the analysis service and render its lexical, syntactic and semantic findings.\n\nConfiguration precedence: CLI > loglens.toml > defaults.",
    after_help = "Examples:\n  loglens logs --file /var/log/auth.log\n  journalctl -u ssh | loglens logs\n  loglens logs --text 'Oct 11 22:14:15 srv sshd[4721]: Failed password for root from 1.2.3.4' --output json\n  loglens grammar --text 'la perro corre'",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Options shared by every analysis command.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonOpts {
    #[arg(long, help = "Directory to start config discovery from (default: current dir)")]
    pub root: Option<String>,
    #[arg(long, help = "Analysis service base URL (default: http://localhost:8080)")]
    pub server: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current loglens version."
    )]
    Version,
    /// Analyze a server log
    #[command(
        about = "Analyze a server log",
        long_about = "Send a log file (multipart) or log text (text/plain) to the service. Without --file or --text the log is read from stdin.",
        after_help = "Examples:\n  loglens logs --file auth.log\n  loglens logs --file auth.log --max-lines 200"
    )]
    Logs {
        #[command(flatten)]
        common: CommonOpts,
        #[arg(long, conflicts_with = "text", help = "Log file to upload")]
        file: Option<String>,
        #[arg(long, help = "Log text to analyze")]
        text: Option<String>,
        #[arg(long, help = "Lexical lines shown in the token table (default: 50)")]
        max_lines: Option<usize>,
    },
    /// Check a prose fragment
    #[command(
        about = "Check grammar of a text",
        long_about = "Send Spanish prose to the grammar analyzer. Without --text the fragment is read from stdin.",
        after_help = "Examples:\n  loglens grammar --text 'hola mundo. la perro corre.'\n  cat nota.txt | loglens grammar --output json"
    )]
    Grammar {
        #[command(flatten)]
        common: CommonOpts,
        #[arg(long, help = "Text to check")]
        text: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_file_and_text_conflict() {
        let r = Cli::try_parse_from(["loglens", "logs", "--file", "a.log", "--text", "x"]);
        assert!(r.is_err());
    }

    #[test]
    fn test_logs_options_parse() {
        let cli = Cli::try_parse_from([
            "loglens", "-vv", "logs", "--file", "a.log", "--server", "http://h:1", "--max-lines", "5",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.cmd {
            Commands::Logs {
                common,
                file,
                text,
                max_lines,
            } => {
                assert_eq!(file.as_deref(), Some("a.log"));
                assert!(text.is_none());
                assert_eq!(max_lines, Some(5));
                assert_eq!(common.server.as_deref(), Some("http://h:1"));
            }
            _ => panic!("expected logs"),
        }
    }

    #[test]
    fn test_grammar_reads_stdin_when_text_missing() {
        let cli = Cli::try_parse_from(["loglens", "grammar", "--output", "json"]).unwrap();
        match cli.cmd {
            Commands::Grammar { common, text } => {
                assert!(text.is_none());
                assert_eq!(common.output.as_deref(), Some("json"));
            }
            _ => panic!("expected grammar"),
        }
    }
}
