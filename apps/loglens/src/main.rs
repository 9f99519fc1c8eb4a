//! loglens CLI binary entry point.
//! Resolves configuration, runs one submission and prints the result.

use clap::Parser;
use loglens::cli::{Cli, Commands, CommonOpts};
use loglens::config::{self, CliOverrides, Effective};
use loglens::error::SubmissionError;
use loglens::output;
use loglens::render;
use loglens::submit::{AnalysisKind, AnalysisSubmitter, HttpTransport, Outcome};
use loglens::utils::{error_prefix, info_prefix, note_prefix};
use std::io::{self, IsTerminal, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Logs {
            common,
            file,
            text,
            max_lines,
        } => {
            let eff = resolve_or_exit(&common, max_lines);
            let mut submitter = submitter_or_exit(&eff);
            match file {
                Some(path) => submitter.select_file(path),
                None => submitter.set_text(text.unwrap_or_else(read_stdin_or_exit)),
            }
            match submitter.submit(AnalysisKind::Logs) {
                Ok(Outcome::Logs(result)) => {
                    let report = render::log_report(result, eff.max_lines);
                    output::print_log_report(result, &report, eff.output);
                }
                Ok(Outcome::Grammar(_)) => unexpected_outcome(),
                Err(e) => fail(&e, &eff),
            }
        }
        Commands::Grammar { common, text } => {
            let eff = resolve_or_exit(&common, None);
            let mut submitter = submitter_or_exit(&eff);
            submitter.set_text(text.unwrap_or_else(read_stdin_or_exit));
            match submitter.submit(AnalysisKind::Grammar) {
                Ok(Outcome::Grammar(result)) => {
                    let view = render::grammar(Some(result));
                    output::print_grammar(result, &view, eff.output);
                }
                Ok(Outcome::Logs(_)) => unexpected_outcome(),
                Err(e) => fail(&e, &eff),
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("loglens={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn resolve_or_exit(common: &CommonOpts, max_lines: Option<usize>) -> Effective {
    let eff = config::resolve_effective(&CliOverrides {
        root: common.root.as_deref(),
        server: common.server.as_deref(),
        output: common.output.as_deref(),
        max_lines,
    })
    .unwrap_or_else(|e| {
        eprintln!("{} {}", error_prefix(), e);
        std::process::exit(2);
    });
    match &eff.config_file {
        Some(p) => debug!(root = %eff.root.display(), path = %p.display(), "loaded config"),
        None => debug!(root = %eff.root.display(), "no loglens.toml found; using defaults"),
    }
    eff
}

fn submitter_or_exit(eff: &Effective) -> AnalysisSubmitter<HttpTransport> {
    let transport = HttpTransport::new(&eff.client).unwrap_or_else(|e| {
        eprintln!("{} {}", error_prefix(), e);
        std::process::exit(2);
    });
    AnalysisSubmitter::new(eff.client.clone(), transport)
}

fn read_stdin_or_exit() -> String {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("{} Reading from stdin; finish with Ctrl-D.", info_prefix());
    }
    let mut buf = String::new();
    if let Err(e) = stdin.read_to_string(&mut buf) {
        eprintln!("{} could not read stdin: {}", error_prefix(), e);
        std::process::exit(2);
    }
    buf
}

fn fail(err: &SubmissionError, eff: &Effective) -> ! {
    output::print_failure(err, eff.output);
    if matches!(err, SubmissionError::Transport(_)) {
        eprintln!("{} server: {}", note_prefix(), eff.client.base_url);
    }
    std::process::exit(err.exit_code());
}

fn unexpected_outcome() -> ! {
    eprintln!("{} response did not match the requested analysis", error_prefix());
    std::process::exit(1);
}
