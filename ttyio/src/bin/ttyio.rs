// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Small front end over [`r3bl_ttyio`], handy for trying the prompts from a shell
//! script. Answers go to stdout, prompts to the terminal.
//!
//! ```bash
//! ttyio ask "Name: "
//! ttyio passphrase            # prints the length only
//! ttyio confirm "Delete? " && echo deleted
//! ```

use clap::Parser;
use r3bl_ttyio::{TTY_FATAL_EXIT_CODE, TracingConfig, TtyConfig, TtyError, TtySession,
                 WriterConfig, setup_default_miette_global_report_handler,
                 try_initialize_logging};
use std::process::ExitCode;

use crate::clap_config::{CLIArg, CLICommand};

const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";

fn main() -> ExitCode {
    setup_default_miette_global_report_handler(ISSUES_URL);

    // If no args are passed, help is printed thanks to `arg_required_else_help(true)`.
    let cli_arg = CLIArg::parse();

    match run(cli_arg) {
        Ok(exit_code) => exit_code,
        Err(report) => {
            eprintln!("{report:?}");
            let code = report
                .downcast_ref::<TtyError>()
                .map_or(TTY_FATAL_EXIT_CODE, TtyError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
        }
    }
}

fn run(cli_arg: CLIArg) -> miette::Result<ExitCode> {
    let global = &cli_arg.global_options;

    let tracing_config = TracingConfig {
        writer_config: match &global.log_file {
            Some(path) => WriterConfig::File(path.clone()),
            None => WriterConfig::None,
        },
        level: global.log_level,
    };
    try_initialize_logging(tracing_config)?;
    // % is Display, ? is Debug.
    tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);

    let session = TtySession::new(
        TtyConfig::default()
            .batch(global.batch)
            .no_terminal(global.no_terminal)
            .tty_path(global.tty.clone()),
    );

    #[cfg(unix)]
    if !global.batch && !global.no_terminal {
        session.install_signal_cleanup()?;
    }

    let exit_code = match &cli_arg.command {
        CLICommand::Ask { prompt } => {
            let line = session.read_line(prompt)?;
            if line.is_eof() {
                ExitCode::FAILURE
            } else {
                println!("{}", line.to_string_lossy());
                ExitCode::SUCCESS
            }
        }
        CLICommand::Passphrase { prompt } => {
            let secret = session.read_hidden_line(prompt)?;
            // The newline typed by the user was not echoed.
            session.emit(format_args!("\n"))?;
            if secret.is_eof() {
                ExitCode::FAILURE
            } else {
                println!("{}", secret.len());
                ExitCode::SUCCESS
            }
        }
        CLICommand::Confirm { prompt } => {
            if session.ask_yes_no(prompt)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };

    tracing::debug!(message = "Stop logging...");
    Ok(exit_code)
}

mod clap_config {
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    /// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
    #[derive(Debug, Parser)]
    #[command(bin_name = "ttyio")]
    #[command(about = "Prompt on the controlling terminal, with or without echo")]
    #[command(version)]
    #[command(next_line_help = true)]
    #[command(arg_required_else_help(true))]
    pub struct CLIArg {
        #[command(subcommand)]
        pub command: CLICommand,

        #[command(flatten)]
        pub global_options: GlobalOption,
    }

    #[derive(Debug, Subcommand)]
    pub enum CLICommand {
        #[clap(about = "Read one line and print it to stdout")]
        Ask {
            #[arg(default_value = "> ")]
            prompt: String,
        },
        #[clap(about = "Read a line with echo off and print its length")]
        Passphrase {
            #[arg(default_value = "Passphrase: ")]
            prompt: String,
        },
        #[clap(about = "Ask a yes/no question, exit 0 for yes and 1 for anything else")]
        Confirm {
            #[arg(default_value = "Continue? (y/N) ")]
            prompt: String,
        },
    }

    #[derive(Debug, Args)]
    pub struct GlobalOption {
        #[arg(global = true, long, help = "Refuse all input, prompts go to stderr")]
        pub batch: bool,

        #[arg(global = true, long, help = "Write nothing to the terminal and refuse all input")]
        pub no_terminal: bool,

        #[arg(global = true, long, value_name = "PATH", help = "Terminal device to use instead of the controlling terminal")]
        pub tty: Option<PathBuf>,

        #[arg(global = true, long, value_name = "PATH", help = "Log diagnostics to this file")]
        pub log_file: Option<String>,

        #[arg(global = true, long, default_value = "info", help = "Log level: error, warn, info, debug or trace")]
        pub log_level: tracing::Level,
    }
}
