// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Configures how [`miette`] prints a fatal [`crate::TtyError`] when the host binary
//! returns it from `main()`.
//!
//! The hook is lazy: the width of the standard error stream is only measured when a
//! report is actually rendered.

use miette::MietteHandlerOpts;
use tracing::debug;

const DEFAULT_REPORT_WIDTH: usize = 80;

/// Install the global [`miette::ErrorHook`]. Safe to call more than once, only the first
/// call wins.
pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(move |_report| {
        let terminal_width = {
            let it = get_stderr_width().unwrap_or(DEFAULT_REPORT_WIDTH);
            debug!("miette::set_hook -> terminal_width: {}", it);
            it
        };
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .unicode(true)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }))
    .ok();
}

#[cfg(unix)]
fn get_stderr_width() -> Option<usize> {
    rustix::termios::tcgetwinsize(std::io::stderr())
        .ok()
        .map(|winsize| usize::from(winsize.ws_col))
        .filter(|&it| it > 0)
}

#[cfg(not(unix))]
fn get_stderr_width() -> Option<usize> { None }
