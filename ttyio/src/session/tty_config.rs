// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Startup configuration of a [`crate::TtySession`], usually filled in from CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TtyConfig {
    /// Refuse every interactive read. Prompts still go to stderr.
    pub batch: bool,
    /// Suppress all console output and refuse every read.
    pub no_terminal: bool,
    /// Use this device instead of the controlling terminal.
    pub tty_path: Option<PathBuf>,
}

impl TtyConfig {
    #[must_use]
    pub fn batch(mut self, batch: bool) -> Self {
        self.batch = batch;
        self
    }

    #[must_use]
    pub fn no_terminal(mut self, no_terminal: bool) -> Self {
        self.no_terminal = no_terminal;
        self
    }

    #[must_use]
    pub fn tty_path(mut self, tty_path: Option<PathBuf>) -> Self {
        self.tty_path = tty_path;
        self
    }
}
