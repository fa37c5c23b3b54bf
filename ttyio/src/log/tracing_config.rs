// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// This configuration also allows you to set the log level.
///
/// Use [`crate::try_initialize_logging()`] to initialize the tracing system with this
/// configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level: tracing::Level,
}

/// - `String` is the file path to use for the log file. Eg: `/tmp/ttyio.log`.
/// - [`DisplayPreference`] is the preferred display to use for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    /// Log to a file only, so that the console stays reserved for prompts.
    #[must_use]
    pub fn new_file(path: impl Into<String>, level: tracing::Level) -> Self {
        Self {
            writer_config: WriterConfig::File(path.into()),
            level,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { LevelFilter::from_level(self.level) }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            writer_config: WriterConfig::Display(DisplayPreference::Stderr),
            level: tracing::Level::INFO,
        }
    }
}
