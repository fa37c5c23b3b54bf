// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Create a file appender that never rolls over. Writes are synchronous: a hidden read
/// may end in `std::process::exit()` and buffered log lines would be lost.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
/// - The file can't be created
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(&path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            "Can't access current folder {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(parent)
        .map_err(|error| miette::miette!("Can't create log file {}: {error}", path.display()))
}
