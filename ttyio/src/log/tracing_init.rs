// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DisplayPreference, TracingConfig, WriterConfig, rolling_file_appender_impl};
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt as _, registry::LookupSpan,
                         util::SubscriberInitExt as _};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
    };
}

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Build the layers from `tracing_config` and install them as the global default.
///
/// Returns `Ok(false)` when [`WriterConfig::None`] is requested (nothing installed).
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber has
/// already been set.
pub fn try_initialize_logging(tracing_config: TracingConfig) -> miette::Result<bool> {
    if tracing_config.writer_config == WriterConfig::None {
        return Ok(false);
    }
    let layers = try_create_layers(&tracing_config)?;
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| miette::miette!("failed to install tracing subscriber: {e}"))?;
    Ok(true)
}

/// Returns the layers. This does not initialize the tracing system.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<tracing_subscriber::Registry>>>> {
    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    if let Some(layer) = try_create_display_layer(
        tracing_config.get_level_filter(),
        tracing_config.get_writer_config(),
    ) {
        return_it.push(layer);
    }

    if let Some(layer) = try_create_file_layer(
        tracing_config.get_level_filter(),
        tracing_config.get_writer_config(),
    )? {
        return_it.push(layer);
    }

    Ok(return_it)
}

/// This erases the concrete type of the writer, and returns a boxed layer.
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> Option<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!();

    match writer_config {
        WriterConfig::DisplayAndFile(display_pref, _)
        | WriterConfig::Display(display_pref) => match display_pref {
            DisplayPreference::Stdout => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stdout)
                    .with_filter(level_filter),
            )),
            DisplayPreference::Stderr => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stderr)
                    .with_filter(level_filter),
            )),
        },
        WriterConfig::File(_) | WriterConfig::None => None,
    }
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!().with_ansi(false);

    Ok(match writer_config {
        WriterConfig::DisplayAndFile(_, log_file_path)
        | WriterConfig::File(log_file_path) => {
            let file = rolling_file_appender_impl::try_create(log_file_path.as_str())?;
            Some(Box::new(
                fmt_layer.with_writer(file).with_filter(level_filter),
            ))
        }
        WriterConfig::Display(_) | WriterConfig::None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_create_display_layer() {
        let writer_config = WriterConfig::Display(DisplayPreference::Stderr);
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(LevelFilter::DEBUG, writer_config);
        assert!(layer.is_some());
    }

    #[test]
    fn test_try_create_file_layer() {
        let file_path = std::env::temp_dir().join("r3bl_ttyio_file_layer_test.log");
        let file_path = file_path.to_str().unwrap().to_string();

        let writer_config = WriterConfig::File(file_path.clone());
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_file_layer(LevelFilter::DEBUG, writer_config).unwrap();

        assert!(layer.is_some());
        assert!(std::path::Path::new(&file_path).exists());
    }

    #[test]
    fn test_try_create_both_layers() {
        let file_path = std::env::temp_dir().join("r3bl_ttyio_both_layers_test.log");
        let tracing_config = TracingConfig {
            writer_config: WriterConfig::DisplayAndFile(
                DisplayPreference::Stdout,
                file_path.to_str().unwrap().to_string(),
            ),
            level: tracing::Level::DEBUG,
        };
        let layers = try_create_layers(&tracing_config).unwrap();
        assert_eq!(layers.len(), 2);
    }

    #[test]
    fn test_none_writer_installs_nothing() {
        let tracing_config = TracingConfig {
            writer_config: WriterConfig::None,
            level: tracing::Level::DEBUG,
        };
        assert!(!try_initialize_logging(tracing_config).unwrap());
    }
}
