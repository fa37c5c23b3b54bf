// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words conin conout

use std::{path::{Path, PathBuf},
          sync::OnceLock};

static TTY_NAME: OnceLock<PathBuf> = OnceLock::new();

/// Path of the controlling terminal. Resolved once per process, then cached.
///
/// On POSIX systems `/dev/tty` always refers to the controlling terminal of the calling
/// process, whatever the standard streams are redirected to.
#[cfg(unix)]
pub fn tty_name() -> &'static Path { TTY_NAME.get_or_init(|| PathBuf::from("/dev/tty")) }

/// Name of the console input device. Output goes to [`CONSOLE_OUTPUT_NAME`].
#[cfg(windows)]
pub fn tty_name() -> &'static Path { TTY_NAME.get_or_init(|| PathBuf::from("CONIN$")) }

/// Console output device, paired with the input device from [`tty_name()`].
#[cfg(windows)]
pub const CONSOLE_OUTPUT_NAME: &str = "CONOUT$";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tty_name_is_cached() {
        let first = tty_name();
        let second = tty_name();
        assert!(std::ptr::eq(first, second));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_tty_name() {
        assert_eq!(tty_name(), Path::new("/dev/tty"));
    }
}
