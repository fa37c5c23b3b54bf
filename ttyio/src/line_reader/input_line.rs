// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::CONTROL_D;
use std::borrow::Cow;

/// A line returned by [`crate::TtySession::read_line()`]: the filtered bytes without
/// the newline, or the single byte [`CONTROL_D`] when input ended first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputLine {
    bytes: Vec<u8>,
}

impl InputLine {
    /// The end of input line.
    #[must_use]
    pub fn eof() -> Self { Self { bytes: vec![CONTROL_D] } }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    /// `true` for the end of input sentinel. An empty line is not end of input.
    #[must_use]
    pub fn is_eof(&self) -> bool { self.bytes == [CONTROL_D] }

    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.bytes) }

    /// Text with leading and trailing whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> String { self.to_string_lossy().trim().to_string() }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> { self.bytes }
}

impl From<Vec<u8>> for InputLine {
    fn from(bytes: Vec<u8>) -> Self { Self { bytes } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_and_empty_are_distinct() {
        assert!(InputLine::eof().is_eof());
        assert!(!InputLine::default().is_eof());
        assert!(!InputLine::from(b"\x04x".to_vec()).is_eof());
    }

    #[test]
    fn test_trimmed() {
        let line = InputLine::from(b"  yes \t".to_vec());
        assert_eq!(line.trimmed(), "yes");
        assert_eq!(line.as_bytes(), b"  yes \t");
    }
}
