// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Escaping of control bytes in untrusted text (user IDs, server messages) before it
//! reaches the terminal, so it can't move the cursor or clear the screen.
//!
//! | Input byte             | Output      |
//! | :--------------------- | :---------- |
//! | `\n`                   | `\n` (2 chars) |
//! | NUL                    | `\0` (2 chars) |
//! | other ASCII control    | `\xHH`      |
//! | anything else          | unchanged   |

use smallvec::SmallVec;
use std::fmt::Write as _;

/// Escaped output of short strings stays on the stack.
pub type EscapedBytes = SmallVec<[u8; 64]>;

fn push_escaped_byte(acc: &mut EscapedBytes, byte: u8) {
    match byte {
        b'\n' => acc.extend_from_slice(b"\\n"),
        0 => acc.extend_from_slice(b"\\0"),
        _ => {
            const HEX: &[u8; 16] = b"0123456789abcdef";
            acc.extend_from_slice(&[
                b'\\',
                b'x',
                HEX[usize::from(byte >> 4)],
                HEX[usize::from(byte & 0x0f)],
            ]);
        }
    }
}

/// Escape the ASCII control bytes of `bytes`. Other bytes, including ones with the
/// high bit set, are copied as is.
#[must_use]
pub fn escape_control_bytes(bytes: &[u8]) -> EscapedBytes {
    let mut acc = EscapedBytes::with_capacity(bytes.len());
    for &byte in bytes {
        if byte.is_ascii_control() {
            push_escaped_byte(&mut acc, byte);
        } else {
            acc.push(byte);
        }
    }
    acc
}

/// Decode `bytes` as UTF-8 (invalid sequences become U+FFFD) and escape every control
/// character. Non ASCII control characters (C1) are escaped byte by byte.
///
/// The result is cut to at most `max_len` bytes, on a char boundary.
#[must_use]
pub fn escape_utf8_lossy(bytes: &[u8], max_len: Option<usize>) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let mut acc = String::with_capacity(decoded.len());
    for ch in decoded.chars() {
        if ch.is_control() {
            let mut utf8 = [0_u8; 4];
            for &byte in ch.encode_utf8(&mut utf8).as_bytes() {
                match byte {
                    b'\n' => acc.push_str("\\n"),
                    0 => acc.push_str("\\0"),
                    _ => {
                        // Writing to a String can't fail.
                        let _ = write!(acc, "\\x{byte:02x}");
                    }
                }
            }
        } else {
            acc.push(ch);
        }
    }
    if let Some(max_len) = max_len {
        truncate_on_char_boundary(&mut acc, max_len);
    }
    acc
}

/// Cut `bytes` to at most `max_len` bytes. `None` means no limit.
#[must_use]
pub fn truncate_bytes(bytes: &[u8], max_len: Option<usize>) -> &[u8] {
    match max_len {
        Some(max_len) if bytes.len() > max_len => &bytes[..max_len],
        _ => bytes,
    }
}

/// Shorten `text` to at most `max_len` bytes without splitting a char.
pub fn truncate_on_char_boundary(text: &mut String, max_len: usize) {
    if text.len() <= max_len {
        return;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
