//! Search token normalisation.
//!
//! A token is the lowercased symbol name with every byte outside `[a-z0-9]`
//! written as `_` plus two lowercase hex digits, followed by `_<n>` where `n`
//! is the entry's position in its table:
//!
//! ```text
//! "convert< T >"  ──encode──►  "convert_3c_20t_20_3e"  ──+ suffix──►  "convert_3c_20t_20_3e_16"
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::IndexError;

static TOKEN_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+_[0-9]+$").expect("token shape regex must compile"));

/// Normalise a symbol or page name (no position suffix).
pub fn encode_token(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for byte in lowered.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() {
            out.push(byte as char);
        } else {
            out.push('_');
            out.push_str(&format!("{byte:02x}"));
        }
    }
    out
}

/// Attach the position suffix to an encoded stem.
pub fn with_suffix(stem: &str, position: usize) -> String {
    format!("{stem}_{position}")
}

/// Split `key` into its decoded (lowercased) name and position suffix.
///
/// A trailing `_<digits>` is read as the suffix. Keys without one decode as a
/// bare stem with `None`.
pub fn decode_token(key: &str) -> Result<(String, Option<usize>), IndexError> {
    if let Some((stem, tail)) = key.rsplit_once('_') {
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(position) = tail.parse::<usize>() {
                return Ok((decode_stem(key, stem)?, Some(position)));
            }
        }
    }
    Ok((decode_stem(key, key)?, None))
}

fn decode_stem(key: &str, stem: &str) -> Result<String, IndexError> {
    let invalid = |message: String| IndexError::Token {
        key: key.to_string(),
        message,
    };

    let bytes = stem.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'_' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .filter(|h| h.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')))
                    .ok_or_else(|| invalid(format!("truncated escape at byte {i}")))?;
                let byte = u8::from_str_radix(hex, 16)
                    .map_err(|e| invalid(format!("bad escape at byte {i}: {e}")))?;
                decoded.push(byte);
                i += 3;
            }
            b if b.is_ascii_lowercase() || b.is_ascii_digit() => {
                decoded.push(b);
                i += 1;
            }
            other => {
                return Err(invalid(format!(
                    "unexpected character {:?} at byte {i}",
                    other as char
                )))
            }
        }
    }
    String::from_utf8(decoded).map_err(|e| invalid(e.to_string()))
}

/// True when `key` is a non-empty normalised stem followed by a numeric
/// suffix, and every escape in the stem is well formed.
pub fn is_normalized(key: &str) -> bool {
    TOKEN_SHAPE.is_match(key) && matches!(decode_token(key), Ok((name, Some(_))) if !name.is_empty())
}
