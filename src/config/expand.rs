//! Environment variable expansion for config documents
//!
//! Recognizes `${name}`, `${name:default}` and `$name`. Any other use of `$`
//! (a lone dollar, `${}`, an unterminated `${`) is copied through unchanged.

use once_cell::sync::Lazy;
use regex::bytes::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    // Braced tokens may hold arbitrary bytes, so Unicode mode is off there.
    Regex::new(r"\$(?:\{((?-u:[^}])+)\}|([A-Za-z0-9_]+))").expect("valid regex")
});

/// Expand placeholders against the current process environment.
pub fn expand_env(input: &[u8]) -> Vec<u8> {
    expand_with(input, env_value)
}

/// Expand placeholders using `lookup` to resolve variable names to raw bytes.
///
/// A variable that is missing or empty falls back to its default when one
/// was given with `${name:default}`, otherwise it becomes the empty string.
/// Substituted values are never expanded again.
pub fn expand_with<F>(input: &[u8], mut lookup: F) -> Vec<u8>
where
    F: FnMut(&str) -> Option<Vec<u8>>,
{
    PLACEHOLDER
        .replace_all(input, |caps: &Captures<'_>| {
            let token = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_bytes()).unwrap_or_default();
            resolve(token, &mut lookup)
        })
        .into_owned()
}

fn resolve<F>(token: &[u8], lookup: &mut F) -> Vec<u8>
where
    F: FnMut(&str) -> Option<Vec<u8>>,
{
    let (name, default) = match token.iter().position(|&b| b == b':') {
        Some(idx) => (&token[..idx], Some(&token[idx + 1..])),
        None => (token, None),
    };

    match lookup(&String::from_utf8_lossy(name)) {
        Some(value) if !value.is_empty() => value,
        _ => default.unwrap_or_default().to_vec(),
    }
}

// Values are substituted byte for byte, including ones that are not UTF-8.
#[cfg(unix)]
fn env_value(name: &str) -> Option<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;
    std::env::var_os(name).map(|v| v.as_bytes().to_vec())
}

#[cfg(not(unix))]
fn env_value(name: &str) -> Option<Vec<u8>> {
    std::env::var_os(name).map(|v| v.to_string_lossy().into_owned().into_bytes())
}
