//! Serialized chain output.

use crate::config::PrettyConfig;
use crate::error::{ChainError, Result};
use serde::de::IgnoredAny;
use std::fmt;
use std::ops::Deref;
use tracing::debug;

/// Raw JSON bytes produced by [`Chain::to_json`](crate::Chain::to_json).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Output(Vec<u8>);

impl Output {
    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-indent with two spaces.
    ///
    /// Returns an empty string if the bytes are not valid JSON. Use
    /// [`Output::try_pretty`] to see the failure.
    pub fn pretty(&self) -> String {
        self.pretty_with(&PrettyConfig::default())
    }

    /// Re-indent with the given prefix and indent, or an empty string if the
    /// bytes are not valid JSON.
    pub fn pretty_with(&self, config: &PrettyConfig) -> String {
        match self.try_pretty_with(config) {
            Ok(pretty) => pretty,
            Err(e) => {
                debug!(error = %e, bytes = self.len(), "pretty print failed");
                String::new()
            }
        }
    }

    /// Re-indent with two spaces, failing on invalid JSON.
    pub fn try_pretty(&self) -> Result<String> {
        self.try_pretty_with(&PrettyConfig::default())
    }

    /// Re-indent with the given prefix and indent, failing on invalid JSON.
    ///
    /// Only whitespace outside strings changes: number text, string escapes,
    /// key order and duplicate keys are kept as written. The prefix starts
    /// every line but the first. Surrounding whitespace is dropped.
    pub fn try_pretty_with(&self, config: &PrettyConfig) -> Result<String> {
        serde_json::from_slice::<IgnoredAny>(&self.0).map_err(ChainError::decode)?;

        let pretty = reindent(&self.0, config);
        String::from_utf8(pretty).map_err(|e| ChainError::Decode(e.to_string()))
    }
}

/// Rewrite whitespace of a valid JSON document.
fn reindent(src: &[u8], config: &PrettyConfig) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    // Set after `{`/`[` until the next token shows whether the container is empty
    let mut opened = false;

    let newline = |out: &mut Vec<u8>, depth: usize| {
        out.push(b'\n');
        out.extend_from_slice(config.prefix.as_bytes());
        for _ in 0..depth {
            out.extend_from_slice(config.indent.as_bytes());
        }
    };

    for &c in src {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == b'\\' {
                escaped = true;
            } else if c == b'"' {
                in_string = false;
            }
            continue;
        }

        if matches!(c, b' ' | b'\t' | b'\n' | b'\r') {
            continue;
        }

        if opened && c != b'}' && c != b']' {
            opened = false;
            depth += 1;
            newline(&mut out, depth);
        }

        match c {
            b'"' => {
                in_string = true;
                out.push(c);
            }
            b'{' | b'[' => {
                out.push(c);
                opened = true;
            }
            b'}' | b']' => {
                if opened {
                    opened = false;
                } else {
                    depth = depth.saturating_sub(1);
                    newline(&mut out, depth);
                }
                out.push(c);
            }
            b',' => {
                out.push(c);
                newline(&mut out, depth);
            }
            b':' => {
                out.push(c);
                out.push(b' ');
            }
            _ => out.push(c),
        }
    }

    out
}

impl From<Vec<u8>> for Output {
    fn from(bytes: Vec<u8>) -> Self {
        Output(bytes)
    }
}

impl From<&[u8]> for Output {
    fn from(bytes: &[u8]) -> Self {
        Output(bytes.to_vec())
    }
}

impl From<Output> for Vec<u8> {
    fn from(output: Output) -> Self {
        output.0
    }
}

impl AsRef<[u8]> for Output {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Output {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output({})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}
