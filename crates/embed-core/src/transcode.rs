//! Byte transcoding
//!
//! Turns compiled bytecode into the decimal initializer list of a C++ array.
//! A `0` sentinel closes the list, so the emitted token count is always one
//! more than the byte count and the list never ends in a separator.

/// Value appended after the last byte
pub const SENTINEL: u8 = 0;

/// Default number of tokens per initializer line
pub const DEFAULT_TOKENS_PER_LINE: usize = 16;

/// Decimal initializer list for a byte array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteLiteral {
    body: String,
    token_count: usize,
}

impl ByteLiteral {
    /// Transcode `bytes` into comma-separated decimal tokens.
    ///
    /// `tokens_per_line` wraps the list with `,\n` plus `indent`; zero
    /// disables wrapping. Wrapping only changes whitespace between tokens.
    pub fn new(bytes: &[u8], tokens_per_line: usize, indent: &str) -> Self {
        // at most three digits plus a separator per byte
        let mut body = String::with_capacity(bytes.len() * 4 + 1);

        for (i, byte) in bytes.iter().chain(std::iter::once(&SENTINEL)).enumerate() {
            if i > 0 {
                body.push(',');
                if tokens_per_line > 0 && i % tokens_per_line == 0 {
                    body.push('\n');
                    body.push_str(indent);
                }
            }
            body.push_str(&byte.to_string());
        }

        Self {
            body,
            token_count: bytes.len() + 1,
        }
    }

    /// Unwrapped single-line transcoding
    pub fn single_line(bytes: &[u8]) -> Self {
        Self::new(bytes, 0, "")
    }

    /// Number of emitted tokens, sentinel included
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Initializer text without braces
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Emitted tokens in order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.body.split(',').map(str::trim)
    }
}

impl std::fmt::Display for ByteLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.body)
    }
}
