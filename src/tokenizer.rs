//! Placeholder tokenizer protecting regions of a stylesheet
//!
//! A [`Tokenizer`] swaps every match of its pattern for a fixed token and
//! keeps the matched text in a ledger. Restoration is positional: the Nth
//! token in the text receives the Nth captured original, so stages running
//! in between must never create, drop or reorder tokens.

use fancy_regex::Regex;
use tracing::trace;

use crate::error::JanusError;
use crate::patterns::{group, replace_with};

/// Placeholder for `/* @noflip */` followed by a single declaration.
pub const TOKEN_NOFLIP_SINGLE: &str = "`NOFLIP_SINGLE`";
/// Placeholder for `/* @noflip */` followed by a whole rule block.
pub const TOKEN_NOFLIP_CLASS: &str = "`NOFLIP_CLASS`";

/// Replaces pattern matches with a token and restores them later.
///
/// # Examples
///
/// ```
/// use cssjanus::patterns::{patterns, TOKEN_COMMENT};
/// use cssjanus::tokenizer::Tokenizer;
///
/// let mut comments = Tokenizer::new(&patterns().comment, TOKEN_COMMENT);
/// let tokenized = comments.tokenize("a /* left */ b /* right */").unwrap();
/// assert_eq!(tokenized, "a `COMMENT` b `COMMENT`");
/// assert_eq!(comments.len(), 2);
///
/// let restored = comments.detokenize(&tokenized).unwrap();
/// assert_eq!(restored, "a /* left */ b /* right */");
/// ```
#[derive(Debug)]
pub struct Tokenizer<'p> {
    pattern: &'p Regex,
    token: &'static str,
    originals: Vec<String>,
}

impl<'p> Tokenizer<'p> {
    pub fn new(pattern: &'p Regex, token: &'static str) -> Self {
        Self { pattern, token, originals: Vec::new() }
    }

    /// Number of regions currently held in the ledger.
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Replace every match of the pattern in `text` with the token,
    /// remembering the originals in match order.
    pub fn tokenize(&mut self, text: &str) -> Result<String, JanusError> {
        let token = self.token;
        let originals = &mut self.originals;
        let before = originals.len();
        let out = replace_with(self.pattern, text, |caps| {
            originals.push(group(caps, 0).to_string());
            token.to_string()
        })?;
        trace!(token, protected = self.originals.len() - before, "tokenized");
        Ok(out)
    }

    /// Put the captured originals back, consuming the ledger.
    ///
    /// Fails with [`JanusError::TokenMismatch`] when the number of tokens in
    /// `text` differs from the number of captured regions.
    pub fn detokenize(self, text: &str) -> Result<String, JanusError> {
        let found = text.matches(self.token).count();
        if found != self.originals.len() {
            return Err(JanusError::TokenMismatch {
                token: self.token,
                expected: self.originals.len(),
                found,
            });
        }
        if found == 0 {
            return Ok(text.to_string());
        }

        let restored_len: usize = self.originals.iter().map(String::len).sum();
        let mut out = String::with_capacity(text.len() + restored_len);
        let mut pieces = text.split(self.token);
        if let Some(first) = pieces.next() {
            out.push_str(first);
        }
        for (original, piece) in self.originals.iter().zip(pieces) {
            out.push_str(original);
            out.push_str(piece);
        }
        Ok(out)
    }
}
