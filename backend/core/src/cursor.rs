//! Token cursor over the text that follows a command name.
//!
//! Resolution needs tentative lookahead: it reads up to two tokens, decides
//! what they mean, and then puts them back. The cursor is therefore an index
//! into an immutable token sequence; a checkpoint is a copy of that index and
//! a rewind reassigns it.
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

/// Quoted runs (`"two words"`) or bare non-whitespace runs.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("token regex is valid"));

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// A saved cursor position. Only meaningful for the cursor that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// The operations the resolver and dispatcher need from an argument stream.
pub trait TokenCursor {
    /// Next token without consuming it.
    fn peek_next(&self) -> Option<&str>;

    /// Consume and return the next token.
    fn consume_next(&mut self) -> Option<String>;

    /// Save the current position.
    fn checkpoint(&self) -> Checkpoint;

    /// Return to a previously saved position.
    fn rewind(&mut self, checkpoint: Checkpoint);
}

// ---------------------------------------------------------------------------
// ArgCursor
// ---------------------------------------------------------------------------

/// Position index into a shared, immutable token list.
///
/// Cloning is cheap (the tokens are behind an `Arc`); each clone moves
/// independently.
#[derive(Debug, Clone, Default)]
pub struct ArgCursor {
    tokens: Arc<[String]>,
    position: usize,
}

impl ArgCursor {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            position: 0,
        }
    }

    /// Split raw text into tokens. Double quotes group words; the quotes
    /// themselves are dropped.
    pub fn parse(text: &str) -> Self {
        let tokens = TOKEN_RE.captures_iter(text).filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
        });
        Self::new(tokens)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True once every token has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> &[String] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    /// Remaining tokens joined with single spaces.
    pub fn rest(&self) -> String {
        self.remaining().join(" ")
    }
}

impl TokenCursor for ArgCursor {
    fn peek_next(&self) -> Option<&str> {
        self.tokens.get(self.position).map(String::as_str)
    }

    fn consume_next(&mut self) -> Option<String> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    fn rewind(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0.min(self.tokens.len());
    }
}
