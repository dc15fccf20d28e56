//! Whitespace tokenizer and the cursor the parser walks it with.

use tracing::instrument;

/// Split `text` on runs of whitespace, dropping empty tokens.
#[instrument(level = "trace", skip(text))]
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Single-pass cursor over a token sequence.
///
/// Lives for exactly one parse call; nothing about the position survives it.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: tokenize(text),
            pos: 0,
        }
    }

    /// Current token without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1. e4 e5", vec!["1.", "e4", "e5"])]
    #[case("  1.\te4\n\n e5  ", vec!["1.", "e4", "e5"])]
    #[case("1.e4 Nf3!?", vec!["1.e4", "Nf3!?"])]
    #[case("", vec![])]
    #[case(" \t\r\n", vec![])]
    fn test_tokenize(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(tokenize(text), expected);
    }

    #[test]
    fn test_cursor_walks_tokens_in_order() {
        let mut cursor = TokenCursor::new("1. e4");
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.peek(), Some("1."));
        assert_eq!(cursor.advance(), Some("1."));
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.advance(), Some("e4"));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.position(), 2);
    }
}
