//! Turn-sequencing parser over the token stream.
//!
//! Each turn is `<n>.` followed by a mandatory white move and an optional
//! black move. One token of lookahead decides whether a black move is
//! present: a token shaped like a turn marker starts the next turn.

use std::slice;

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::grammar::{self, GrammarOptions, MoveGrammar, MoveNotation};
use crate::domain::tokenizer::TokenCursor;

/// One numbered move pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Number taken verbatim from the turn marker
    pub number: u64,
    pub white: MoveNotation,
    /// Absent when the transcript ends after white's move
    pub black: Option<MoveNotation>,
}

/// Turns in the order they appear in the transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnSequence {
    turns: Vec<Turn>,
}

impl TurnSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn as_slice(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of plies (white and black moves) in the sequence.
    pub fn ply_count(&self) -> usize {
        self.turns
            .iter()
            .map(|t| 1 + usize::from(t.black.is_some()))
            .sum()
    }
}

impl<'a> IntoIterator for &'a TurnSequence {
    type Item = &'a Turn;
    type IntoIter = slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

impl IntoIterator for TurnSequence {
    type Item = Turn;
    type IntoIter = std::vec::IntoIter<Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.into_iter()
    }
}

impl FromIterator<Turn> for TurnSequence {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub grammar: GrammarOptions,
    /// Require turn numbers 1, 2, 3, ... with no gaps or repeats.
    pub strict_numbering: bool,
}

/// Stateless SAN transcript parser; every `parse` call starts from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameParser {
    grammar: MoveGrammar,
    strict_numbering: bool,
}

impl GameParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            grammar: MoveGrammar::new(options.grammar),
            strict_numbering: options.strict_numbering,
        }
    }

    pub fn grammar(&self) -> &MoveGrammar {
        &self.grammar
    }

    /// Parse a whole transcript, failing at the first violation.
    #[instrument(level = "debug", skip(self, text))]
    pub fn parse(&self, text: &str) -> DomainResult<TurnSequence> {
        let mut cursor = TokenCursor::new(text);
        let mut turns = TurnSequence::new();
        debug!("tokens: {}", cursor.len());

        while let Some(marker) = cursor.advance() {
            let number = self.turn_marker(marker, turns.len())?;

            let white = cursor
                .advance()
                .ok_or(DomainError::MissingWhiteMove { turn: number })?;
            let white = MoveNotation::parse(&self.grammar, white).map_err(|reason| {
                DomainError::InvalidWhiteMove {
                    token: white.to_string(),
                    turn: number,
                    reason,
                }
            })?;

            let black = match cursor.peek() {
                Some(token) if !grammar::is_turn_marker(token) => {
                    cursor.advance();
                    let black = MoveNotation::parse(&self.grammar, token).map_err(|reason| {
                        DomainError::InvalidBlackMove {
                            token: token.to_string(),
                            turn: number,
                            reason,
                        }
                    })?;
                    Some(black)
                }
                _ => None,
            };

            debug!(
                "turn {}: {} {}",
                number,
                white,
                black.as_ref().map(MoveNotation::as_str).unwrap_or("-")
            );
            turns.push(Turn {
                number,
                white,
                black,
            });
        }

        Ok(turns)
    }

    #[instrument(level = "trace", skip(self))]
    fn turn_marker(&self, token: &str, parsed: usize) -> DomainResult<u64> {
        let number = grammar::turn_number(token).ok_or_else(|| DomainError::MissingTurnMarker {
            token: token.to_string(),
        })?;
        if self.strict_numbering {
            let expected = parsed as u64 + 1;
            if number != expected {
                return Err(DomainError::TurnOutOfSequence {
                    expected,
                    token: token.to_string(),
                });
            }
        }
        Ok(number)
    }
}

/// Parse `text` with the default (permissive, no castling suffix) options.
pub fn parse_game(text: &str) -> DomainResult<TurnSequence> {
    GameParser::default().parse(text)
}
