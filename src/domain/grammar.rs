//! Move grammar: the lexical categories a SAN token may belong to.
//!
//! A move token is first screened by the exclusion rules, then matched
//! against the castling, piece-move and pawn-move patterns in that order.
//! Turn markers (`12.`) form a separate category that never overlaps with
//! a valid move.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{instrument, trace};

static CASTLING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^O-O(-O)?$").unwrap());

static CASTLING_WITH_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^O-O(-O)?[+#]?$").unwrap());

static PIECE_MOVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[KQRBN]([a-h1-8]|[a-h][1-8])?x?[a-h][1-8](=[QRBN])?[+#]?$").unwrap()
});

static PAWN_MOVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-h]x[a-h][1-8](=[QRBN])?[+#]?$|^[a-h][1-8](=[QRBN])?[+#]?$").unwrap()
});

static TURN_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)\.$").unwrap());

static OFF_BOARD_RANK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-h][90]").unwrap());

const MALFORMED_CASTLING: [&str; 2] = ["O-O-O-O", "O-O-O-O-O"];

/// Which pattern a valid move matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    Castling,
    Piece,
    Pawn,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveCategory::Castling => "castling",
            MoveCategory::Piece => "piece move",
            MoveCategory::Pawn => "pawn move",
        };
        f.write_str(name)
    }
}

/// Why a candidate move was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    #[error("pawn moves are not prefixed with 'P'")]
    PawnPrefix,

    #[error("rank outside the board")]
    OffBoardRank,

    #[error("malformed castling")]
    MalformedCastling,

    #[error("not a castling, piece or pawn move")]
    Unrecognized,
}

/// Switches for the parts of the grammar that are not fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrammarOptions {
    /// Accept `+`/`#` after `O-O` and `O-O-O`.
    pub castling_suffix: bool,
}

/// Validator for single move tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGrammar {
    options: GrammarOptions,
}

impl MoveGrammar {
    pub fn new(options: GrammarOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> GrammarOptions {
        self.options
    }

    /// Classify `mv`, or report the first rule it breaks.
    #[instrument(level = "trace", skip(self))]
    pub fn classify(&self, mv: &str) -> Result<MoveCategory, Rejection> {
        if mv.starts_with('P') {
            return Err(Rejection::PawnPrefix);
        }
        if OFF_BOARD_RANK.is_match(mv) {
            return Err(Rejection::OffBoardRank);
        }
        if MALFORMED_CASTLING.contains(&mv) {
            return Err(Rejection::MalformedCastling);
        }

        let castling = if self.options.castling_suffix {
            &*CASTLING_WITH_SUFFIX
        } else {
            &*CASTLING
        };

        let category = if castling.is_match(mv) {
            MoveCategory::Castling
        } else if PIECE_MOVE.is_match(mv) {
            MoveCategory::Piece
        } else if PAWN_MOVE.is_match(mv) {
            MoveCategory::Pawn
        } else {
            return Err(Rejection::Unrecognized);
        };
        trace!("{:?} -> {}", mv, category);
        Ok(category)
    }

    pub fn is_valid_move(&self, mv: &str) -> bool {
        self.classify(mv).is_ok()
    }
}

/// True if `token` has the shape of a turn marker (`<digits>.`).
pub fn is_turn_marker(token: &str) -> bool {
    TURN_MARKER.is_match(token)
}

/// Turn number carried by a turn marker token.
///
/// Returns `None` when the token is not a marker, or when its digit run
/// does not fit in a `u64`.
pub fn turn_number(token: &str) -> Option<u64> {
    TURN_MARKER
        .captures(token)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// A validated ply in SAN form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveNotation {
    text: String,
    category: MoveCategory,
}

impl MoveNotation {
    /// Validate `text` against `grammar`.
    pub fn parse(grammar: &MoveGrammar, text: &str) -> Result<Self, Rejection> {
        let category = grammar.classify(text)?;
        Ok(Self {
            text: text.to_string(),
            category,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> MoveCategory {
        self.category
    }

    pub fn is_capture(&self) -> bool {
        self.text.contains('x')
    }

    pub fn is_check(&self) -> bool {
        self.text.ends_with('+')
    }

    pub fn is_mate(&self) -> bool {
        self.text.ends_with('#')
    }

    /// Promotion piece letter, e.g. `Some('Q')` for `e8=Q+`.
    pub fn promotion(&self) -> Option<char> {
        let (_, rest) = self.text.split_once('=')?;
        rest.chars().next()
    }
}

impl FromStr for MoveNotation {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&MoveGrammar::default(), s)
    }
}

impl AsRef<str> for MoveNotation {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for MoveNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
