//! Game transcript service
//!
//! Reads SAN transcripts, parses them into turns and builds the positioned
//! turn tree used by the graphical views.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{GameParser, Layout, TurnSequence, TurnTree, TurnTreeBuilder};
use crate::infrastructure::traits::{FileSystem, StdinReader};

/// Where a transcript comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSource {
    File(PathBuf),
    Text(String),
    Stdin,
}

/// Turn tree together with its node positions.
#[derive(Debug)]
pub struct PositionedTree {
    pub tree: TurnTree,
    pub layout: Layout,
}

/// Service for parsing transcripts and building turn trees.
pub struct GameService {
    parser: GameParser,
    builder: TurnTreeBuilder,
    fs: Arc<dyn FileSystem>,
    stdin: Arc<dyn StdinReader>,
}

impl GameService {
    /// Create a new game service configured from `settings`.
    pub fn new(
        settings: &Settings,
        fs: Arc<dyn FileSystem>,
        stdin: Arc<dyn StdinReader>,
    ) -> Self {
        Self {
            parser: GameParser::new(settings.parse_options()),
            builder: TurnTreeBuilder::with_root_label(settings.tree.root_label.as_str()),
            fs,
            stdin,
        }
    }

    /// Load the raw transcript text.
    #[instrument(level = "debug", skip(self))]
    pub fn read_transcript(&self, source: &TranscriptSource) -> ApplicationResult<String> {
        match source {
            TranscriptSource::File(path) => self.fs.read_to_string(path).as_input_error(path),
            TranscriptSource::Text(text) => Ok(text.clone()),
            TranscriptSource::Stdin => {
                self.stdin
                    .read_all()
                    .map_err(|source| ApplicationError::Input {
                        context: "<stdin>".to_string(),
                        source,
                    })
            }
        }
    }

    /// Parse a transcript into its turns.
    #[instrument(level = "debug", skip(self, text))]
    pub fn parse(&self, text: &str) -> ApplicationResult<TurnSequence> {
        let turns = self.parser.parse(text)?;
        debug!("parse: {} turns, {} plies", turns.len(), turns.ply_count());
        Ok(turns)
    }

    /// Parse a transcript and lay its turns out as a positioned tree.
    pub fn build_tree(&self, text: &str) -> ApplicationResult<PositionedTree> {
        let turns = self.parse(text)?;
        Ok(self.position(&turns))
    }

    /// Build and position the tree for already-parsed turns.
    #[instrument(level = "debug", skip(self, turns))]
    pub fn position(&self, turns: &TurnSequence) -> PositionedTree {
        let tree = self.builder.build(turns);
        let layout = tree.compute_positions();
        debug!("position: {} columns, {} rows", layout.width(), tree.height());
        PositionedTree { tree, layout }
    }
}
