//! Tests for GameService with in-memory I/O

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use santree::application::services::{GameService, TranscriptSource};
use santree::application::ApplicationError;
use santree::config::{Settings, TreeSettings};
use santree::domain::{DomainError, Side};
use santree::infrastructure::traits::{FileSystem, StdinReader};
use santree::infrastructure::ServiceContainer;

#[derive(Default)]
struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    fn with_file(path: &str, content: &str) -> Self {
        let fs = Self::default();
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        fs
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn ensure_parent(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

struct FixedStdin(&'static str);

impl StdinReader for FixedStdin {
    fn read_all(&self) -> io::Result<String> {
        Ok(self.0.to_string())
    }
}

fn service(settings: Settings, fs: MemoryFileSystem, stdin: &'static str) -> GameService {
    GameService::new(&settings, Arc::new(fs), Arc::new(FixedStdin(stdin)))
}

#[test]
fn given_each_source_when_reading_transcript_then_returns_its_text() {
    // Arrange
    let svc = service(
        Settings::default(),
        MemoryFileSystem::with_file("/games/opera.san", "1. e4 e5"),
        "1. d4 d5",
    );

    // Act & Assert
    assert_eq!(
        svc.read_transcript(&TranscriptSource::File("/games/opera.san".into()))
            .unwrap(),
        "1. e4 e5"
    );
    assert_eq!(
        svc.read_transcript(&TranscriptSource::Stdin).unwrap(),
        "1. d4 d5"
    );
    assert_eq!(
        svc.read_transcript(&TranscriptSource::Text("1. c4".into()))
            .unwrap(),
        "1. c4"
    );
}

#[test]
fn given_missing_file_when_reading_transcript_then_input_error() {
    // Arrange
    let svc = service(Settings::default(), MemoryFileSystem::default(), "");

    // Act
    let result = svc.read_transcript(&TranscriptSource::File("/nope.san".into()));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Input { .. })));
}

#[test]
fn given_invalid_transcript_when_parsing_then_domain_error_passes_through() {
    // Arrange
    let svc = service(Settings::default(), MemoryFileSystem::default(), "");

    // Act
    let err = svc.parse("1. e4 e5 2.").unwrap_err();

    // Assert
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::MissingWhiteMove { turn: 2 })
    ));
    assert_eq!(err.to_string(), "missing white move in turn 2");
}

#[test]
fn given_root_label_setting_when_building_tree_then_root_uses_it() {
    // Arrange
    let settings = Settings {
        tree: TreeSettings {
            root_label: "Partida".into(),
        },
        ..Settings::default()
    };
    let svc = service(settings, MemoryFileSystem::default(), "");

    // Act
    let positioned = svc.build_tree("1. e4 e5 2. Nf3").unwrap();

    // Assert
    let root = positioned.tree.get_node(positioned.tree.root()).unwrap();
    assert_eq!(root.label, "Partida");
    assert_eq!(root.side, Side::Root);
    assert_eq!(positioned.layout.len(), 5);
    // In-order: Nf3, e4, (none), Partida, e5
    assert_eq!(positioned.layout.get(positioned.tree.root()).unwrap().x, 3);
}

#[test]
fn given_container_with_fakes_when_parsing_then_uses_injected_stdin() {
    // Arrange
    let container = ServiceContainer::with_deps(
        Settings::default(),
        Arc::new(MemoryFileSystem::default()),
        Arc::new(FixedStdin("1. e4 e5 2. Nf3 Nc6")),
    );

    // Act
    let text = container
        .game
        .read_transcript(&TranscriptSource::Stdin)
        .unwrap();
    let turns = container.game.parse(&text).unwrap();

    // Assert
    assert_eq!(turns.len(), 2);
    assert_eq!(container.settings.tree.root_label, "Game");
}
