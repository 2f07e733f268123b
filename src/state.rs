//! Persisted toggle-state stores.
//!
//! The production [`FileStateStore`] keeps one tiny text file per layout
//! mode under the runtime directory, containing the literal character `0`
//! (secondary at the origin next) or `1` (primary at the origin next).  A
//! missing file reads as `0`.  Anything else in the file — garbage, an
//! empty string, a partial write — is logged and recovered to `0` rather
//! than silently selecting the other arrangement.
//!
//! [`MemoryStateStore`] backs tests and any caller that wants toggle
//! semantics without touching the filesystem.
//!
//! No locking is performed: two overlapping invocations can interleave a
//! read-then-write race.  Invocations are human-triggered keybinding
//! presses, so the window is accepted.

use crate::layout::{LayoutMode, ToggleState};
use crate::traits::StateStore;
use log::warn;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Errors from the file-backed store.
#[derive(Debug, thiserror::Error)]
#[error("state file {path}: {source}")]
pub struct StateFileError {
    path: String,
    #[source]
    source: std::io::Error,
}

/// Toggle-state store backed by one file per mode.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at `dir`.  The directory must already exist.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Create a store under `$XDG_RUNTIME_DIR`, falling back to `/tmp`.
    pub fn in_runtime_dir() -> Self {
        let dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
        Self::new(dir)
    }

    /// The file holding the bit for `mode`.
    fn path(&self, mode: LayoutMode) -> PathBuf {
        self.dir.join(format!("hyprpair-{}.state", mode.key()))
    }
}

/// Decode persisted file content.  `None` means unparseable.
fn parse_state(content: &str) -> Option<ToggleState> {
    match content.trim() {
        "0" => Some(ToggleState::SecondaryFirst),
        "1" => Some(ToggleState::PrimaryFirst),
        _ => None,
    }
}

fn encode_state(state: ToggleState) -> &'static str {
    match state {
        ToggleState::SecondaryFirst => "0",
        ToggleState::PrimaryFirst => "1",
    }
}

impl StateStore for FileStateStore {
    type Error = StateFileError;

    fn get(&self, mode: LayoutMode) -> Result<ToggleState, StateFileError> {
        let path = self.path(mode);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ToggleState::SecondaryFirst);
            }
            Err(e) => {
                return Err(StateFileError {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        match parse_state(&content) {
            Some(state) => Ok(state),
            None => {
                warn!(
                    "unparseable state in {} ({:?}), assuming secondary-first",
                    path.display(),
                    content
                );
                Ok(ToggleState::SecondaryFirst)
            }
        }
    }

    fn set(&self, mode: LayoutMode, state: ToggleState) -> Result<(), StateFileError> {
        let path = self.path(mode);
        std::fs::write(&path, encode_state(state)).map_err(|e| StateFileError {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// In-memory toggle-state store.
///
/// Starts with both modes unset (reading [`ToggleState::SecondaryFirst`]).
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    horizontal: RefCell<Option<ToggleState>>,
    vertical: RefCell<Option<ToggleState>>,
}

impl MemoryStateStore {
    fn slot(&self, mode: LayoutMode) -> &RefCell<Option<ToggleState>> {
        match mode {
            LayoutMode::Horizontal => &self.horizontal,
            LayoutMode::Vertical => &self.vertical,
        }
    }
}

impl StateStore for MemoryStateStore {
    /// The in-memory store cannot fail.
    type Error = std::convert::Infallible;

    fn get(&self, mode: LayoutMode) -> Result<ToggleState, Self::Error> {
        Ok(self
            .slot(mode)
            .borrow()
            .unwrap_or(ToggleState::SecondaryFirst))
    }

    fn set(&self, mode: LayoutMode, state: ToggleState) -> Result<(), Self::Error> {
        *self.slot(mode).borrow_mut() = Some(state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Monotonic counter to generate unique state directories per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    /// Helper: create a unique temporary directory for each test.
    fn tmp_state_dir() -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "hyprpair-test-{}-{}",
            std::process::id(),
            id
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn absent_file_reads_secondary_first() {
        let dir = tmp_state_dir();
        let store = FileStateStore::new(&dir);
        assert_eq!(
            store.get(LayoutMode::Horizontal).unwrap(),
            ToggleState::SecondaryFirst
        );
        // No file was created by the read.
        assert!(!dir.join("hyprpair-horizontal.state").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tmp_state_dir();
        let store = FileStateStore::new(&dir);
        store
            .set(LayoutMode::Horizontal, ToggleState::PrimaryFirst)
            .unwrap();
        assert_eq!(
            store.get(LayoutMode::Horizontal).unwrap(),
            ToggleState::PrimaryFirst
        );
        assert_eq!(
            std::fs::read_to_string(dir.join("hyprpair-horizontal.state")).unwrap(),
            "1"
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn modes_are_independent() {
        let dir = tmp_state_dir();
        let store = FileStateStore::new(&dir);
        store
            .set(LayoutMode::Horizontal, ToggleState::PrimaryFirst)
            .unwrap();
        assert_eq!(
            store.get(LayoutMode::Vertical).unwrap(),
            ToggleState::SecondaryFirst
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn trailing_newline_is_tolerated() {
        let dir = tmp_state_dir();
        std::fs::write(dir.join("hyprpair-vertical.state"), "1\n").unwrap();
        let store = FileStateStore::new(&dir);
        assert_eq!(
            store.get(LayoutMode::Vertical).unwrap(),
            ToggleState::PrimaryFirst
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn garbage_recovers_to_secondary_first() {
        let dir = tmp_state_dir();
        std::fs::write(dir.join("hyprpair-horizontal.state"), "banana").unwrap();
        let store = FileStateStore::new(&dir);
        assert_eq!(
            store.get(LayoutMode::Horizontal).unwrap(),
            ToggleState::SecondaryFirst
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_file_recovers_to_secondary_first() {
        let dir = tmp_state_dir();
        std::fs::write(dir.join("hyprpair-horizontal.state"), "").unwrap();
        let store = FileStateStore::new(&dir);
        assert_eq!(
            store.get(LayoutMode::Horizontal).unwrap(),
            ToggleState::SecondaryFirst
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn memory_store_defaults_and_round_trips() {
        let store = MemoryStateStore::default();
        assert_eq!(
            store.get(LayoutMode::Horizontal).unwrap(),
            ToggleState::SecondaryFirst
        );
        store
            .set(LayoutMode::Horizontal, ToggleState::PrimaryFirst)
            .unwrap();
        assert_eq!(
            store.get(LayoutMode::Horizontal).unwrap(),
            ToggleState::PrimaryFirst
        );
        assert_eq!(
            store.get(LayoutMode::Vertical).unwrap(),
            ToggleState::SecondaryFirst
        );
    }
}
