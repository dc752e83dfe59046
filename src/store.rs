//! Dump-file store for the command-line tool.
//!
//! A store is a single file holding one tree of `i64` in the preorder text
//! format, followed by a newline. A missing file reads as an empty tree.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use rbkit_tree::{NaturalOrder, RBTree, ReadError, ReadOptions};

use crate::config::StoreConfig;

/// Tree type kept by the store.
pub type StoredTree = RBTree<i64>;

/// Store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt tree dump in '{}': {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: ReadError,
    },
}

/// File-backed tree store.
#[derive(Debug, Clone)]
pub struct TreeStore {
    path: PathBuf,
    options: ReadOptions,
}

impl TreeStore {
    pub fn new(path: impl Into<PathBuf>, options: ReadOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.path.clone(), config.read_options())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored tree. A missing file yields an empty tree.
    pub fn load(&self) -> Result<StoredTree, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no tree dump yet, starting empty");
                return Ok(RBTree::new());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let len = file.metadata().map_err(|err| self.io_error(err))?.len();
        let mut reader = BufReader::new(file);
        let tree = RBTree::read_from_stream_with(&mut reader, NaturalOrder, &self.options)
            .map_err(|source| self.corrupt(source))?;

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).map_err(|err| self.io_error(err))?;
        if let Some(pos) = rest.iter().position(|b| !b.is_ascii_whitespace()) {
            let consumed = usize::try_from(len).unwrap_or(usize::MAX).saturating_sub(rest.len());
            return Err(self.corrupt(ReadError::TrailingInput {
                offset: consumed + pos,
            }));
        }

        debug!(path = %self.path.display(), size = tree.size(), "tree loaded");
        Ok(tree)
    }

    /// Write `tree` next to the store file and move it into place.
    pub fn save(&self, tree: &StoredTree) -> Result<(), StoreError> {
        let tmp = self.tmp_path();
        let written = self
            .write_dump(&tmp, tree)
            .and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!(path = %tmp.display(), error = %cleanup, "could not remove temporary dump");
                }
            }
            return Err(self.io_error(err));
        }
        debug!(path = %self.path.display(), size = tree.size(), "tree saved");
        Ok(())
    }

    fn write_dump(&self, path: &Path, tree: &StoredTree) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        tree.save_in_stream(&mut out)?;
        writeln!(out)?;
        out.flush()
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "tree".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt(&self, source: ReadError) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> TreeStore {
        TreeStore::new(dir.path().join("tree.rbt"), ReadOptions::default())
    }

    #[test]
    fn test_missing_file_is_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let tree = store_in(&dir).load().unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut tree = StoredTree::new();
        for v in [8, 18, 5, 15, 17, 25, 40, 80] {
            tree.add(v).unwrap();
        }

        store.save(&tree).unwrap();
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "(17, 0)(8, 1)(5, 0)NN(15, 0)NN(25, 1)(18, 0)NN(40, 0)N(80, 1)NN\n"
        );
        assert!(!dir.path().join("tree.rbt.tmp").exists());

        let back = store.load().unwrap();
        assert_eq!(back, tree);
        assert_eq!(back.size(), 8);
    }

    #[test]
    fn test_corrupt_dump() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "(8, 1)NN\n").unwrap();
        assert!(matches!(
            store.load(),
            Err(StoreError::Corrupt {
                source: ReadError::Invalid(_),
                ..
            })
        ));

        fs::write(store.path(), "(8, 0)NN garbage").unwrap();
        assert!(matches!(
            store.load(),
            Err(StoreError::Corrupt {
                source: ReadError::TrailingInput { offset: 9 },
                ..
            })
        ));
    }

    #[test]
    fn test_trailing_data_offset_counts_from_file_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "(8, 0)(5, 1)NN(18, 1)NN\n\n  x").unwrap();
        let err = store.load().unwrap_err();
        assert!(
            matches!(
                err,
                StoreError::Corrupt {
                    source: ReadError::TrailingInput { offset: 27 },
                    ..
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn test_failed_rename_removes_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the rename fail after the dump is written.
        let target = dir.path().join("tree.rbt");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "").unwrap();
        let store = TreeStore::new(&target, ReadOptions::default());

        let mut tree = StoredTree::new();
        tree.add(1).unwrap();
        assert!(matches!(store.save(&tree), Err(StoreError::Io { .. })));
        assert!(!dir.path().join("tree.rbt.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn test_depth_limit_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            path: dir.path().join("deep.rbt"),
            max_depth: 1,
        };
        let store = TreeStore::from_config(&config);
        fs::write(store.path(), "(8, 0)(5, 1)NN(18, 1)NN").unwrap();
        assert!(matches!(
            store.load(),
            Err(StoreError::Corrupt {
                source: ReadError::TooDeep { max_depth: 1 },
                ..
            })
        ));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = TreeStore::new(dir.path().join("no/such/dir/tree.rbt"), ReadOptions::default());
        let err = store.save(&StoredTree::new()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("tree.rbt"));
    }
}
