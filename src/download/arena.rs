use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::io;

/// Scoped temporary directory owning one slot per planned part.
///
/// Part files are written by the fetchers as `part-{index}` and read back by
/// the merger in index order. Dropping the arena removes the directory and
/// everything in it, so temporary storage never outlives the download that
/// created it, on success and failure alike.
pub struct PartArena {
    dir: TempDir,
}

impl PartArena {
    pub fn new() -> io::Result<Self> {
        Self::new_in(std::env::temp_dir())
    }

    /// Arena rooted under a specific parent directory instead of the system
    /// temp location.
    pub fn new_in(parent: impl AsRef<Path>) -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("parget-")
            .tempdir_in(parent)?;
        Ok(Self { dir })
    }

    pub fn part_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("part-{}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_remove_directory_on_drop() {
        let arena = PartArena::new().unwrap();
        let path = arena.part_path(0);

        tokio::fs::write(&path, b"partial").await.unwrap();
        assert!(path.exists());

        let dir = arena.dir.path().to_path_buf();
        drop(arena);

        assert!(!dir.exists());
        assert!(!path.exists());
    }

    #[test]
    fn should_root_under_given_parent() {
        let parent = tempfile::tempdir().unwrap();
        let arena = PartArena::new_in(parent.path()).unwrap();

        assert!(arena.dir.path().starts_with(parent.path()));

        drop(arena);
        let mut entries = std::fs::read_dir(parent.path()).unwrap();
        assert!(entries.next().is_none());
    }

    #[test]
    fn should_index_slots() {
        let arena = PartArena::new().unwrap();

        let first = arena.part_path(0);
        let second = arena.part_path(1);

        assert_ne!(first, second);
        assert!(first.ends_with("part-0"));
        assert!(second.ends_with("part-1"));
    }
}
