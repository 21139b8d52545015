use std::path::Path;

use tokio::fs::{File, OpenOptions};
use tokio::io::{self, AsyncWriteExt};

use crate::download::arena::PartArena;

/// Concatenates the arena's part files, in ascending index order, into the
/// destination. An existing destination is overwritten. On error the
/// destination is left as written so far; there is no atomic rename.
pub async fn merge_parts(arena: &PartArena, part_count: usize, dest: &Path) -> io::Result<()> {
    let mut out = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(dest)
        .await?;

    for index in 0..part_count {
        let mut part = File::open(arena.part_path(index)).await?;
        io::copy(&mut part, &mut out).await?;
    }

    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fill_arena(parts: &[&str]) -> PartArena {
        let arena = PartArena::new().unwrap();
        for (index, content) in parts.iter().enumerate() {
            tokio::fs::write(arena.part_path(index), content).await.unwrap();
        }
        arena
    }

    #[tokio::test]
    async fn should_merge_in_index_order() {
        let arena = fill_arena(&["Hello", " ", "World", "!"]).await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("output.txt");

        merge_parts(&arena, 4, &dest).await.unwrap();

        let merged = tokio::fs::read_to_string(&dest).await.unwrap();
        assert_eq!(merged, "Hello World!");
    }

    #[tokio::test]
    async fn should_overwrite_existing_destination() {
        let arena = fill_arena(&["fresh"]).await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("output.txt");
        tokio::fs::write(&dest, "stale content that is longer").await.unwrap();

        merge_parts(&arena, 1, &dest).await.unwrap();

        let merged = tokio::fs::read_to_string(&dest).await.unwrap();
        assert_eq!(merged, "fresh");
    }

    #[tokio::test]
    async fn should_fail_on_missing_part() {
        let arena = fill_arena(&["only", "two"]).await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("output.txt");

        let result = merge_parts(&arena, 3, &dest).await;

        assert!(result.is_err());
    }
}
