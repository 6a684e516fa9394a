use crate::error::Result;
use crate::stock::sec::ownership::OwnershipRow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Reads a snapshot of previously-collected rows from `path`.
pub async fn read_snapshot(path: &Path) -> Result<Vec<OwnershipRow>> {
    trace!("reading snapshot at {path:?}");
    let file = tokio::fs::read(path).await?;
    trace!("snapshot read; deserializing bytes ...");
    let rows: Vec<OwnershipRow> = bincode::deserialize(&file)?;
    debug!("{} rows loaded from {path:?}", rows.len());
    Ok(rows)
}

/// Writes `rows` to `path` as a snapshot.
///
/// The rows go to a sibling `.tmp` file first, which is then renamed over `path`, so a
/// reader never observes a partially written snapshot. Parent directories are created
/// as necessary.
pub async fn write_snapshot(path: &Path, rows: &[OwnershipRow]) -> Result<()> {
    let bytes = bincode::serialize(rows)?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }

    let tmp = tmp_path(path);
    trace!("writing {} rows to {tmp:?}", rows.len());
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    debug!("snapshot saved to {path:?}");

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Document URLs recorded by a previous run; any document listed here is not fetched again.
#[derive(Debug, Default, Clone)]
pub struct SeenIndex(HashSet<String>);

impl SeenIndex {
    pub fn from_rows(rows: &[OwnershipRow]) -> Self {
        Self(rows.iter().map(|row| row.url.clone()).collect())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.0.contains(url)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(owner: &str, url: &str, day: u32) -> OwnershipRow {
        OwnershipRow {
            owner: owner.into(),
            url: url.into(),
            total: 1234.5,
            is_director: true,
            is_officer: false,
            is_ten_percent_owner: false,
            is_other: true,
            date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn snapshot_survives_a_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("AAPL.bin");
        let rows = vec![row("DOE JANE", "a.xml", 5), row("ROE RICHARD", "b.xml", 6)];

        write_snapshot(&path, &rows).await.unwrap();
        assert!(!tmp_path(&path).exists());
        assert_eq!(read_snapshot(&path).await.unwrap(), rows);
    }

    #[tokio::test]
    async fn a_later_write_replaces_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AAPL.bin");

        write_snapshot(&path, &[row("DOE JANE", "a.xml", 5)]).await.unwrap();
        write_snapshot(&path, &[]).await.unwrap();
        assert!(read_snapshot(&path).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn garbage_is_a_snapshot_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AAPL.bin");
        tokio::fs::write(&path, b"\xff\xff\xff\xff\xff\xff\xff\xff\xff")
            .await
            .unwrap();
        assert!(matches!(
            read_snapshot(&path).await,
            Err(crate::SpiderError::Snapshot(_))
        ));
    }

    #[test]
    fn seen_index_is_the_url_column() {
        let rows = vec![
            row("DOE JANE", "a.xml", 5),
            row("DOE JANE", "a.xml", 6),
            row("ROE RICHARD", "b.xml", 6),
        ];
        let seen = SeenIndex::from_rows(&rows);
        assert_eq!(seen.len(), 2);
        assert!(seen.contains("a.xml"));
        assert!(!seen.contains("c.xml"));
    }
}
