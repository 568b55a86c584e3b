// crates/camerconnect-core/src/loader.rs

//! # Snapshot Loader
//!
//! Handles the physical layer (file I/O, optional gzip) for directory
//! snapshots and delegates parsing to [`Directory::from_json_value`].
//! A snapshot is the saved body of `/api/secteurs/entreprises` (or a bare
//! array of records).

#![cfg(feature = "json")]

use crate::directory::Directory;
use crate::error::{DirectoryError, Result};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::info;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a file, buffers it, and wraps it in a gzip decoder for `.gz` paths.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        DirectoryError::NotFound(format!("snapshot not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(DirectoryError::Config(format!(
                "{} is gzip-compressed but the 'compact' feature is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

impl Directory {
    /// Load a snapshot from disk (`.json` or, with `compact`, `.json.gz`).
    pub fn load_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_stream(path)?;
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        let dir = Directory::from_json_value(value)?;
        info!(
            path = %path.display(),
            sectors = dir.sectors().len(),
            businesses = dir.all_records().len(),
            "directory snapshot loaded"
        );
        Ok(dir)
    }

    /// Write the directory back out as JSON (pretty-printed, normalized form).
    pub fn save_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        let mut map = serde_json::Map::new();
        for sector in self.sectors() {
            let records = self.records_of(sector);
            map.insert(sector.name.clone(), serde_json::to_value(records)?);
        }
        serde_json::to_writer_pretty(&mut file, &map)?;
        file.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_path(prefix: &str, ext: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("camerconnect-{prefix}-{nanos}.{ext}"))
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Directory::load_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[test]
    fn saved_snapshot_loads_back() {
        let path = unique_test_path("roundtrip", "json");
        let dir = Directory::from_json_str(
            r#"{"Artisans":[{"id":"2","name":"Atelier Bois Précieux","location":"Yaoundé, Mfoundi","rating":4.8,"reviews":67}]}"#,
        )
        .unwrap();
        dir.save_json_file(&path).expect("should save snapshot");

        let loaded = Directory::load_json_file(&path).expect("should load snapshot");
        assert_eq!(loaded.sector_names().collect::<Vec<_>>(), vec!["Artisans"]);
        let rec = loaded.find("2").unwrap();
        assert_eq!(rec.review_count, 67);
        assert_eq!(rec.location, "Yaoundé, Mfoundi");

        std::fs::remove_file(&path).expect("should cleanup snapshot");
    }

    #[test]
    fn saved_snapshot_keeps_shared_listings() {
        let path = unique_test_path("shared", "json");
        let dir = Directory::from_json_str(
            r#"{"Artisans":[{"id":"2","name":"Atelier"}],"Commerce":[{"id":"2","name":"Atelier"},{"id":"5","name":"Quincaillerie"}]}"#,
        )
        .unwrap();
        dir.save_json_file(&path).expect("should save snapshot");

        let loaded = Directory::load_json_file(&path).expect("should load snapshot");
        assert_eq!(loaded.sector("Commerce").unwrap().len(), 2);
        assert_eq!(loaded.all_records().len(), 2);

        std::fs::remove_file(&path).expect("should cleanup snapshot");
    }

    #[cfg(feature = "compact")]
    #[test]
    fn gzip_snapshots_are_decompressed() {
        use flate2::{write::GzEncoder, Compression};

        let path = unique_test_path("gzip", "json.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(br#"[{"id":"1","name":"Lamana"}]"#).unwrap();
        enc.finish().unwrap();

        let dir = Directory::load_json_file(&path).expect("should load gz snapshot");
        assert_eq!(dir.all_records()[0].name, "Lamana");

        std::fs::remove_file(&path).expect("should cleanup snapshot");
    }
}
