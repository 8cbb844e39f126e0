//! Leaderboard persistence with a checksummed binary format.

use super::types::HighScores;
use crate::core::constants::SCORES_VERSION_MAGIC;
use crate::utils::persistence::data_dir;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Version magic plus payload length.
const HEADER_LEN: u64 = 8 + 4;
/// SHA-256 digest.
const CHECKSUM_LEN: u64 = 32;

/// Saves and loads the leaderboard file.
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Store at `scores.dat` in the platform data directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self::at(data_dir()?.join("scores.dat")))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the leaderboard.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Bincode payload (variable length)
    /// - SHA256 checksum of everything above (32 bytes)
    pub fn save(&self, scores: &HighScores) -> io::Result<()> {
        let data =
            bincode::serialize(scores).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = u32::try_from(data.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Leaderboard too large"))?;

        let mut hasher = Sha256::new();
        hasher.update(SCORES_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&self.path)?;
        file.write_all(&SCORES_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        log::info!("High scores saved ({} entries)", scores.entries.len());
        Ok(())
    }

    /// Read the leaderboard.
    ///
    /// Returns an error if:
    /// - The file doesn't exist
    /// - The version magic is incorrect
    /// - The stored length does not match the file size
    /// - The checksum verification fails
    /// - The data cannot be deserialized
    pub fn load(&self) -> io::Result<HighScores> {
        let mut file = fs::File::open(&self.path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SCORES_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid scores version: expected 0x{:016X}, got 0x{:016X}",
                    SCORES_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        // Header + payload + checksum must account for the whole file
        let expected_len = HEADER_LEN + u64::from(data_len) + CHECKSUM_LEN;
        let file_len = file.metadata()?.len();
        if file_len != expected_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Scores length mismatch: header claims {} bytes, file has {}",
                    expected_len, file_len
                ),
            ));
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Load, falling back to an empty board when the file is missing or bad.
    pub fn load_or_default(&self, capacity: usize) -> HighScores {
        match self.load() {
            Ok(mut scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores.capacity = capacity;
                scores.entries.truncate(capacity);
                scores
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                HighScores::new(capacity)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable scores at {}: {}", self.path.display(), e);
                HighScores::new(capacity)
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove the file. Missing files are fine.
    pub fn delete(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scores() -> HighScores {
        let mut scores = HighScores::new(10);
        scores.add_score(12, 4000, 1_700_000_000);
        scores.add_score(4, 900, 1_700_000_100);
        scores
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::at(dir.path().join("scores.dat"));
        assert!(!store.exists());

        let original = sample_scores();
        store.save(&original).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_checksum_detects_tampering() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::at(dir.path().join("scores.dat"));
        store.save(&sample_scores()).unwrap();

        let mut bytes = fs::read(store.path()).unwrap();
        // Flip a byte inside the payload
        bytes[14] ^= 0xFF;
        fs::write(store.path(), &bytes).unwrap();

        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::at(dir.path().join("scores.dat"));
        fs::write(store.path(), [0u8; 64]).unwrap();

        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("Invalid scores version"));
    }

    #[test]
    fn test_oversized_length_rejected_before_reading_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::at(dir.path().join("scores.dat"));
        store.save(&sample_scores()).unwrap();

        let mut bytes = fs::read(store.path()).unwrap();
        bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
        fs::write(store.path(), &bytes).unwrap();

        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("length mismatch"));
    }

    #[test]
    fn test_load_or_default_on_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::at(dir.path().join("scores.dat"));
        assert!(store.load_or_default(5).is_empty());

        fs::write(store.path(), b"garbage").unwrap();
        let scores = store.load_or_default(5);
        assert!(scores.is_empty());
        assert_eq!(scores.capacity, 5);
    }

    #[test]
    fn test_load_or_default_applies_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::at(dir.path().join("scores.dat"));
        store.save(&sample_scores()).unwrap();

        let scores = store.load_or_default(1);
        assert_eq!(scores.capacity, 1);
        assert_eq!(scores.entries.len(), 1);
        assert_eq!(scores.top_score(), Some(12));
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::at(dir.path().join("scores.dat"));
        store.delete().unwrap();
        store.save(&sample_scores()).unwrap();
        store.delete().unwrap();
        assert!(!store.exists());
    }
}
