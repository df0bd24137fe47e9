//! Blob Storage Seam
//!
//! Durable persistence is an opaque key/value blob store: events, anomalies,
//! and the baseline are independently-keyed JSON blobs. The store is the
//! best-effort snapshot reloaded at process start; in-memory state stays the
//! source of truth while running.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

// Blob keys
pub const KEY_EVENTS: &str = "network_events";
pub const KEY_ANOMALIES: &str = "network_anomalies";
pub const KEY_BASELINE: &str = "network_baseline";

/// Opaque get/set blob store.
///
/// `Send` because the persistence worker owns its store on a background
/// thread.
pub trait BlobStore: Send {
    /// Read a blob, `None` when the key was never written
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    /// Write a blob, replacing any previous value
    fn set(&self, key: &str, value: &[u8]) -> io::Result<()>;
}

// ============================================================================
// FILE-BACKED STORE
// ============================================================================

/// One JSON file per key under a data directory
pub struct FileBlobStore {
    base_dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(base_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &[u8]) -> io::Result<()> {
        // Write-then-rename so a crash mid-write cannot truncate the blob.
        let final_path = self.path_for(key);
        let tmp_path = self.base_dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &final_path)
    }
}

// ============================================================================
// IN-MEMORY STORE (tests and embedders)
// ============================================================================

/// HashMap-backed store. Cloning shares the underlying map so tests can
/// hand one handle to the persistence worker and inspect the other.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &[u8]) -> io::Result<()> {
        self.blobs.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileBlobStore::new(dir.path().to_path_buf()).unwrap();

        assert!(store.get(KEY_EVENTS).is_none());
        store.set(KEY_EVENTS, b"[1,2,3]").unwrap();
        assert_eq!(store.get(KEY_EVENTS).as_deref(), Some(&b"[1,2,3]"[..]));

        // Overwrite replaces
        store.set(KEY_EVENTS, b"[]").unwrap();
        assert_eq!(store.get(KEY_EVENTS).as_deref(), Some(&b"[]"[..]));
    }

    #[test]
    fn test_memory_store_shares_state_across_clones() {
        let a = MemoryBlobStore::new();
        let b = a.clone();
        a.set(KEY_BASELINE, b"x").unwrap();
        assert_eq!(b.get(KEY_BASELINE).as_deref(), Some(&b"x"[..]));
    }
}
