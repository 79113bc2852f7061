/// Largest file size accepted by default. Seek offsets are signed 64-bit,
/// so anything at or above `i64::MAX` cannot be addressed safely.
pub const MAX_SAFE_FILE_SIZE: u64 = i64::MAX as u64;

/// Knobs for the splice operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpliceOptions {
    /// Files whose size is at or above this limit are rejected with
    /// `FileTooLarge` before anything is written.
    pub max_file_size: u64,
    /// Call `sync_all` after writing or truncating.
    pub sync: bool,
}

impl Default for SpliceOptions {
    fn default() -> Self {
        SpliceOptions {
            max_file_size: MAX_SAFE_FILE_SIZE,
            sync: false,
        }
    }
}

impl SpliceOptions {
    pub fn with_max_file_size(mut self, limit: u64) -> Self {
        self.max_file_size = limit.min(MAX_SAFE_FILE_SIZE);
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}
