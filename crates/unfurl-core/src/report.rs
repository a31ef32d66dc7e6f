//! Expansion outcome statistics.

use serde::Serialize;

/// Statistics from a successful expansion.
///
/// Observability only; nothing here is durable pipeline state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpansionReport {
    /// Number of regular files written.
    pub files_extracted: usize,
    /// Number of directories created.
    pub directories_created: usize,
    /// Number of symlinks created.
    pub symlinks_created: usize,
    /// Total bytes of file content written.
    pub bytes_written: u64,
}

impl ExpansionReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries materialized on disk.
    #[must_use]
    pub const fn total_entries(&self) -> usize {
        self.files_extracted + self.directories_created + self.symlinks_created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_entries() {
        let report = ExpansionReport {
            files_extracted: 3,
            directories_created: 2,
            symlinks_created: 1,
            bytes_written: 42,
        };
        assert_eq!(report.total_entries(), 6);
    }

    #[test]
    fn test_new_is_empty() {
        let report = ExpansionReport::new();
        assert_eq!(report.total_entries(), 0);
        assert_eq!(report.bytes_written, 0);
    }
}
