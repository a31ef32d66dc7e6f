//! Archive kind classification from file-name suffixes.

use std::path::Path;

/// Recognized archive kinds, derived from a candidate's file-name suffix.
///
/// Jar, War and Zip share the zip-container decoding strategy; Tar is raw
/// tar; TarGz and Tgz are gzip-then-tar. Suffix matching is case-sensitive
/// and exact-tail; there is no content-sniffing fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Java archive (`.jar`), zip container.
    Jar,
    /// Web application archive (`.war`), zip container.
    War,
    /// Uncompressed tar archive (`.tar`).
    Tar,
    /// Gzip-compressed tar archive (`.tar.gz`).
    TarGz,
    /// Gzip-compressed tar archive, short suffix (`.tgz`).
    Tgz,
    /// ZIP archive (`.zip`).
    Zip,
}

/// Suffix table, in pattern-checking order.
///
/// Detection collects candidates in this order; every recognized suffix
/// maps to exactly one kind.
pub const SUFFIXES: &[(&str, ArchiveKind)] = &[
    (".jar", ArchiveKind::Jar),
    (".war", ArchiveKind::War),
    (".tar", ArchiveKind::Tar),
    (".tar.gz", ArchiveKind::TarGz),
    (".tgz", ArchiveKind::Tgz),
    (".zip", ArchiveKind::Zip),
];

impl ArchiveKind {
    /// Classifies a file name by exact, case-sensitive tail match.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        SUFFIXES
            .iter()
            .copied()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|(_, kind)| kind)
    }

    /// Classifies a path by its file name.
    ///
    /// Returns `None` for paths without a UTF-8 file name or with an
    /// unrecognized suffix.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::from_name)
    }

    /// Returns `true` for kinds decoded as a zip container.
    #[must_use]
    pub const fn is_zip_container(self) -> bool {
        matches!(self, Self::Jar | Self::War | Self::Zip)
    }

    /// Returns `true` for kinds that gzip-decompress before tar decoding.
    #[must_use]
    pub const fn is_gzipped(self) -> bool {
        matches!(self, Self::TarGz | Self::Tgz)
    }
}
