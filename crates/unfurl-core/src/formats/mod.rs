//! Archive format classification and per-format extraction.

pub mod kind;
pub mod tar;
pub mod zip;

pub use kind::ArchiveKind;
