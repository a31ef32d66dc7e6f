//! Build-phase contributor that expands a single application archive.
//!
//! `unfurl-core` implements the two steps of the contributor: a *detection*
//! step that scans the top level of a source tree for exactly one archive
//! and publishes a contribution request into a shared build plan, and an
//! *expansion* step that extracts the named archive into the tree root and
//! removes the original file.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use unfurl_core::BuildPlan;
//! use unfurl_core::Decision;
//! use unfurl_core::Expander;
//! use unfurl_core::detect;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = Path::new("/workspace/app");
//! let plan = BuildPlan::new();
//!
//! if let Decision::Pass(merged) = detect(root, &plan)? {
//!     if let Some(expander) = Expander::resolve(root, &merged)? {
//!         let report = expander.contribute()?;
//!         println!("expanded {} entries", report.total_entries());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buildplan;
pub mod detect;
pub mod error;
pub mod expand;
pub mod formats;
pub mod paths;
pub mod report;
pub mod test_utils;

// Re-export main API types
pub use buildplan::BuildPlan;
pub use buildplan::Entry;
pub use buildplan::Requirement;
pub use detect::Decision;
pub use detect::detect;
pub use error::ExpandError;
pub use error::Result;
pub use expand::Expander;
pub use formats::ArchiveKind;
pub use report::ExpansionReport;
