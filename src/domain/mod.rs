//! Domain types - pure data shared by the parser, validator and analyzer

pub mod commit;
pub mod version;

pub use commit::{CommitMessage, CommitType, FooterReference, Scope};
pub use version::{next_version, parse_version_from_tag, VersionBump};
