//! Archive-content resolution for mod archives.
//!
//! - Lists entries uniformly across zip/7z/rar.
//! - Detects a single wrapping folder and strips it for classification.
//! - Groups entries into installable units (ESP plugins, pak trios).
//! - Extracts a named subset of entries, preserving relative structure.

mod classify;
mod extract;
mod layout;
mod list;
mod types;

pub use classify::{collect_pak_sets, collect_plugins, find_pak_sets, find_plugins};
pub use extract::extract_entries;
pub use layout::detect_wrapping_prefix;
pub use list::list_entries;
pub use types::{ArchiveEntry, ArchiveFormat, PakSet};
