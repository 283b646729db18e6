use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extension of a plugin file (lowercase, no dot).
pub const PLUGIN_EXTENSION: &str = "esp";

/// Extensions of the three companion files forming one pak trio.
pub const PAK_EXTENSIONS: [&str; 3] = ["pak", "ucas", "utoc"];

/// Supported container format, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveFormat {
    Zip,
    SevenZ,
    Rar,
}

impl ArchiveFormat {
    /// Detect format from file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "zip" => Some(Self::Zip),
            "7z" => Some(Self::SevenZ),
            "rar" => Some(Self::Rar),
            _ => None,
        }
    }

    /// Whether the codec for this format is compiled in.
    pub fn codec_available(self) -> bool {
        match self {
            Self::Zip => true,
            Self::SevenZ => cfg!(feature = "sevenz-support"),
            Self::Rar => cfg!(feature = "rar-support"),
        }
    }

    /// Extensions (with leading dot) of all formats whose codecs are
    /// compiled in.
    pub fn supported_extensions() -> Vec<&'static str> {
        let mut exts = vec![".zip"];
        if cfg!(feature = "sevenz-support") {
            exts.push(".7z");
        }
        if cfg!(feature = "rar-support") {
            exts.push(".rar");
        }
        exts
    }
}

/// One archive member as reported by the reader. Paths are relative to
/// the archive root and forward-slash separated regardless of source
/// format; original case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub path: String,
    pub is_dir: bool,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, is_dir: bool) -> Self {
        Self {
            path: path.into(),
            is_dir,
        }
    }
}

/// A complete pak trio: three companion files sharing directory and base
/// name. All three members are always present; incomplete groups never
/// become a `PakSet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PakSet {
    pub pak: String,
    pub ucas: String,
    pub utoc: String,
}

impl PakSet {
    /// Archive paths of all three members.
    pub fn members(&self) -> [&str; 3] {
        [&self.pak, &self.ucas, &self.utoc]
    }

    /// File name of the main `.pak` member, used as the trio's display
    /// and install name.
    pub fn pak_file_name(&self) -> &str {
        self.pak.rsplit('/').next().unwrap_or(&self.pak)
    }
}

/// Archive file name for diagnostics, falling back to the full path.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
