//! Game path configuration.
//!
//! The archive core takes only an archive path and a target directory;
//! everything that knows where the game lives is concentrated here and
//! passed explicitly into the collaborator layer.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::errors::{AppError, AppResult};

/// Plugins that ship with the game. They stay pinned at the top of
/// plugins.txt and are never offered for uninstall or reorder.
/// Names are stored lowercased; compare case-insensitively.
pub const DEFAULT_PLUGINS: [&str; 14] = [
    "oblivion.esm",
    "dlcbattlehorncastle.esp",
    "dlcfrostcrag.esp",
    "dlchorsearmor.esp",
    "dlcmehrunesrazor.esp",
    "dlcorrery.esp",
    "dlcshiveringisles.esp",
    "dlcspelltomes.esp",
    "dlcthievesden.esp",
    "dlcvilelair.esp",
    "knights.esp",
    "altarespmain.esp",
    "altardeluxe.esp",
    "altaresplocal.esp",
];

/// Default Steam install location on Windows.
pub const DEFAULT_GAME_BASE: &str =
    r"C:\Program Files (x86)\Steam\steamapps\common\Oblivion Remastered";

/// Resolved game paths. Loadable from a small JSON file so the install
/// location is not baked into the binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub game_base_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_base_path: PathBuf::from(DEFAULT_GAME_BASE),
        }
    }
}

impl GameConfig {
    pub fn new(game_base_path: impl Into<PathBuf>) -> Self {
        Self {
            game_base_path: game_base_path.into(),
        }
    }

    /// Read config from a JSON file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read '{}': {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("failed to parse '{}': {e}", path.display())))
    }

    fn content_dir(&self) -> PathBuf {
        self.game_base_path.join("OblivionRemastered").join("Content")
    }

    /// Directory holding ESP plugin files.
    pub fn esp_data_dir(&self) -> PathBuf {
        self.content_dir().join("Dev").join("ObvData").join("Data")
    }

    /// The load-order registry file.
    pub fn plugins_txt_path(&self) -> PathBuf {
        self.esp_data_dir().join("plugins.txt")
    }

    /// Flat directory holding installed pak trios.
    pub fn pak_mods_dir(&self) -> PathBuf {
        self.content_dir().join("Paks").join("~mods")
    }
}

/// Whether a plugin name belongs to the pinned default set.
pub fn is_default_plugin(name: &str) -> bool {
    let lower = name.to_lowercase();
    DEFAULT_PLUGINS.contains(&lower.as_str())
}
