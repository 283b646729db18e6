//! Archive-driven mod installer for Oblivion Remastered.
//!
//! The core lives under [`services::archive`]: it opens a mod archive
//! (zip/7z/rar), normalizes its layout, classifies installable content
//! (ESP plugins and pak trios) and extracts a selected subset. The
//! surrounding collaborators ([`services::registry`],
//! [`services::install`]) copy files into the game tree and maintain
//! the plugins.txt load-order list.

pub mod config;
pub mod services;
pub mod types;
