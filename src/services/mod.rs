pub mod archive;
pub mod install;
pub mod registry;
