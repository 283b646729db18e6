use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};

use obmod::config::GameConfig;
use obmod::services::archive::ArchiveFormat;
use obmod::services::install::{
    install_batch, installed_custom_plugins, installed_pak_mods, uninstall_pak_set,
    uninstall_plugin, InstalledContent, SelectionPolicy,
};
use obmod::services::registry;

#[derive(Parser)]
#[command(
    name = "obmod",
    version,
    about = "Archive-driven mod installer for Oblivion Remastered"
)]
struct Cli {
    /// Game install directory (overrides config file and default).
    #[arg(long, global = true)]
    game_dir: Option<PathBuf>,

    /// JSON config file with the game install location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Install mods from one or more archives.
    Install {
        /// Mod archives (.zip/.7z/.rar).
        #[arg(required = true)]
        archives: Vec<PathBuf>,

        /// Pick candidate N (1-based) instead of the first one.
        #[arg(long)]
        select: Option<usize>,
    },
    /// Show installed custom plugins and pak mods.
    List,
    /// Unregister and delete an installed ESP plugin.
    UninstallEsp {
        /// Plugin file name, e.g. CoolQuest.esp
        name: String,
    },
    /// Delete an installed pak trio by its main .pak file name.
    UninstallPak {
        /// Pak file name, e.g. pack.pak
        name: String,
    },
    /// Reorder the custom plugin section of plugins.txt.
    ///
    /// Takes the new order as 1-based positions into the current custom
    /// list, e.g. `obmod order 3 1 2`.
    Order {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
}

fn resolve_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    if let Some(game_dir) = &cli.game_dir {
        return Ok(GameConfig::new(game_dir.clone()));
    }
    if let Some(config_path) = &cli.config {
        return Ok(GameConfig::load(config_path)?);
    }
    Ok(GameConfig::default())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Install { archives, select } => {
            let policy = match select {
                Some(0) => bail!("--select is 1-based"),
                Some(n) => SelectionPolicy::Index(n - 1),
                None => SelectionPolicy::First,
            };
            log::info!(
                "supported archive formats: {}",
                ArchiveFormat::supported_extensions().join(", ")
            );

            let results = install_batch(&config, &archives, policy);
            let mut failures = 0usize;
            for (archive, result) in &results {
                match result {
                    Ok(InstalledContent::Plugin(name)) => {
                        println!("{}: installed plugin '{name}'", archive.display());
                    }
                    Ok(InstalledContent::PakSet(name)) => {
                        println!("{}: installed pak set '{name}'", archive.display());
                    }
                    Err(e) => {
                        eprintln!("{}: {e}", archive.display());
                        failures += 1;
                    }
                }
            }
            if failures > 0 {
                bail!("{failures} of {} archive(s) failed", results.len());
            }
        }
        Command::List => {
            println!("Installed custom ESP mods (order matters):");
            let plugins = installed_custom_plugins(&config)?;
            if plugins.is_empty() {
                println!("  none");
            }
            for (i, plugin) in plugins.iter().enumerate() {
                println!("  {}: {plugin}", i + 1);
            }

            println!("Installed pak mods (order ignored):");
            let paks = installed_pak_mods(&config)?;
            if paks.is_empty() {
                println!("  none");
            }
            for pak in &paks {
                println!("  - {pak}");
            }
        }
        Command::UninstallEsp { name } => {
            uninstall_plugin(&config, &name)?;
            println!("uninstalled '{name}'");
        }
        Command::UninstallPak { name } => {
            uninstall_pak_set(&config, &name)?;
            println!("uninstalled '{name}'");
        }
        Command::Order { positions } => {
            if positions.iter().any(|&p| p == 0) {
                bail!("positions are 1-based");
            }
            let zero_based: Vec<usize> = positions.iter().map(|&p| p - 1).collect();
            let final_list = registry::reorder_custom(&config.plugins_txt_path(), &zero_based)?;
            println!("new load order:");
            for plugin in &final_list {
                println!("  {plugin}");
            }
        }
    }
    Ok(())
}
