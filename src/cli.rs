//! Command line front end

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::config::{self, Config};
use crate::develop::catalog::CATALOG_FILE;
use crate::develop::platform::PROPERTIES_FILE;
use crate::develop::platforms::PLATFORM_QUILT;
use crate::develop::tree::ProjectTree;
use crate::error::UpdateError;
use crate::meta::cache::MetadataCache;
use crate::rewriter::{update_catalog, update_to_version};
use crate::updater::{McModUpdater, VersionUpdateList, fetch_metadata, version_update_list};

/// Temporary file the update is written to before it replaces the original
const UPDATE_FILE: &str = ".update.mcmodupdater";

#[derive(Parser, Debug)]
#[command(name = "mcmodupdater")]
#[command(version, about = "Update loader, API and mappings versions of a Minecraft mod project")]
pub struct Cli {
    /// Print the updated properties file instead of editing it
    #[arg(long)]
    pub dry: bool,

    /// Minecraft version to update to, defaults to the current version
    #[arg(long, value_name = "VERSION")]
    pub mc: Option<String>,

    /// Project directory
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Always fetch metadata and do not write the cache
    #[arg(long)]
    pub no_cache: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write JSON logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_path = config::config_path();
    let config = Config::load(&config_path).context("Failed to load config")?;
    config.save(&config_path).context("Failed to save config")?;

    let cache_dir = (config.cache && !cli.no_cache).then(config::platform_cache_dir);
    let cache = MetadataCache::new(cache_dir);
    let tree = ProjectTree::new(&cli.dir);

    let updater = McModUpdater::new(&config.develop);
    let mut info = updater.load_tree(&tree)?;

    let descriptor = info.platform.descriptor();
    let constituents = info.platform.constituents();
    if constituents.is_empty() {
        eprintln!("[+] Platform: {}", descriptor);
    } else {
        let names: Vec<&str> = constituents.iter().map(|d| d.name).collect();
        eprintln!("[+] Platform: {} ({})", descriptor, names.join(", "));
    }

    eprintln!("[+] Fetching version data...");
    fetch_metadata(&mut info, &cache).await?;

    let list = version_update_list(&info, cli.mc.as_deref());
    eprint!("{}", format_update_list(&list));

    let values = list.change_to_latest();
    let updates = list.updates();
    let uses_catalog = descriptor == PLATFORM_QUILT && tree.exists(CATALOG_FILE);

    if cli.dry {
        let mut stdout = std::io::stdout().lock();
        update_to_version(&mut stdout, &tree, &values)?;
        if uses_catalog {
            writeln!(stdout, "\n# {}", CATALOG_FILE)?;
            update_catalog(&mut stdout, &tree, &updates)?;
        }
        return Ok(());
    }

    if !list.has_updates() {
        eprintln!("[+] Already up to date");
        return Ok(());
    }

    replace_file(&tree, PROPERTIES_FILE, |out| {
        update_to_version(out, &tree, &values)
    })?;
    if uses_catalog {
        replace_file(&tree, CATALOG_FILE, |out| update_catalog(out, &tree, &updates))?;
    }

    eprintln!("[+] Automatic update succeeded");
    Ok(())
}

/// Renders one line per pin, marking the ones that change
pub fn format_update_list(list: &VersionUpdateList) -> String {
    let mut out = String::new();
    for item in list.iter() {
        match &item.latest {
            Some(latest) => out.push_str(&format!(
                "    {} ({}): {} -> {}\n",
                item.key.label(),
                item.key,
                item.current,
                latest
            )),
            None => out.push_str(&format!(
                "    {} ({}): {}\n",
                item.key.label(),
                item.key,
                item.current
            )),
        }
    }
    out
}

/// Writes the new content next to the target, then renames it over the target
fn replace_file<F>(tree: &ProjectTree, relative: &str, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut File) -> Result<(), UpdateError>,
{
    let target = tree.path(relative);
    let temp = target.with_file_name(UPDATE_FILE);

    let mut file =
        File::create(&temp).with_context(|| format!("Failed to open {:?}", temp))?;
    if let Err(e) = write(&mut file) {
        let _ = std::fs::remove_file(&temp);
        return Err(e).with_context(|| format!("Failed to update {}", relative));
    }
    drop(file);

    std::fs::rename(&temp, &target)
        .with_context(|| format!("Failed to move {:?} to {:?}", temp, target))
}
