//!

use std::{fs, path::Path};

use anyhow::{anyhow, bail};

use super::{MenuEntry, MenuIndex};

/// Reads a menu catalog from a `.yaml`/`.yml` or `.json` file.
pub fn load_menu(file_name: &Path) -> anyhow::Result<MenuIndex> {
    let doc = fs::read_to_string(file_name)
        .map_err(|e| anyhow!("Unable to read menu file {}: {e}", file_name.display()))?;

    let extension = file_name
        .extension()
        .ok_or_else(|| anyhow!("File Extension not found"))?
        .to_string_lossy();

    let entries = parse_menu(&doc, extension.as_ref())?;
    let index = MenuIndex::new(entries)?;

    log::info!(
        "Loaded {} menu entries from {}",
        index.entries().len(),
        file_name.display()
    );

    Ok(index)
}

///
fn parse_menu(doc: &str, extension: &str) -> anyhow::Result<Vec<MenuEntry>> {
    match extension {
        "yaml" | "yml" => {
            let entries = serde_yaml::from_str(doc)?;
            Ok(entries)
        }
        "json" => {
            let entries = serde_json::from_str(doc)?;
            Ok(entries)
        }
        _ => bail!("File Extension not supported"),
    }
}
