//! Map discovery and loading from disk.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use dungeon_chase_world::MapDefinition;

/// Lists the `.txt` files directly inside `dir`, sorted by file name.
pub(crate) fn discover(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read maps directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to list maps directory {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            files.push(name.to_owned());
        }
    }
    files.sort();
    log::debug!("found {} maps in {}", files.len(), dir.display());
    Ok(files)
}

/// Reads and validates a map file.
pub(crate) fn load(path: &Path) -> Result<MapDefinition> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read map file {}", path.display()))?;
    MapDefinition::parse(&contents)
        .with_context(|| format!("failed to load map {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bundled_maps() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../maps")
    }

    #[test]
    fn discovers_bundled_maps_in_order() {
        let files = discover(&bundled_maps()).expect("bundled maps directory");
        assert!(!files.is_empty());
        assert!(files.iter().all(|name| name.ends_with(".txt")));
        assert!(files.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn every_bundled_map_loads() {
        let dir = bundled_maps();
        for name in discover(&dir).expect("bundled maps directory") {
            let map = load(&dir.join(&name)).unwrap_or_else(|error| panic!("{name}: {error:#}"));
            assert!(map.grid().gold_required() <= map.grid().gold_remaining());
        }
    }

    #[test]
    fn missing_directory_is_reported() {
        let error = discover(Path::new("no/such/maps")).expect_err("missing directory");
        assert!(error.to_string().contains("no/such/maps"));
    }
}
