//! Save file persistence.
//!
//! Saves are single JSON files. Partial files load fine: every player
//! field defaults to its fresh-player value at deserialization.

use std::fs;
use std::path::Path;

use nightswarm_core::records::SaveData;

pub fn save_to_file(path: &Path, data: &SaveData) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| format!("Failed to create save directory: {e}"))?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("Failed to serialize save data: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write save file: {e}"))?;
    Ok(())
}

pub fn load_from_file(path: &Path) -> Result<SaveData, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("Failed to read save file: {e}"))?;
    let data: SaveData =
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse save data: {e}"))?;
    Ok(data)
}
