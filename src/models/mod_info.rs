use serde::{Deserialize, Serialize};

use crate::api::curseforge::schema;

/// A mod as presented to the user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ModInfo {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub summary: String,
    pub download_count: u64,
    pub main_file_id: u32,
    /// Game versions with a latest file, in API order and without duplicates.
    pub supported_versions: Vec<String>,
    pub latest_files: Vec<ModFile>,
}

/// A downloadable file of a mod.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ModFile {
    pub id: u32,
    pub display_name: String,
    pub file_name: String,
    pub file_length: u64,
    /// `None` when the author has opted out of third-party distribution.
    pub url: Option<String>,
    pub game_versions: Vec<String>,
}

impl ModFile {
    pub fn supports(&self, game_version: &str) -> bool {
        self.game_versions.iter().any(|v| v == game_version)
    }
}

impl From<schema::File> for ModFile {
    fn from(file: schema::File) -> Self {
        Self {
            id: file.id,
            display_name: file.display_name,
            file_name: file.file_name,
            file_length: file.file_length,
            url: file.download_url.filter(|url| !url.is_empty()),
            game_versions: file.game_versions,
        }
    }
}

impl From<schema::Mod> for ModInfo {
    fn from(m: schema::Mod) -> Self {
        // One index entry per (version, loader) pair.
        let mut supported_versions: Vec<String> = Vec::new();
        for index in &m.latest_files_indexes {
            if !supported_versions.contains(&index.game_version) {
                supported_versions.push(index.game_version.clone());
            }
        }

        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            summary: m.summary,
            download_count: m.download_count,
            main_file_id: m.main_file_id,
            supported_versions,
            latest_files: m.latest_files.into_iter().map(ModFile::from).collect(),
        }
    }
}
