use serde::{Deserialize, Serialize};

/// Response from GET /v1/mods/{modId}
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GetModResponse {
    pub data: Mod,
}

/// Response from GET /v1/mods/search
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchModsResponse {
    pub data: Vec<Mod>,
    pub pagination: Option<Pagination>,
}

/// Response from GET /v1/mods/{modId}/files
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GetModFilesResponse {
    pub data: Vec<File>,
    pub pagination: Option<Pagination>,
}

/// Response from GET /v1/mods/{modId}/files/{fileId}
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GetModFileResponse {
    pub data: File,
}

/// Response from GET /v1/mods/{modId}/files/{fileId}/download-url
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GetDownloadUrlResponse {
    pub data: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Mod {
    pub id: u32,
    #[serde(rename = "gameId")]
    pub game_id: u32,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "downloadCount", default)]
    pub download_count: u64,
    #[serde(rename = "classId")]
    pub class_id: Option<u32>,
    #[serde(rename = "mainFileId")]
    pub main_file_id: u32,
    #[serde(rename = "latestFiles", default)]
    pub latest_files: Vec<File>,
    #[serde(rename = "latestFilesIndexes", default)]
    pub latest_files_indexes: Vec<FileIndex>,
    #[serde(rename = "allowModDistribution")]
    pub allow_mod_distribution: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileIndex {
    #[serde(rename = "gameVersion")]
    pub game_version: String,
    #[serde(rename = "fileId")]
    pub file_id: u32,
    pub filename: String,
    #[serde(rename = "releaseType")]
    pub release_type: FileReleaseType,
    #[serde(rename = "modLoader")]
    pub mod_loader: Option<ModLoaderType>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(from = "u32", into = "u32")]
pub enum ModLoaderType {
    Any = 0,
    Forge = 1,
    Cauldron = 2,
    LiteLoader = 3,
    Fabric = 4,
    Quilt = 5,
    NeoForge = 6,
}

impl From<u32> for ModLoaderType {
    fn from(val: u32) -> Self {
        match val {
            1 => ModLoaderType::Forge,
            2 => ModLoaderType::Cauldron,
            3 => ModLoaderType::LiteLoader,
            4 => ModLoaderType::Fabric,
            5 => ModLoaderType::Quilt,
            6 => ModLoaderType::NeoForge,
            _ => ModLoaderType::Any,
        }
    }
}

impl From<ModLoaderType> for u32 {
    fn from(loader_type: ModLoaderType) -> Self {
        loader_type as u32
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct File {
    pub id: u32,
    #[serde(rename = "modId")]
    pub mod_id: u32,
    #[serde(rename = "isAvailable", default = "default_true")]
    pub is_available: bool,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "releaseType")]
    pub release_type: FileReleaseType,
    #[serde(rename = "fileDate", default)]
    pub file_date: String,
    #[serde(rename = "fileLength", default)]
    pub file_length: u64,
    #[serde(rename = "downloadUrl")]
    pub download_url: Option<String>,
    #[serde(rename = "gameVersions", default)]
    pub game_versions: Vec<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(from = "u32", into = "u32")]
pub enum FileReleaseType {
    Release = 1,
    Beta = 2,
    Alpha = 3,
}

impl From<u32> for FileReleaseType {
    fn from(val: u32) -> Self {
        match val {
            2 => FileReleaseType::Beta,
            3 => FileReleaseType::Alpha,
            _ => FileReleaseType::Release,
        }
    }
}

impl From<FileReleaseType> for u32 {
    fn from(release_type: FileReleaseType) -> Self {
        release_type as u32
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pagination {
    pub index: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "resultCount")]
    pub result_count: u32,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}
