use thiserror::Error;

#[derive(Error, Debug)]
pub enum McmmError {
    #[error("Failed to access Curseforge API: {0}")]
    CurseforgeApiError(String),

    #[error("Can't find any mod called {0}")]
    NoModsFound(String),

    #[error("A mod name or ID must not be empty")]
    EmptyModQuery,

    #[error("Can't find {name} ({id}) in version {version}")]
    NoCompatibleModFiles {
        name: String,
        id: u32,
        version: String,
    },

    #[error("{name} ({id}) has no default file")]
    NoDefaultFile { name: String, id: u32 },

    #[error("Curseforge returned no download URL for file {file_id} of mod {mod_id}")]
    MissingDownloadUrl { mod_id: u32, file_id: u32 },

    #[error("Refusing to save a file named '{0}'")]
    InvalidFileName(String),

    #[error(
        "Curseforge API key not found. Please set the CURSEFORGE_API_KEY environment variable or add api_key to {0}"
    )]
    ApiKeyNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{failed} of {total} downloads failed")]
    DownloadsFailed { failed: usize, total: usize },

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] toml::de::Error),
}
