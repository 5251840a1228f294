pub mod schema;

use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::models::config::Settings;
use crate::models::mod_info::{ModFile, ModInfo};
use crate::utils::errors::McmmError;

const MINECRAFT_GAME_ID: u32 = 432;
/// Class id of "Mods" (as opposed to modpacks, resource packs, worlds...).
const MINECRAFT_MODS_CLASS_ID: u32 = 6;

pub struct CurseforgeClient {
    client: reqwest::Client,
    /// Used for file downloads so the API key never reaches the CDN.
    cdn: reqwest::Client,
    base_url: Url,
}

impl CurseforgeClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_api_key()?;
        Self::with_api_key(&settings.api_url, api_key)
    }

    /// Creates a client for an explicit base URL, e.g. a mock server.
    pub fn with_api_key(base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).context("API key is not a valid header value")?,
        );

        let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;
        let cdn = reqwest::Client::builder().user_agent(user_agent).build()?;

        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid Curseforge API URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!(McmmError::InvalidConfig(format!(
                "Curseforge API URL cannot be used as a base: {}",
                base_url
            ))));
        }

        Ok(Self {
            client,
            cdn,
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!(%url, "GET {}", what);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Curseforge API for {}", what))?;

        if !response.status().is_success() {
            return Err(anyhow!(McmmError::CurseforgeApiError(format!(
                "API request for {} failed with status: {}",
                what,
                response.status()
            ))));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} from Curseforge API", what))
    }

    pub async fn search_mods(
        &self,
        query: &str,
        minecraft_version: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<Vec<schema::Mod>> {
        // An empty filter matches every mod.
        if query.trim().is_empty() {
            return Err(anyhow!(McmmError::EmptyModQuery));
        }

        let mut url = self.endpoint(&["mods", "search"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("gameId", &MINECRAFT_GAME_ID.to_string())
                .append_pair("classId", &MINECRAFT_MODS_CLASS_ID.to_string())
                .append_pair("searchFilter", query);
            if let Some(version) = minecraft_version {
                pairs.append_pair("gameVersion", version);
            }
            if let Some(size) = page_size {
                pairs.append_pair("pageSize", &size.to_string());
            }
        }

        let result: schema::SearchModsResponse = self
            .get_json(url, &format!("search query '{}'", query))
            .await?;

        info!(query, hits = result.data.len(), "search finished");
        Ok(result.data)
    }

    pub async fn get_mod_info(&self, mod_id: u32) -> Result<schema::Mod> {
        let url = self.endpoint(&["mods", &mod_id.to_string()]);

        let response: schema::GetModResponse = self
            .get_json(url, &format!("mod ID {}", mod_id))
            .await?;

        Ok(response.data)
    }

    pub async fn get_mod_files(
        &self,
        mod_id: u32,
        minecraft_version: Option<&str>,
    ) -> Result<Vec<schema::File>> {
        let mut url = self.endpoint(&["mods", &mod_id.to_string(), "files"]);
        if let Some(version) = minecraft_version {
            url.query_pairs_mut().append_pair("gameVersion", version);
        }

        let response: schema::GetModFilesResponse = self
            .get_json(url, &format!("files of mod ID {}", mod_id))
            .await?;

        Ok(response.data)
    }

    pub async fn get_mod_file(&self, mod_id: u32, file_id: u32) -> Result<schema::File> {
        let url = self.endpoint(&["mods", &mod_id.to_string(), "files", &file_id.to_string()]);

        let response: schema::GetModFileResponse = self
            .get_json(url, &format!("file ID {} of mod ID {}", file_id, mod_id))
            .await?;

        Ok(response.data)
    }

    pub async fn get_download_url(&self, mod_id: u32, file_id: u32) -> Result<String> {
        let url = self.endpoint(&[
            "mods",
            &mod_id.to_string(),
            "files",
            &file_id.to_string(),
            "download-url",
        ]);

        let response: schema::GetDownloadUrlResponse = self
            .get_json(
                url,
                &format!("download URL of file ID {} of mod ID {}", file_id, mod_id),
            )
            .await?;

        response
            .data
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow!(McmmError::MissingDownloadUrl { mod_id, file_id }))
    }

    /// Fetches a file from the CDN.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "downloading");

        let response = self
            .cdn
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download mod file from {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!(McmmError::CurseforgeApiError(format!(
                "Failed to download mod file with status: {}",
                response.status()
            ))));
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| "Failed to read mod file bytes")?;

        Ok(bytes.to_vec())
    }

    /// Looks a mod up by id, or by name when `query` is not a number. A name
    /// resolves to the first search hit.
    pub async fn find_mod(&self, query: &str, minecraft_version: Option<&str>) -> Result<ModInfo> {
        if let Ok(mod_id) = query.trim().parse::<u32>() {
            return Ok(self.get_mod_info(mod_id).await?.into());
        }

        let mods = self.search_mods(query, minecraft_version, None).await?;
        mods.into_iter()
            .next()
            .map(ModInfo::from)
            .ok_or_else(|| anyhow!(McmmError::NoModsFound(query.to_string())))
    }

    /// Picks the file to download and makes sure it carries a URL.
    ///
    /// Without a version this is the mod's main file. With a version it is
    /// the newest file listing that exact game version.
    pub async fn get_mod_file_url(
        &self,
        mod_info: &ModInfo,
        minecraft_version: Option<&str>,
    ) -> Result<ModFile> {
        let mut file = match minecraft_version {
            None => {
                if mod_info.main_file_id == 0 {
                    return Err(anyhow!(McmmError::NoDefaultFile {
                        name: mod_info.name.clone(),
                        id: mod_info.id,
                    }));
                }
                match mod_info
                    .latest_files
                    .iter()
                    .find(|file| file.id == mod_info.main_file_id)
                {
                    Some(file) => file.clone(),
                    None => self
                        .get_mod_file(mod_info.id, mod_info.main_file_id)
                        .await?
                        .into(),
                }
            }
            Some(version) => self
                .get_mod_files(mod_info.id, Some(version))
                .await?
                .into_iter()
                .map(ModFile::from)
                .find(|file| file.supports(version))
                .ok_or_else(|| {
                    anyhow!(McmmError::NoCompatibleModFiles {
                        name: mod_info.name.clone(),
                        id: mod_info.id,
                        version: version.to_string(),
                    })
                })?,
        };

        if file.url.is_none() {
            debug!(
                mod_id = mod_info.id,
                file_id = file.id,
                "file has no download URL, asking the API"
            );
            file.url = Some(self.get_download_url(mod_info.id, file.id).await?);
        }

        Ok(file)
    }
}
