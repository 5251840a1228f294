use anyhow::{Context, Result};

use crate::api::curseforge::CurseforgeClient;
use crate::models::config::{Overrides, Settings};
use crate::models::mod_info::ModInfo;
use crate::utils::Env;

/// Prints a mod's id, name, supported versions and summary. `mod_query` is a
/// mod id or a name; names resolve to the first search hit.
pub async fn run<E: Env>(env: &E, mod_query: &str) -> Result<ModInfo> {
    let settings = Settings::resolve(env, Overrides::default())?;
    let client = CurseforgeClient::new(&settings).context("Failed to initialize Curseforge API client")?;

    // Compatibility is what we are about to show, so don't filter by version.
    let mod_info = client
        .find_mod(mod_query, None)
        .await
        .with_context(|| format!("Error on getting mod info for {}", mod_query))?;

    println!("{}", render(&mod_info));

    Ok(mod_info)
}

pub fn render(mod_info: &ModInfo) -> String {
    let versions = if mod_info.supported_versions.is_empty() {
        "Nothing".to_string()
    } else {
        mod_info.supported_versions.join(" ")
    };

    format!(
        "{} - {}\nSupported versions: {}\n{}",
        mod_info.id, mod_info.name, versions, mod_info.summary
    )
}
