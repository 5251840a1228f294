use anyhow::{Context, Result};

use crate::api::curseforge::CurseforgeClient;
use crate::models::config::{Overrides, Settings};
use crate::models::mod_info::ModInfo;
use crate::utils::Env;

pub async fn run<E: Env>(
    env: &E,
    query: &str,
    minecraft_version: Option<String>,
    limit: Option<u32>,
) -> Result<Vec<ModInfo>> {
    let settings = Settings::resolve(
        env,
        Overrides {
            game_version: minecraft_version,
            ..Default::default()
        },
    )?;
    let client = CurseforgeClient::new(&settings).context("Failed to initialize Curseforge API client")?;
    let version = settings.game_version.as_deref();

    println!("{}", searching_line(query, version));

    let mods: Vec<ModInfo> = client
        .search_mods(query, version, limit)
        .await
        .context("Failed to search for mods")?
        .into_iter()
        .map(ModInfo::from)
        .collect();

    if mods.is_empty() {
        println!("No mods found");
    }
    for mod_info in &mods {
        println!("{}", result_line(mod_info));
    }

    Ok(mods)
}

pub fn searching_line(query: &str, minecraft_version: Option<&str>) -> String {
    match minecraft_version {
        Some(version) => format!("Searching {} for Minecraft {}", query, version),
        None => format!("Searching {} for all Minecraft version", query),
    }
}

pub fn result_line(mod_info: &ModInfo) -> String {
    format!("{} ({}) - {}", mod_info.name, mod_info.id, mod_info.summary)
}
