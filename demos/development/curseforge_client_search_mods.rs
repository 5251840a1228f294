use mcmm::api::curseforge::CurseforgeClient;
use mcmm::models::config::{Overrides, Settings};
use mcmm::utils::RealEnv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::resolve(&RealEnv, Overrides::default())?;
    let client = CurseforgeClient::new(&settings)?;

    let mods = client.search_mods("oritech", None, Some(5)).await?;
    for m in mods {
        println!("Found mod: {} (ID: {})", m.name, m.id);
    }
    Ok(())
}
