use mcmm::api::curseforge::CurseforgeClient;
use mcmm::models::config::{Overrides, Settings};
use mcmm::models::mod_info::ModInfo;
use mcmm::utils::RealEnv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::resolve(&RealEnv, Overrides::default())?;
    let client = CurseforgeClient::new(&settings)?;

    let data: ModInfo = client.get_mod_info(238222).await?.into();
    dbg!(&data);

    let file = client.get_mod_file_url(&data, Some("1.20.1")).await?;
    dbg!(file);
    Ok(())
}
