use anyhow::{anyhow, Context, Result};
use console::style;
use futures::future::join_all;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::api::curseforge::CurseforgeClient;
use crate::models::config::{Overrides, Settings};
use crate::utils;
use crate::utils::errors::McmmError;
use crate::utils::Env;

/// Downloads every mod in `mod_queries` concurrently and returns the saved
/// paths. One failure does not stop the others, but fails the command.
pub async fn run<E: Env>(
    env: &E,
    mod_queries: &[String],
    minecraft_version: Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let settings = Settings::resolve(
        env,
        Overrides {
            game_version: minecraft_version,
            output_dir,
        },
    )?;
    let client = CurseforgeClient::new(&settings).context("Failed to initialize Curseforge API client")?;
    utils::ensure_dir_exists(&settings.output_dir)?;

    let version = settings.game_version.as_deref();
    let progress = MultiProgress::new();

    let results = join_all(mod_queries.iter().map(|query| {
        download_one(&client, &progress, query, version, &settings.output_dir)
    }))
    .await;

    let total = results.len();
    let saved: Vec<PathBuf> = results.into_iter().flatten().collect();

    let failed = total - saved.len();
    if failed > 0 {
        return Err(anyhow!(McmmError::DownloadsFailed { failed, total }));
    }

    info!(count = saved.len(), dir = %settings.output_dir.display(), "all downloads finished");
    Ok(saved)
}

async fn download_one(
    client: &CurseforgeClient,
    progress: &MultiProgress,
    query: &str,
    minecraft_version: Option<&str>,
    output_dir: &Path,
) -> Result<PathBuf> {
    say(progress, getting_line(query, minecraft_version));

    let pb = progress.add(ProgressBar::new_spinner());
    if let Ok(spinner) = spinner_style() {
        pb.set_style(spinner);
    }
    pb.set_message(format!("Resolving {}", query));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = fetch_and_save(client, progress, &pb, query, minecraft_version, output_dir).await;
    pb.finish_and_clear();

    if let Err(err) = &result {
        warn!(query, "download failed");
        progress.suspend(|| {
            eprintln!("{} {}: {:#}", style("[ERROR]").bold().red(), query, err);
        });
    }
    result
}

async fn fetch_and_save(
    client: &CurseforgeClient,
    progress: &MultiProgress,
    pb: &ProgressBar,
    query: &str,
    minecraft_version: Option<&str>,
    output_dir: &Path,
) -> Result<PathBuf> {
    let mod_info = client
        .find_mod(query, minecraft_version)
        .await
        .context("Error on getting mod info")?;

    let file = client
        .get_mod_file_url(&mod_info, minecraft_version)
        .await
        .context("Error on getting file url")?;

    let file_name = utils::plain_file_name(&file.file_name)?;
    let url = file.url.as_deref().ok_or_else(|| {
        anyhow!(McmmError::MissingDownloadUrl {
            mod_id: mod_info.id,
            file_id: file.id,
        })
    })?;

    say(progress, format!("Downloading {} : {}", file_name, url));
    pb.set_message(format!("Downloading {}", file_name));

    let bytes = client
        .download(url)
        .await
        .context("Error on downloading file")?;
    let path = save_file(output_dir, file_name, &bytes)?;

    say(progress, saved_line(file_name, bytes.len()));
    Ok(path)
}

/// Writes through a temporary file in `output_dir` so a failed write never
/// leaves a truncated jar under the final name.
fn save_file(output_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = output_dir.join(file_name);

    let mut temp = NamedTempFile::new_in(output_dir)
        .with_context(|| format!("Error on open save file in {}", output_dir.display()))?;
    temp.write_all(bytes).context("Error on writing save file")?;
    // Temporary files are created 0600.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .context("Error on setting save file permissions")?;
    }
    temp.persist(&path)
        .map_err(|err| err.error)
        .with_context(|| format!("Error on saving {}", path.display()))?;

    Ok(path)
}

fn spinner_style() -> Result<ProgressStyle> {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner} {msg}")
        .context("Failed to create progress style")
}

fn say(progress: &MultiProgress, line: String) {
    progress.suspend(|| println!("{}", line));
}

pub fn getting_line(query: &str, minecraft_version: Option<&str>) -> String {
    match minecraft_version {
        Some(version) => format!("Getting {} for Minecraft {}", query, version),
        None => format!("Getting {} for latest Minecraft version", query),
    }
}

pub fn saved_line(file_name: &str, size: usize) -> String {
    format!("Saved mod {} ({} bytes)", file_name, size)
}
