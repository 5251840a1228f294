pub mod errors;
pub mod logging;

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::utils::errors::McmmError;

/// Process environment as seen by the commands.
///
/// Everything that reads environment variables or well-known directories goes
/// through this trait so tests can run against a fake environment.
pub trait Env {
    fn var(&self, key: &str) -> Option<String>;

    fn current_dir(&self) -> Result<PathBuf>;

    fn config_dir(&self) -> Option<PathBuf>;
}

pub struct RealEnv;

impl Env for RealEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        env::current_dir().context("Failed to read the current directory")
    }

    fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }
}

pub fn ensure_dir_exists(dir_path: &Path) -> Result<()> {
    if !dir_path.exists() {
        fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {}", dir_path.display()))?;
    }
    Ok(())
}

/// Checks that a file name reported by the API names a single file and
/// cannot escape the output directory.
pub fn plain_file_name(file_name: &str) -> Result<&str> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None)
            if !file_name.contains('\\') && !file_name.ends_with('/') =>
        {
            Ok(file_name)
        }
        _ => Err(anyhow!(McmmError::InvalidFileName(file_name.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_jar_names() {
        assert_eq!(
            plain_file_name("oritech-1.21.1-0.14.6.jar").unwrap(),
            "oritech-1.21.1-0.14.6.jar"
        );
    }

    #[test]
    fn rejects_names_with_directories() {
        for name in [
            "",
            "..",
            "/etc/passwd",
            "../evil.jar",
            "mods/evil.jar",
            "a\\b.jar",
            "foo.jar/",
        ] {
            assert!(plain_file_name(name).is_err(), "{name:?} was accepted");
        }
    }

    #[test]
    fn ensure_dir_exists_creates_nested_dirs() {
        let temp = assert_fs::TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op.
        ensure_dir_exists(&nested).unwrap();
    }
}
