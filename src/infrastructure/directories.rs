use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub export_dir: PathBuf,
}

pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(&cfg.logs_dir)?;
    let export_dir = ensure_dir(&cfg.export_dir)?;

    let check_file = export_dir.join(".write-test");
    fs::write(&check_file, b"ok")
        .with_context(|| format!("export directory {} is not writable", export_dir.display()))?;
    fs::remove_file(&check_file)?;
    Ok(ResolvedPaths {
        logs_dir,
        export_dir,
    })
}

fn ensure_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create directory {}", path))?;
    }
    Ok(dir.canonicalize().unwrap_or(dir))
}
