//! Output naming and resume backups.

use super::TailorError;
use chrono::{DateTime, TimeZone};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Folder for tailored Markdown resumes.
pub const MARKDOWN_DIR: &str = "markdown_resumes";

/// Subfolder of [`MARKDOWN_DIR`] holding copies of source resumes.
pub const BACKUP_DIR: &str = "backups";

/// First `len` hex digits of a random UUID.
pub fn random_hex(len: usize) -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(len);
    hex
}

/// Random name for a tailored Markdown resume.
pub fn default_markdown_name() -> String {
    format!("resume_{}.md", random_hex(8))
}

/// Random name for a converted resume.
pub fn default_docx_name() -> String {
    format!("docx_resume_{}.docx", random_hex(8))
}

/// Put a bare file name into `dir`, creating it if missing. Paths with a
/// directory component are returned unchanged.
pub fn place_in(dir: &Path, name: &Path) -> io::Result<PathBuf> {
    let has_dir = name.parent().is_some_and(|p| !p.as_os_str().is_empty());
    if has_dir {
        return Ok(name.to_path_buf());
    }
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
        log::debug!("created folder {}", dir.display());
    }
    Ok(dir.join(name))
}

/// Backup location for `original` inside `backup_dir`.
///
/// The first backup is `<name>.bak`. When that exists, the date and a random
/// suffix go before the extension: `<stem>.<DDMMYY>_<suffix>.<ext>.bak`.
pub fn backup_path<Tz>(backup_dir: &Path, original: &Path, now: &DateTime<Tz>, suffix: &str) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let file_name = original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());

    let plain = backup_dir.join(format!("{}.bak", file_name));
    if !plain.exists() {
        return plain;
    }

    let stamp = format!("{}_{}", now.format("%d%m%y"), suffix);
    let name = match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}.{}.{}.bak", stem, stamp, ext),
        None => format!("{}.{}.bak", file_name, stamp),
    };
    backup_dir.join(name)
}

/// Copy the source resume into `<markdown_dir>/backups`.
pub fn backup_resume(resume: &Path, markdown_dir: &Path) -> Result<PathBuf, TailorError> {
    let backup_dir = markdown_dir.join(BACKUP_DIR);
    fs::create_dir_all(&backup_dir).map_err(|source| TailorError::Backup {
        path: backup_dir.clone(),
        source,
    })?;

    let target = backup_path(&backup_dir, resume, &chrono::Local::now(), &random_hex(5));
    fs::copy(resume, &target).map_err(|source| TailorError::Backup {
        path: resume.to_path_buf(),
        source,
    })?;
    log::debug!("backup of {} saved as {}", resume.display(), target.display());
    Ok(target)
}
