//! Tailoring prompt assembly.

use super::TailorError;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Settings file holding the prompt header and the page header line.
pub const HEADER_FILE: &str = "header.txt";
/// Instructions that keep the resume close to the baseline.
pub const MODERATE_FILE: &str = "moderate.txt";
/// Instructions that allow creative rewrites.
pub const UNMODERATED_FILE: &str = "unmoderated.txt";

/// Prompt text loaded from the settings folder.
#[derive(Debug, Clone)]
pub struct PromptSettings {
    pub header: String,
    pub instructions: String,
}

impl PromptSettings {
    /// Read the header and the instructions for the chosen mode.
    pub fn load(dir: &Path, moderate: bool) -> Result<Self, TailorError> {
        let instructions = if moderate { MODERATE_FILE } else { UNMODERATED_FILE };
        Ok(Self {
            header: read_setting(&dir.join(HEADER_FILE))?,
            instructions: read_setting(&dir.join(instructions))?,
        })
    }
}

fn read_setting(path: &Path) -> Result<String, TailorError> {
    fs::read_to_string(path).map_err(|source| TailorError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the prompt sent to the model.
pub fn build_prompt(settings: &PromptSettings, date: NaiveDate, job_details: &str, resume: &str) -> String {
    format!(
        "{header}\n\n\
         Current Date: {date}\n\n\
         {instructions}\n\n\
         Job Listing:\n\
         ------------------\n\
         {job_details}\n\n\
         Original Resume:\n\
         ------------------\n\
         {resume}\n\n\
         Tailored Resume (Markdown):\n",
        header = settings.header,
        date = date.format("%Y-%m-%d"),
        instructions = settings.instructions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings() -> PromptSettings {
        PromptSettings {
            header: "Jane Doe | jane@example.com".to_string(),
            instructions: "Keep all dates.".to_string(),
        }
    }

    #[test]
    fn test_build_prompt_layout() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let prompt = build_prompt(&settings(), date, "Rust engineer wanted", "# Jane");
        assert_eq!(
            prompt,
            "Jane Doe | jane@example.com\n\n\
             Current Date: 2025-03-07\n\n\
             Keep all dates.\n\n\
             Job Listing:\n------------------\nRust engineer wanted\n\n\
             Original Resume:\n------------------\n# Jane\n\n\
             Tailored Resume (Markdown):\n"
        );
    }

    #[test]
    fn test_load_picks_mode_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(HEADER_FILE), "Header").unwrap();
        fs::write(tmp.path().join(MODERATE_FILE), "Minimal changes").unwrap();
        fs::write(tmp.path().join(UNMODERATED_FILE), "Be creative").unwrap();

        assert_eq!(PromptSettings::load(tmp.path(), true).unwrap().instructions, "Minimal changes");
        assert_eq!(PromptSettings::load(tmp.path(), false).unwrap().instructions, "Be creative");
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = PromptSettings::load(tmp.path(), true);
        assert!(matches!(result, Err(TailorError::Settings { .. })));
    }
}
