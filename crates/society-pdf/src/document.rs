//! Render options and the generated document artifact

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref UNSAFE_FILE_CHARS: Regex = Regex::new(r#"[/\\:*?"<>|\x00-\x1F]"#).unwrap();
}

/// Fixed strings printed on reports and certificates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Branding {
    pub report_title: String,
    pub report_subtitle: String,
    pub footer: String,
    pub certificate_title: String,
    pub signatory: String,
    pub inspector: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            report_title: "CHS Rate - Society Assessment Report".to_string(),
            report_subtitle: "Cooperative Housing Society Facility Rating System".to_string(),
            footer: "CHS Rate - Cooperative Housing Society Facility Rating System | Confidential"
                .to_string(),
            certificate_title: "CERTIFICATE OF COMPLIANCE".to_string(),
            signatory: "Authorized Signatory".to_string(),
            inspector: "CHS Rate Inspector".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Date printed as "Generated" on reports and as the certificate date
    pub generated_on: NaiveDate,
    pub branding: Branding,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            generated_on: Local::now().date_naive(),
            branding: Branding::default(),
        }
    }
}

impl RenderOptions {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            generated_on: date,
            ..Self::default()
        }
    }

    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.branding = branding;
        self
    }
}

/// A rendered PDF with its output file name
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl GeneratedDocument {
    /// Write the PDF into `dir` under its file name, returning the full path
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        let mut components = Path::new(&self.file_name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(RenderError::InvalidFileName(self.file_name.clone()));
        }
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Saved PDF");
        Ok(path)
    }
}

/// Replace every run of whitespace with a single underscore
pub fn underscore_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, "_").into_owned()
}

/// Name part usable as a single file name: whitespace runs and path
/// separators or other reserved characters all become `_`
pub fn file_name_part(text: &str) -> String {
    let spaced = underscore_whitespace(text);
    UNSAFE_FILE_CHARS.replace_all(&spaced, "_").into_owned()
}

/// `<society name>_Report.pdf`
pub fn report_file_name(society_name: &str) -> String {
    format!("{}_Report.pdf", file_name_part(society_name))
}

/// `<certificate name>_<society name>.pdf`
pub fn certificate_file_name(certificate_name: &str, society_name: &str) -> String {
    format!(
        "{}_{}.pdf",
        file_name_part(certificate_name),
        file_name_part(society_name)
    )
}

/// Day/month/year without zero padding, e.g. 5/3/2025
pub fn display_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}
