//! Seed source documents: companies with nested job postings.
//!
//! Every field is optional on the wire. Absent or `null` values become empty
//! strings or empty lists; unknown fields are ignored.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseError;

/// Top-level seed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedDocument {
    #[serde(deserialize_with = "nullable")]
    pub companies: Vec<SeedCompany>,
}

/// A company and the job postings it owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedCompany {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub industry: String,
    #[serde(deserialize_with = "nullable")]
    pub website: String,
    #[serde(deserialize_with = "nullable")]
    pub logo_url: String,
    #[serde(deserialize_with = "nullable")]
    pub job_postings: Vec<SeedJobPosting>,
}

impl SeedCompany {
    /// A company is processed only when its name is non-blank.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A job posting with optional raw position labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedJobPosting {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub requirements: String,
    #[serde(deserialize_with = "nullable")]
    pub salary_range: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub employment_type: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub positions: Vec<String>,
}

impl SeedJobPosting {
    /// A job posting is processed only when its title is non-blank.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// On-disk encoding of a seed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// `.yaml`/`.yml` files are YAML; everything else, including the
    /// extension-less or `.txt` mock data files, is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ParseError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl SeedDocument {
    /// Parses a document and rejects one without companies.
    pub fn parse(content: &str, format: SourceFormat) -> Result<Self, ParseError> {
        let document: SeedDocument = match format {
            SourceFormat::Json => serde_json::from_str(content)?,
            SourceFormat::Yaml => serde_yaml::from_str(content)?,
        };
        document.ensure_not_empty()?;
        Ok(document)
    }

    /// Reads and parses a document, picking the format from the extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ParseError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!(
            "Read seed file {} ({} bytes)",
            path.display(),
            content.len()
        );
        Self::parse(&content, SourceFormat::from_path(path))
    }

    /// Seeding nothing is a configuration mistake, not a no-op.
    pub fn ensure_not_empty(&self) -> Result<(), ParseError> {
        if self.companies.is_empty() {
            return Err(ParseError::NoCompanies);
        }
        Ok(())
    }

    /// Total job postings across all companies, valid or not.
    pub fn job_count(&self) -> usize {
        self.companies.iter().map(|c| c.job_postings.len()).sum()
    }
}
