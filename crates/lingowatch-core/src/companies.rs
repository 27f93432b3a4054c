use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One monitored company. Any combination of sources may be configured;
/// a company with no identifier for a given source is skipped for that
/// source kind (not an error).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    pub github_org: Option<String>,
    #[serde(default)]
    pub github_repos: Vec<String>,
    pub play_package: Option<String>,
    #[serde(default)]
    pub doc_urls: Vec<String>,
    pub notes: Option<String>,
}

impl CompanyConfig {
    /// Generate a URL-safe slug from the company name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// True if the company has at least one repository to check.
    #[must_use]
    pub fn has_github(&self) -> bool {
        self.github_org.is_some() && !self.github_repos.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct CompaniesFile {
    pub companies: Vec<CompanyConfig>,
}

/// Load and validate the companies configuration from a YAML file.
///
/// Called once per scheduler cycle so edits to the file take effect without
/// a restart.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_companies(path: &Path) -> Result<CompaniesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CompaniesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let companies_file: CompaniesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CompaniesFileParse)?;

    validate_companies(&companies_file)?;

    Ok(companies_file)
}

fn validate_companies(companies_file: &CompaniesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for company in &companies_file.companies {
        if company.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company name must be non-empty".to_string(),
            ));
        }

        if company.github_repos.iter().any(|r| r.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "company '{}' has an empty repository name",
                company.name
            )));
        }

        if company.github_org.is_none() && !company.github_repos.is_empty() {
            return Err(ConfigError::Validation(format!(
                "company '{}' lists github_repos but no github_org",
                company.name
            )));
        }

        let lower_name = company.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate company name: '{}'",
                company.name
            )));
        }

        let slug = company.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate company slug: '{}' (from company '{}')",
                slug, company.name
            )));
        }
    }

    Ok(())
}
