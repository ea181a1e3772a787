//! Settings file deserialization.

use super::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional settings loaded from a TOML file.
///
/// ```toml
/// labels = "bitbucket,imported"
/// attribution = true
/// attach-labels = true
/// template = "body.hbs"
/// api-url = "https://ghe.example.com/api/v3"
/// ```
///
/// Every key is optional; command line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Comma separated labels applied to every migrated issue.
    pub labels: Option<String>,

    /// Whether to prefix bodies with a `by **reporter**:` header.
    pub attribution: Option<bool>,

    /// Whether to send labels when creating issues.
    pub attach_labels: Option<bool>,

    /// Handlebars body template, relative to the settings file.
    pub template: Option<PathBuf>,

    /// GitHub API root, for GitHub Enterprise.
    pub api_url: Option<String>,
}

impl Settings {
    /// Loads and validates a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
    /// or `api-url` is not an absolute URL.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut settings: Settings =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError {
                path: path.display().to_string(),
                source: e,
            })?;

        if let Some(api_url) = &settings.api_url {
            if let Err(e) = url::Url::parse(api_url) {
                return Err(ConfigError::ValidationError {
                    path: path.display().to_string(),
                    message: format!("api-url '{api_url}' is not a valid URL: {e}"),
                });
            }
        }

        if let Some(template) = settings.template.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            settings.template = Some(base.join(template));
        }

        Ok(settings)
    }
}
