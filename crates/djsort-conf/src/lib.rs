use std::fs;
use std::path::Path;

use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SORT_UP: &str = "&uarr;";
pub const DEFAULT_SORT_DOWN: &str = "&darr;";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
    #[error("Failed to read pyproject.toml")]
    PyprojectIo(#[from] std::io::Error),
    #[error("Failed to parse pyproject.toml TOML")]
    PyprojectParse(#[from] toml::de::Error),
    #[error("Failed to serialize extracted pyproject data")]
    PyprojectSerialize(#[from] toml::ser::Error),
}

/// Project settings for the sorting tags.
///
/// Read once at startup. Consumers freeze the values they need into their own
/// immutable configuration rather than holding on to `Settings`.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Icon markup appended to the title of an ascending (or unset) active anchor.
    default_sort_up: String,
    /// Icon markup appended to the title of a descending active anchor.
    default_sort_down: String,
    /// Turn unknown ordering fields into a not-found failure instead of
    /// rendering the collection unsorted.
    sorting_invalid_field_raises_404: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_sort_up: DEFAULT_SORT_UP.to_string(),
            default_sort_down: DEFAULT_SORT_DOWN.to_string(),
            sorting_invalid_field_raises_404: false,
        }
    }
}

impl Settings {
    pub fn new(project_root: &Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("com.github", "djsort", "djsort")
            .map(|proj_dirs| proj_dirs.config_dir().join("djsort.toml"));

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    #[must_use]
    pub fn default_sort_up(&self) -> &str {
        &self.default_sort_up
    }

    #[must_use]
    pub fn default_sort_down(&self) -> &str {
        &self.default_sort_down
    }

    #[must_use]
    pub fn invalid_field_raises_404(&self) -> bool {
        self.sorting_invalid_field_raises_404
    }

    fn load_from_paths(
        project_root: &Path,
        user_config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let pyproject_path = project_root.join("pyproject.toml");
        if pyproject_path.exists() {
            let content = fs::read_to_string(&pyproject_path)?;
            let full_toml_value: toml::Value = toml::from_str(&content)?;

            let table_path = ["tool", "djsort"];

            let djsort_value_opt: Option<&toml::Value> = table_path
                .iter()
                .try_fold(&full_toml_value, |current_val, &key| current_val.get(key));

            if let Some(djsort_table) = djsort_value_opt.and_then(|v| v.as_table()) {
                let djsort_toml_string = toml::to_string(djsort_table)?;
                builder = builder.add_source(File::from_str(&djsort_toml_string, FileFormat::Toml));
            }
        }

        builder = builder.add_source(
            File::from(project_root.join(".djsort.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("djsort.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(
            strict = settings.sorting_invalid_field_raises_404,
            "Loaded sorting settings from {}",
            project_root.display()
        );
        Ok(settings)
    }
}
