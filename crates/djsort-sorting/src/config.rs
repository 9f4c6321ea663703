use djsort_conf::Settings;
use djsort_conf::DEFAULT_SORT_DOWN;
use djsort_conf::DEFAULT_SORT_UP;

/// Frozen sorting configuration shared by every compiled tag.
///
/// Built once at startup and handed to [`library`](crate::library) behind an
/// `Arc`; nothing mutates it afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortingConfig {
    sort_up: String,
    sort_down: String,
    invalid_field_raises_404: bool,
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            sort_up: DEFAULT_SORT_UP.to_string(),
            sort_down: DEFAULT_SORT_DOWN.to_string(),
            invalid_field_raises_404: false,
        }
    }
}

impl SortingConfig {
    pub fn new(
        sort_up: impl Into<String>,
        sort_down: impl Into<String>,
        invalid_field_raises_404: bool,
    ) -> Self {
        Self {
            sort_up: sort_up.into(),
            sort_down: sort_down.into(),
            invalid_field_raises_404,
        }
    }

    #[must_use]
    pub fn sort_up(&self) -> &str {
        &self.sort_up
    }

    #[must_use]
    pub fn sort_down(&self) -> &str {
        &self.sort_down
    }

    #[must_use]
    pub fn invalid_field_raises_404(&self) -> bool {
        self.invalid_field_raises_404
    }
}

impl From<&Settings> for SortingConfig {
    fn from(settings: &Settings) -> Self {
        Self::new(
            settings.default_sort_up(),
            settings.default_sort_down(),
            settings.invalid_field_raises_404(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_settings() {
        let config = SortingConfig::from(&Settings::default());
        assert_eq!(config, SortingConfig::default());
        assert_eq!(config.sort_up(), "&uarr;");
        assert_eq!(config.sort_down(), "&darr;");
        assert!(!config.invalid_field_raises_404());
    }
}
