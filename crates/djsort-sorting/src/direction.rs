use crate::config::SortingConfig;

/// Value of the `dir` query parameter.
///
/// Anything other than `asc` or `desc`, including an empty or missing
/// parameter, reads as [`SortDirection::Unset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    Unset,
}

impl SortDirection {
    #[must_use]
    pub fn parse(dir: &str) -> Self {
        match dir {
            "asc" => Self::Ascending,
            "desc" => Self::Descending,
            _ => Self::Unset,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
            Self::Unset => "",
        }
    }

    /// Direction the next click on an active column should request.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Ascending | Self::Unset => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Indicator shown next to the title of the column currently sorted in
    /// this direction.
    #[must_use]
    pub fn icon(self, config: &SortingConfig) -> &str {
        match self {
            Self::Ascending | Self::Unset => config.sort_up(),
            Self::Descending => config.sort_down(),
        }
    }
}
