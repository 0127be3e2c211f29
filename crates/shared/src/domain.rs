use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Display label of the "apply no filtering" choice in both filter dropdowns.
pub const SHOW_ALL_LABEL: &str = "Show All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "name-asc")]
    NameAscending,
    #[serde(rename = "name-desc")]
    NameDescending,
    #[serde(rename = "pop-asc")]
    PopulationAscending,
    #[serde(rename = "pop-desc")]
    PopulationDescending,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::NameAscending,
        SortKey::NameDescending,
        SortKey::PopulationAscending,
        SortKey::PopulationDescending,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAscending => "Name (A-Z)",
            SortKey::NameDescending => "Name (Z-A)",
            SortKey::PopulationAscending => "Population (Low to High)",
            SortKey::PopulationDescending => "Population (High to Low)",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            SortKey::NameAscending => "name-asc",
            SortKey::NameDescending => "name-desc",
            SortKey::PopulationAscending => "pop-asc",
            SortKey::PopulationDescending => "pop-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| key.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!("unknown sort key '{wanted}' (expected name-asc, name-desc, pop-asc or pop-desc)")
            })
    }
}

/// A dropdown filter: either the "show all" sentinel or one concrete value.
///
/// The sentinel is a separate variant so it can never collide with a real
/// subregion name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterChoice<T> {
    #[default]
    ShowAll,
    Only(T),
}

pub type SubregionFilter = FilterChoice<String>;
pub type LanguageCountFilter = FilterChoice<usize>;

impl<T> FilterChoice<T> {
    pub fn is_show_all(&self) -> bool {
        matches!(self, FilterChoice::ShowAll)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FilterChoice::ShowAll => None,
            FilterChoice::Only(value) => Some(value),
        }
    }
}

impl<T: fmt::Display> FilterChoice<T> {
    pub fn label(&self) -> String {
        match self {
            FilterChoice::ShowAll => SHOW_ALL_LABEL.to_string(),
            FilterChoice::Only(value) => value.to_string(),
        }
    }
}

impl<T: FromStr> FromStr for FilterChoice<T> {
    type Err = T::Err;

    /// `all` (any case) and the dropdown label `Show All` select the sentinel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case(SHOW_ALL_LABEL) {
            return Ok(FilterChoice::ShowAll);
        }
        trimmed.parse().map(FilterChoice::Only)
    }
}
