//! Sort and filter derivations over the fetched country list.
//!
//! Each derivation is a pure function that produces a fresh list. The
//! subregion filter always starts from the full dataset, while the language
//! filter and the sort start from whatever is currently displayed, so the
//! order in which actions arrive changes the result.

use std::{cmp::Ordering, collections::HashSet, str::FromStr, sync::Arc};

use icu_collator::{Collator, CollatorOptions, Strength};
use shared::{CountryRecord, FilterChoice, LanguageCountFilter, SortKey, SubregionFilter};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    Sort(SortKey),
    Subregion(SubregionFilter),
    Languages(LanguageCountFilter),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseActionError {
    #[error("action '{0}' must look like <kind>:<value>")]
    MissingSeparator(String),
    #[error("unknown action kind '{0}' (expected sort, subregion or languages)")]
    UnknownKind(String),
    #[error("invalid {kind} value: {reason}")]
    InvalidValue { kind: &'static str, reason: String },
}

impl FromStr for ViewAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| ParseActionError::MissingSeparator(s.to_string()))?;

        match kind.trim().to_ascii_lowercase().as_str() {
            "sort" => value
                .parse()
                .map(ViewAction::Sort)
                .map_err(|reason| ParseActionError::InvalidValue {
                    kind: "sort",
                    reason,
                }),
            "subregion" => {
                let filter = match value.parse::<SubregionFilter>() {
                    Ok(filter) => filter,
                    Err(never) => match never {},
                };
                Ok(ViewAction::Subregion(filter))
            }
            "languages" | "language" => value
                .parse()
                .map(ViewAction::Languages)
                .map_err(|err| ParseActionError::InvalidValue {
                    kind: "languages",
                    reason: format!("'{}' is not a language count: {err}", value.trim()),
                }),
            other => Err(ParseActionError::UnknownKind(other.to_string())),
        }
    }
}

/// The full dataset together with the dropdown options scanned from it.
#[derive(Debug)]
pub struct Catalog {
    countries: Vec<CountryRecord>,
    subregion_options: Vec<SubregionFilter>,
    language_options: Vec<LanguageCountFilter>,
}

impl Catalog {
    pub fn new(countries: Vec<CountryRecord>) -> Self {
        let subregion_options = distinct_subregions(&countries);
        let language_options = distinct_language_counts(&countries);
        Self {
            countries,
            subregion_options,
            language_options,
        }
    }

    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    pub fn subregion_options(&self) -> &[SubregionFilter] {
        &self.subregion_options
    }

    pub fn language_options(&self) -> &[LanguageCountFilter] {
        &self.language_options
    }
}

fn distinct_options<T, I>(values: I) -> Vec<FilterChoice<T>>
where
    T: Clone + Eq + std::hash::Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    let mut options = vec![FilterChoice::ShowAll];
    for value in values {
        if seen.insert(value.clone()) {
            options.push(FilterChoice::Only(value));
        }
    }
    options
}

/// Sentinel first, then each subregion in first-seen order.
pub fn distinct_subregions(full: &[CountryRecord]) -> Vec<SubregionFilter> {
    distinct_options(full.iter().map(|country| country.subregion.clone()))
}

/// Sentinel first, then each language count in first-seen order.
pub fn distinct_language_counts(full: &[CountryRecord]) -> Vec<LanguageCountFilter> {
    distinct_options(full.iter().map(CountryRecord::language_count))
}

pub fn derive_by_subregion(full: &[CountryRecord], filter: &SubregionFilter) -> Vec<CountryRecord> {
    match filter {
        FilterChoice::ShowAll => full.to_vec(),
        FilterChoice::Only(subregion) => full
            .iter()
            .filter(|country| &country.subregion == subregion)
            .cloned()
            .collect(),
    }
}

/// Narrows `current`; the sentinel discards `current` and returns `full`.
pub fn derive_by_language(
    full: &[CountryRecord],
    current: &[CountryRecord],
    filter: &LanguageCountFilter,
) -> Vec<CountryRecord> {
    match filter {
        FilterChoice::ShowAll => full.to_vec(),
        FilterChoice::Only(count) => current
            .iter()
            .filter(|country| country.language_count() == *count)
            .cloned()
            .collect(),
    }
}

pub fn sort_list(current: &[CountryRecord], key: SortKey) -> Vec<CountryRecord> {
    let mut sorted = current.to_vec();
    // `sort_by` is stable, equal keys keep their relative order.
    match key {
        SortKey::NameAscending => {
            let names = NameOrder::new();
            sorted.sort_by(|a, b| names.compare(&a.name, &b.name));
        }
        SortKey::NameDescending => {
            let names = NameOrder::new();
            sorted.sort_by(|a, b| names.compare(&b.name, &a.name));
        }
        SortKey::PopulationAscending => sorted.sort_by(|a, b| a.population.cmp(&b.population)),
        SortKey::PopulationDescending => sorted.sort_by(|a, b| b.population.cmp(&a.population)),
    }
    sorted
}

/// Root-locale collation for country names, so "Åland Islands" files under A.
struct NameOrder {
    collator: Option<Collator>,
}

impl NameOrder {
    fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(err) => {
                warn!("name collator unavailable, falling back to code point order: {err}");
                None
            }
        };
        Self { collator }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    catalog: Arc<Catalog>,
    displayed: Vec<CountryRecord>,
    sort: SortKey,
    subregion: SubregionFilter,
    languages: LanguageCountFilter,
}

impl ViewState {
    /// Displayed list starts as the dataset in payload order; the default sort
    /// is only applied once a sort action arrives.
    pub fn new(countries: Vec<CountryRecord>) -> Self {
        let catalog = Arc::new(Catalog::new(countries));
        Self {
            displayed: catalog.countries().to_vec(),
            catalog,
            sort: SortKey::default(),
            subregion: FilterChoice::ShowAll,
            languages: FilterChoice::ShowAll,
        }
    }

    pub fn apply(&mut self, action: ViewAction) {
        let full = self.catalog.countries();
        self.displayed = match &action {
            ViewAction::Sort(key) => {
                self.sort = *key;
                sort_list(&self.displayed, *key)
            }
            ViewAction::Subregion(filter) => {
                self.subregion = filter.clone();
                derive_by_subregion(full, filter)
            }
            ViewAction::Languages(filter) => {
                self.languages = filter.clone();
                derive_by_language(full, &self.displayed, filter)
            }
        };
        debug!(?action, displayed = self.displayed.len(), "view state derived");
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn displayed(&self) -> &[CountryRecord] {
        &self.displayed
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn subregion(&self) -> &SubregionFilter {
        &self.subregion
    }

    pub fn languages(&self) -> &LanguageCountFilter {
        &self.languages
    }
}
