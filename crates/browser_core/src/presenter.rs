//! View-model built from the browser state. Front ends only draw what this
//! module hands them.

use shared::{CountryRecord, LanguageCountFilter, SortKey, SubregionFilter};
use tracing::trace;

use crate::{
    browser::{BrowserPhase, CountryBrowser},
    view_state::ViewState,
};

pub const PAGE_TITLE: &str = "Lets Go To Europe!";
pub const SORT_LABEL: &str = "Sort By:";
pub const SUBREGION_LABEL: &str = "Filter by Subregion:";
pub const LANGUAGES_LABEL: &str = "Filter by # of Languages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption<T> {
    pub label: String,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown<T> {
    pub label: &'static str,
    pub options: Vec<DropdownOption<T>>,
    pub selected: T,
}

impl<T: PartialEq> Dropdown<T> {
    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|option| option.value == self.selected)
            .map(|option| option.label.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Position in the displayed list, used to route clicks back.
    pub index: usize,
    pub title: String,
    pub alpha3_code: String,
    pub flag_image_url: String,
    pub subregion_line: String,
    pub capital_line: String,
    pub population_line: String,
    pub languages_line: String,
}

impl CardView {
    fn from_record(index: usize, country: &CountryRecord) -> Self {
        Self {
            index,
            title: country.name.clone(),
            alpha3_code: country.alpha3_code.clone(),
            flag_image_url: country.flag_image_url.clone(),
            subregion_line: format!("Subregion: {}", country.subregion),
            capital_line: format!("Capital: {}", country.capital),
            population_line: format!(
                "Total Population: {}",
                format_population(country.population)
            ),
            languages_line: format!("Number of Languages: {}", country.language_count()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedView {
    pub title: &'static str,
    pub sort: Dropdown<SortKey>,
    pub subregion: Dropdown<SubregionFilter>,
    pub languages: Dropdown<LanguageCountFilter>,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserView {
    Loading,
    /// Replaces the whole interactive view; no controls are drawn.
    Error { message: String },
    Loaded(LoadedView),
}

pub fn present(browser: &CountryBrowser) -> BrowserView {
    match browser.phase() {
        BrowserPhase::Loading => BrowserView::Loading,
        BrowserPhase::Error(err) => BrowserView::Error {
            message: format!("Error: {err}"),
        },
        BrowserPhase::Loaded(view) => BrowserView::Loaded(present_loaded(view)),
    }
}

fn present_loaded(view: &ViewState) -> LoadedView {
    let catalog = view.catalog();
    LoadedView {
        title: PAGE_TITLE,
        sort: Dropdown {
            label: SORT_LABEL,
            options: SortKey::ALL
                .into_iter()
                .map(|key| DropdownOption {
                    label: key.label().to_string(),
                    value: key,
                })
                .collect(),
            selected: view.sort(),
        },
        subregion: Dropdown {
            label: SUBREGION_LABEL,
            options: catalog
                .subregion_options()
                .iter()
                .map(|choice| DropdownOption {
                    label: choice.label(),
                    value: choice.clone(),
                })
                .collect(),
            selected: view.subregion().clone(),
        },
        languages: Dropdown {
            label: LANGUAGES_LABEL,
            options: catalog
                .language_options()
                .iter()
                .map(|choice| DropdownOption {
                    label: choice.label(),
                    value: choice.clone(),
                })
                .collect(),
            selected: view.languages().clone(),
        },
        cards: view
            .displayed()
            .iter()
            .enumerate()
            .map(|(index, country)| CardView::from_record(index, country))
            .collect(),
    }
}

/// Groups digits in threes with commas: `47351567` -> `47,351,567`.
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Invoked when a card is clicked.
pub trait CardClickHook {
    fn on_card_clicked(&self, country: &CountryRecord, displayed: &[CountryRecord]);
}

/// Border highlighting for the clicked country.
///
/// Extension point: the dimming of non-bordering cards is not implemented
/// yet, so this hook leaves every card untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct BorderHighlight;

impl CardClickHook for BorderHighlight {
    fn on_card_clicked(&self, country: &CountryRecord, displayed: &[CountryRecord]) {
        trace!(
            country = %country.name,
            borders = country.borders.len(),
            displayed = displayed.len(),
            "card clicked"
        );
    }
}

/// Routes a click on the card at `index` to `hook`. Returns false when no
/// such card is displayed.
pub fn handle_card_click(browser: &CountryBrowser, index: usize, hook: &dyn CardClickHook) -> bool {
    let displayed = browser.displayed();
    match displayed.get(index) {
        Some(country) => {
            hook.on_card_clicked(country, displayed);
            true
        }
        None => false,
    }
}
