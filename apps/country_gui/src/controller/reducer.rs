//! Applies backend events to the browser state owned by the UI thread.

use browser_core::CountryBrowser;

use crate::controller::events::{err_label, UiEvent};

pub fn reduce(browser: &mut CountryBrowser, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            *status = message;
        }
        UiEvent::CountriesLoaded(countries) => {
            let count = countries.len();
            match browser.settle(Ok(countries)) {
                Ok(()) => *status = format!("Loaded {count} countries"),
                Err(err) => tracing::warn!("dropping country list: {err}"),
            }
        }
        UiEvent::Error(err) => {
            tracing::error!(
                category = ?err.category(),
                context = ?err.context(),
                "{} error: {}",
                err_label(err.category()),
                err.message()
            );
            if let Err(settle_err) = browser.settle(Err(err.to_fetch_error())) {
                tracing::warn!("dropping late failure: {settle_err}");
            }
            *status = format!("{} error", err_label(err.category()));
        }
    }
}

#[cfg(test)]
mod tests {
    use browser_core::{present, BrowserView};
    use shared::{CountryRecord, FetchError, LanguageRef};

    use super::*;
    use crate::controller::events::{UiError, UiErrorContext};

    fn norway() -> CountryRecord {
        CountryRecord {
            name: "Norway".to_string(),
            population: 5_223_256,
            subregion: "Northern Europe".to_string(),
            languages: vec![LanguageRef::Code("no".to_string())],
            capital: "Oslo".to_string(),
            flag_image_url: String::new(),
            borders: vec!["SWE".to_string()],
            alpha3_code: "NOR".to_string(),
        }
    }

    #[test]
    fn loaded_event_settles_browser() {
        let mut browser = CountryBrowser::new();
        let mut status = String::new();

        reduce(&mut browser, &mut status, UiEvent::Info("Backend worker ready".into()));
        assert_eq!(status, "Backend worker ready");
        assert!(browser.is_loading());

        reduce(&mut browser, &mut status, UiEvent::CountriesLoaded(vec![norway()]));
        assert_eq!(status, "Loaded 1 countries");
        assert_eq!(browser.displayed().len(), 1);
    }

    #[test]
    fn error_event_replaces_view_with_message() {
        let mut browser = CountryBrowser::new();
        let mut status = String::new();
        let err = UiError::from_fetch_error(
            UiErrorContext::FetchCountries,
            FetchError::transport("failed to reach http://127.0.0.1:1: connection refused"),
        );

        reduce(&mut browser, &mut status, UiEvent::Error(err));
        assert_eq!(status, "Network error");
        assert_eq!(
            present(&browser),
            BrowserView::Error {
                message: "Error: failed to reach http://127.0.0.1:1: connection refused"
                    .to_string()
            }
        );

        reduce(&mut browser, &mut status, UiEvent::CountriesLoaded(vec![norway()]));
        assert!(browser.displayed().is_empty());
    }
}
