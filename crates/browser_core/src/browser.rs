//! Whole-component state machine: `Loading -> Loaded | Error`.

use shared::{CountryRecord, FetchError};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    view_state::{ViewAction, ViewState},
    CountrySource,
};

#[derive(Debug, Clone)]
pub enum BrowserPhase {
    Loading,
    Loaded(ViewState),
    /// Terminal for the session; no retry path exists.
    Error(FetchError),
}

impl BrowserPhase {
    pub fn name(&self) -> &'static str {
        match self {
            BrowserPhase::Loading => "loading",
            BrowserPhase::Loaded(_) => "loaded",
            BrowserPhase::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    #[error("country list is not loaded (browser is {phase})")]
    NotLoaded { phase: &'static str },
    #[error("country list retrieval already settled (browser is {phase})")]
    AlreadySettled { phase: &'static str },
}

#[derive(Debug, Clone)]
pub struct CountryBrowser {
    phase: BrowserPhase,
}

impl Default for CountryBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryBrowser {
    pub fn new() -> Self {
        Self {
            phase: BrowserPhase::Loading,
        }
    }

    /// Runs the one retrieval of the session and settles the machine with it.
    pub async fn load<S>(&mut self, source: &S) -> Result<(), BrowserError>
    where
        S: CountrySource + ?Sized,
    {
        if !self.is_loading() {
            return Err(BrowserError::AlreadySettled {
                phase: self.phase.name(),
            });
        }
        let result = source.fetch_countries().await;
        self.settle(result)
    }

    pub fn settle(
        &mut self,
        result: Result<Vec<CountryRecord>, FetchError>,
    ) -> Result<(), BrowserError> {
        if !self.is_loading() {
            warn!(phase = self.phase.name(), "ignoring late country list result");
            return Err(BrowserError::AlreadySettled {
                phase: self.phase.name(),
            });
        }

        self.phase = match result {
            Ok(countries) => {
                info!(count = countries.len(), "country list loaded");
                BrowserPhase::Loaded(ViewState::new(countries))
            }
            Err(err) => {
                error!(kind = ?err.kind, "country list retrieval failed: {err}");
                BrowserPhase::Error(err)
            }
        };
        Ok(())
    }

    pub fn dispatch(&mut self, action: ViewAction) -> Result<(), BrowserError> {
        match &mut self.phase {
            BrowserPhase::Loaded(view) => {
                view.apply(action);
                Ok(())
            }
            other => Err(BrowserError::NotLoaded {
                phase: other.name(),
            }),
        }
    }

    pub fn phase(&self) -> &BrowserPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, BrowserPhase::Loading)
    }

    pub fn view_state(&self) -> Option<&ViewState> {
        match &self.phase {
            BrowserPhase::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.phase {
            BrowserPhase::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Empty unless the list has loaded.
    pub fn displayed(&self) -> &[CountryRecord] {
        self.view_state().map(ViewState::displayed).unwrap_or(&[])
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
