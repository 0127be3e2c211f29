//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use browser_core::{CountryClient, CountrySource};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchCountries { countries_url } => {
                        tracing::info!(url = %countries_url, "backend: fetch_countries");
                        let client = CountryClient::new(countries_url);
                        let event = match client.fetch_countries().await {
                            Ok(countries) => UiEvent::CountriesLoaded(countries),
                            Err(err) => {
                                tracing::error!("backend: fetch_countries failed: {err}");
                                UiEvent::Error(UiError::from_fetch_error(
                                    UiErrorContext::FetchCountries,
                                    err,
                                ))
                            }
                        };
                        deliver_outcome(&ui_tx, event);
                    }
                }
            }
            tracing::debug!("backend command queue closed; worker exiting");
        });
    });
}

/// Blocks until the UI takes the event; the session has no second fetch to
/// fall back on. Returns `false` when the UI side is gone.
fn deliver_outcome(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.send(event) {
        Ok(()) => true,
        Err(_) => {
            tracing::error!("backend: ui event queue closed; fetch outcome dropped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn outcome_waits_for_room_in_a_full_queue() {
        let (ui_tx, ui_rx) = bounded(1);
        ui_tx
            .try_send(UiEvent::Info("Backend worker ready".to_string()))
            .expect("prefill");

        let drain = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            let first = ui_rx.recv().expect("info event");
            let second = ui_rx.recv().expect("fetch outcome");
            (first, second)
        });

        assert!(deliver_outcome(&ui_tx, UiEvent::CountriesLoaded(Vec::new())));
        let (first, second) = drain.join().expect("drain thread");
        assert!(matches!(first, UiEvent::Info(_)));
        assert!(matches!(second, UiEvent::CountriesLoaded(countries) if countries.is_empty()));
    }

    #[test]
    fn outcome_reports_closed_ui_queue() {
        let (ui_tx, ui_rx) = bounded::<UiEvent>(1);
        drop(ui_rx);
        assert!(!deliver_outcome(&ui_tx, UiEvent::CountriesLoaded(Vec::new())));
    }
}
