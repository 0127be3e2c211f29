use browser_core::{
    presenter::{handle_card_click, Dropdown, LoadedView},
    present, BorderHighlight, BrowserView, CardView, CountryBrowser, ViewAction,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::dispatch_backend_command, reducer::reduce,
};

const CARD_WIDTH: f32 = 260.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub countries_url: String,
}

pub struct CountryBrowserApp {
    // Held so the backend worker's queue stays open for the whole session.
    _cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    browser: CountryBrowser,
    border_highlight: BorderHighlight,
    status: String,
}

impl CountryBrowserApp {
    /// Queues the one country fetch of the session.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut status = "Loading countries...".to_string();
        dispatch_backend_command(
            &cmd_tx,
            BackendCommand::FetchCountries {
                countries_url: startup.countries_url,
            },
            &mut status,
        );
        Self {
            _cmd_tx: cmd_tx,
            ui_rx,
            browser: CountryBrowser::new(),
            border_highlight: BorderHighlight,
            status,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reduce(&mut self.browser, &mut self.status, event);
        }
    }

    fn show_loaded(&mut self, ui: &mut egui::Ui, view: &LoadedView) {
        let mut action = None;
        ui.horizontal_wrapped(|ui| {
            action = action
                .take()
                .or(show_dropdown(ui, "sort", &view.sort).map(ViewAction::Sort))
                .or(show_dropdown(ui, "subregion", &view.subregion).map(ViewAction::Subregion))
                .or(show_dropdown(ui, "languages", &view.languages).map(ViewAction::Languages));
        });
        ui.separator();

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for card in &view.cards {
                        if show_card(ui, card) {
                            clicked = Some(card.index);
                        }
                    }
                });
            });

        if let Some(index) = clicked {
            handle_card_click(&self.browser, index, &self.border_highlight);
        }
        if let Some(action) = action {
            if let Err(err) = self.browser.dispatch(action) {
                tracing::warn!("ignored view action: {err}");
            }
        }
    }
}

/// Returns the newly picked value, if the selection changed this frame.
fn show_dropdown<T: Clone + PartialEq>(
    ui: &mut egui::Ui,
    id: &str,
    dropdown: &Dropdown<T>,
) -> Option<T> {
    let mut picked = None;
    ui.label(dropdown.label);
    egui::ComboBox::from_id_salt(id)
        .width(220.0)
        .selected_text(dropdown.selected_label())
        .show_ui(ui, |ui| {
            for option in &dropdown.options {
                let is_selected = option.value == dropdown.selected;
                if ui.selectable_label(is_selected, &option.label).clicked() && !is_selected {
                    picked = Some(option.value.clone());
                }
            }
        });
    ui.add_space(16.0);
    picked
}

fn show_card(ui: &mut egui::Ui, card: &CardView) -> bool {
    let frame = egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(10));
    let response = frame
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.heading(&card.title);
            if !card.flag_image_url.is_empty() {
                ui.hyperlink_to("Flag", &card.flag_image_url);
            }
            ui.label(&card.subregion_line);
            ui.label(&card.capital_line);
            ui.label(&card.population_line);
            ui.label(&card.languages_line);
        })
        .response;

    ui.interact(
        response.rect,
        ui.id().with(("country_card", card.index)),
        egui::Sense::click(),
    )
    .on_hover_cursor(egui::CursorIcon::PointingHand)
    .clicked()
}

impl eframe::App for CountryBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| match present(&self.browser) {
            BrowserView::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading countries...");
                });
            }
            BrowserView::Error { message } => {
                ui.label(message);
            }
            BrowserView::Loaded(view) => {
                ui.vertical_centered(|ui| ui.heading(view.title));
                self.show_loaded(ui, &view);
            }
        });

        if self.browser.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
