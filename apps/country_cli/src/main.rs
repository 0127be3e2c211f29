use std::{fmt::Write as _, process::ExitCode};

use anyhow::Result;
use browser_core::{
    config::prepare_countries_url, load_settings, present, BrowserView, CountryBrowser,
    CountryClient, CountrySource, LoadedView, ViewAction,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fetch the country list once, apply view actions in order, print the cards.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    countries_url: Option<String>,
    /// Applied in the order given, e.g. `--action "subregion:Northern Europe" --action sort:pop-desc`.
    /// Kinds: sort:<name-asc|name-desc|pop-asc|pop-desc>, subregion:<name|all>, languages:<count|all>.
    #[arg(long = "action")]
    actions: Vec<ViewAction>,
    /// Print the displayed records as JSON instead of cards.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings()?;
    if let Some(url) = args.countries_url {
        settings.countries_url = prepare_countries_url(&url)?;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = CountryClient::new(settings.countries_url);
    let outcome = run(&client, args.actions, args.json).await?;
    match outcome {
        Outcome::Rendered(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Failed(output) => {
            eprint!("{output}");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Rendered(String),
    Failed(String),
}

/// Loads once, applies the actions in order, and renders the result.
async fn run<S>(source: &S, actions: Vec<ViewAction>, json: bool) -> Result<Outcome>
where
    S: CountrySource + ?Sized,
{
    let mut browser = CountryBrowser::new();
    browser.load(source).await?;

    if browser.error().is_some() {
        return Ok(Outcome::Failed(render_text(&present(&browser))));
    }
    info!(count = browser.displayed().len(), "countries loaded");

    for action in actions {
        info!(?action, "applying view action");
        browser.dispatch(action)?;
    }

    if json {
        let mut output = serde_json::to_string_pretty(browser.displayed())?;
        output.push('\n');
        Ok(Outcome::Rendered(output))
    } else {
        Ok(Outcome::Rendered(render_text(&present(&browser))))
    }
}

fn render_text(view: &BrowserView) -> String {
    match view {
        BrowserView::Loading => "Loading countries...\n".to_string(),
        BrowserView::Error { message } => format!("{message}\n"),
        BrowserView::Loaded(view) => render_loaded(view),
    }
}

fn render_loaded(view: &LoadedView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{} {}", view.sort.label, view.sort.selected_label());
    let _ = writeln!(
        out,
        "{} {}",
        view.subregion.label,
        view.subregion.selected_label()
    );
    let _ = writeln!(
        out,
        "{} {}",
        view.languages.label,
        view.languages.selected_label()
    );

    for card in &view.cards {
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ({})", card.title, card.alpha3_code);
        for line in [
            &card.subregion_line,
            &card.capital_line,
            &card.population_line,
            &card.languages_line,
        ] {
            let _ = writeln!(out, "   {line}");
        }
    }
    out
}
