use super::*;
use axum::{http::StatusCode, routing::get, Router};
use shared::{FetchErrorKind, FilterChoice, SortKey};
use tokio::net::TcpListener;

use crate::view_state::ViewAction;

const EUROPE_FIXTURE: &str = r#"[
    {
        "name": "Spain",
        "alpha3Code": "ESP",
        "capital": "Madrid",
        "subregion": "Southern Europe",
        "population": 46438422,
        "borders": ["AND", "FRA", "GIB", "PRT", "MAR"],
        "languages": [{"iso639_1": "es", "iso639_2": "spa", "name": "Spanish", "nativeName": "Español"}],
        "flag": "https://restcountries.eu/data/esp.svg"
    },
    {
        "name": "Norway",
        "alpha3Code": "NOR",
        "capital": "Oslo",
        "subregion": "Northern Europe",
        "population": 5223256,
        "borders": ["FIN", "SWE", "RUS"],
        "languages": [
            {"iso639_1": "no", "iso639_2": "nor", "name": "Norwegian"},
            {"iso639_1": "nb", "iso639_2": "nob", "name": "Norwegian Bokmål"},
            {"iso639_1": "nn", "iso639_2": "nno", "name": "Norwegian Nynorsk"}
        ],
        "flag": "https://restcountries.eu/data/nor.svg"
    }
]"#;

async fn spawn_country_server() -> Result<String, std::io::Error> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route(
            "/region/europe",
            get(|| async { ([("content-type", "application/json")], EUROPE_FIXTURE) }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/garbage", get(|| async { "<html>not json</html>" }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn fetches_and_decodes_country_payload() {
    let server_url = spawn_country_server().await.expect("spawn server");
    let client = CountryClient::new(format!("{server_url}/region/europe"));

    let countries = client.fetch_countries().await.expect("fetch");
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].name, "Spain");
    assert_eq!(countries[1].language_count(), 3);
    assert_eq!(countries[1].alpha3_code, "NOR");
}

#[tokio::test]
async fn non_success_status_is_a_fetch_failure() {
    let server_url = spawn_country_server().await.expect("spawn server");
    let client = CountryClient::new(format!("{server_url}/broken"));

    let err = client.fetch_countries().await.expect_err("500");
    assert_eq!(err.kind, FetchErrorKind::HttpStatus);
    assert!(err.message.contains("500"), "unexpected message: {err}");
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server_url = spawn_country_server().await.expect("spawn server");
    let client = CountryClient::new(format!("{server_url}/garbage"));

    let err = client.fetch_countries().await.expect_err("garbage");
    assert_eq!(err.kind, FetchErrorKind::Decode);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = CountryClient::new(format!("http://{addr}/region/europe"));
    let err = client.fetch_countries().await.expect_err("refused");
    assert_eq!(err.kind, FetchErrorKind::Transport);
}

#[tokio::test]
async fn browser_loads_from_http_and_filters() {
    let server_url = spawn_country_server().await.expect("spawn server");
    let client = CountryClient::new(format!("{server_url}/region/europe"));
    let mut browser = CountryBrowser::new();

    browser.load(&client).await.expect("load");
    browser
        .dispatch(ViewAction::Sort(SortKey::PopulationAscending))
        .expect("sort");
    browser
        .dispatch(ViewAction::Languages(FilterChoice::Only(1)))
        .expect("languages");

    let names: Vec<_> = browser
        .displayed()
        .iter()
        .map(|country| country.name.as_str())
        .collect();
    assert_eq!(names, vec!["Spain"]);
}
