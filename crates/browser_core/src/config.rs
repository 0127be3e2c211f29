use std::fs;

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v2/region/europe";
pub const SETTINGS_FILE: &str = "country_browser.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub countries_url: String,
    pub window_title: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            countries_url: DEFAULT_COUNTRIES_URL.into(),
            window_title: "Country Browser".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    countries_url: Option<String>,
    window_title: Option<String>,
    log_filter: Option<String>,
}

/// Defaults, then `country_browser.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(raw.as_deref(), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings =
            toml::from_str(raw).with_context(|| format!("failed to parse {SETTINGS_FILE}"))?;
        if let Some(v) = file_cfg.countries_url {
            settings.countries_url = v;
        }
        if let Some(v) = file_cfg.window_title {
            settings.window_title = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = env("COUNTRY_BROWSER_URL") {
        settings.countries_url = v;
    }
    if let Some(v) = env("APP__COUNTRIES_URL") {
        settings.countries_url = v;
    }
    if let Some(v) = env("APP__WINDOW_TITLE") {
        settings.window_title = v;
    }

    settings.countries_url = prepare_countries_url(&settings.countries_url)?;
    Ok(settings)
}

/// Blank falls back to the default endpoint; anything else must be an
/// absolute http(s) URL.
pub fn prepare_countries_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_COUNTRIES_URL.to_string());
    }

    let url = Url::parse(raw).with_context(|| format!("invalid countries url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => bail!("countries url '{raw}' uses unsupported scheme '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let settings = load_settings_from(None, env_from(&[])).expect("settings");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let raw = r#"
            countries_url = "http://127.0.0.1:9000/region/europe"
            window_title = "Europe"
        "#;
        let settings = load_settings_from(Some(raw), env_from(&[])).expect("settings");
        assert_eq!(settings.countries_url, "http://127.0.0.1:9000/region/europe");
        assert_eq!(settings.window_title, "Europe");
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn app_prefixed_env_wins_over_file_and_plain_env() {
        let raw = r#"countries_url = "http://file.example/countries""#;
        let settings = load_settings_from(
            Some(raw),
            env_from(&[
                ("COUNTRY_BROWSER_URL", "http://plain.example/countries"),
                ("APP__COUNTRIES_URL", "http://app.example/countries"),
            ]),
        )
        .expect("settings");
        assert_eq!(settings.countries_url, "http://app.example/countries");
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        assert_eq!(prepare_countries_url("   ").expect("url"), DEFAULT_COUNTRIES_URL);
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(prepare_countries_url("ftp://example.com/countries").is_err());
        assert!(prepare_countries_url("not a url").is_err());
    }

    #[test]
    fn rejects_unknown_file_keys() {
        let err = load_settings_from(Some("bind_addr = \"0.0.0.0\""), env_from(&[]))
            .expect_err("unknown key");
        assert!(err.to_string().contains(SETTINGS_FILE));
    }
}
