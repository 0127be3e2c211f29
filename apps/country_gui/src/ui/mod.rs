//! UI layer: app shell and the country card grid.

pub mod app;

pub use app::{CountryBrowserApp, StartupConfig};
