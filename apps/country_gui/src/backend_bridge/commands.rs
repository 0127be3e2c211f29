//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    FetchCountries { countries_url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchCountries { .. } => "fetch_countries",
        }
    }
}
