//! UI/backend events and error modeling for the country browser window.

use shared::{CountryRecord, FetchError, FetchErrorKind};

pub enum UiEvent {
    Info(String),
    CountriesLoaded(Vec<CountryRecord>),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    HttpStatus,
    Decode,
    Unknown,
}

impl From<FetchErrorKind> for UiErrorCategory {
    fn from(value: FetchErrorKind) -> Self {
        match value {
            FetchErrorKind::Transport => UiErrorCategory::Transport,
            FetchErrorKind::HttpStatus => UiErrorCategory::HttpStatus,
            FetchErrorKind::Decode => UiErrorCategory::Decode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchCountries,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_fetch_error(context: UiErrorContext, err: FetchError) -> Self {
        Self {
            category: err.kind.into(),
            context,
            message: err.message,
        }
    }

    /// Categorizes free-form failures, e.g. from runtime startup.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("http 4") || message_lower.contains("http 5") {
            UiErrorCategory::HttpStatus
        } else if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("decode")
        {
            UiErrorCategory::Decode
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("dns")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every UI failure ends the session the same way a failed fetch does.
    pub fn to_fetch_error(&self) -> FetchError {
        let kind = match self.category {
            UiErrorCategory::HttpStatus => FetchErrorKind::HttpStatus,
            UiErrorCategory::Decode => FetchErrorKind::Decode,
            UiErrorCategory::Transport | UiErrorCategory::Unknown => FetchErrorKind::Transport,
        };
        FetchError::new(kind, self.message.clone())
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::HttpStatus => "Server",
        UiErrorCategory::Decode => "Payload",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_kind_maps_to_category() {
        let err = UiError::from_fetch_error(
            UiErrorContext::FetchCountries,
            FetchError::http_status(502, "Bad Gateway"),
        );
        assert_eq!(err.category(), UiErrorCategory::HttpStatus);
        assert_eq!(err.context(), UiErrorContext::FetchCountries);
        assert_eq!(err.message(), "HTTP 502: Bad Gateway");
        assert_eq!(err.to_fetch_error().kind, FetchErrorKind::HttpStatus);
    }

    #[test]
    fn classifies_worker_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "Backend worker disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err_label(err.category()), "Network");
    }

    #[test]
    fn unknown_messages_fall_back_to_unknown() {
        let err = UiError::from_message(UiErrorContext::BackendStartup, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.to_fetch_error().message, "something odd");
    }
}
