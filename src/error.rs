use thiserror::Error;

/// Everything that can go wrong while answering a single hook.
///
/// Each variant carries just what its reply message needs. None of them are
/// fatal: they all end up rendered into a [`crate::reply::Reply`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WikibotError {
    /// No handler registered under the requested command name.
    #[error("Command not found: '{command}'.")]
    Routing { command: String },

    /// The encyclopedia API could not be reached, answered with a non-2xx
    /// status, or sent back something that is not an opensearch result.
    #[error("Error making HTTP request: {}{message}.", status_prefix(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The API answered fine but matched no titles.
    #[error("Could not find any results for: '{query}'.")]
    NoResults { query: String },
}

impl WikibotError {
    pub fn routing(command: impl Into<String>) -> Self {
        Self::Routing {
            command: command.into(),
        }
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn no_results(query: impl Into<String>) -> Self {
        Self::NoResults {
            query: query.into(),
        }
    }
}

impl From<reqwest::Error> for WikibotError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        WikibotError::upstream(status, err.to_string())
    }
}

fn status_prefix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("{code} - "),
        None => String::new(),
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        WikibotError::routing("foo").to_string(),
        "Command not found: 'foo'."
    );
    assert_eq!(
        WikibotError::no_results("zzzznotaword").to_string(),
        "Could not find any results for: 'zzzznotaword'."
    );
    assert_eq!(
        WikibotError::upstream(Some(503), "service unavailable").to_string(),
        "Error making HTTP request: 503 - service unavailable."
    );
    assert_eq!(
        WikibotError::upstream(None, "connection refused").to_string(),
        "Error making HTTP request: connection refused."
    );
}
