use serde::{Deserialize, Serialize};

use crate::data_models::SearchResult;
use crate::error::WikibotError;

/// The single message sent back for a hook, serialised as `{"text": ...}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Reply { text: text.into() }
    }

    /// Formats entry `idx` of a result. `None` if there is no such entry.
    pub fn from_result(result: &SearchResult, idx: usize) -> Option<Self> {
        let title = result.titles.get(idx)?;
        let description = result.descriptions.get(idx)?;
        let url = result.urls.get(idx)?;
        Some(Reply::new(format!("\"{title}\" - \"{description}\"... {url}")))
    }

    pub fn error(user: &str, err: &WikibotError) -> Self {
        Reply::new(format!(
            "Sorry, @{user}, I can't process that request because of this error: \"{err}\""
        ))
    }
}
