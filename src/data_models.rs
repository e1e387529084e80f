use serde::{Deserialize, Deserializer, Serialize};

use crate::error::WikibotError;

/// One inbound webhook invocation, as the chat platform posts it.
///
/// Only `text` matters for routing; the rest is used for replies and logs.
/// Fields we don't know about are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Hook {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub trigger_word: Option<String>,
}

impl Hook {
    pub fn new(user_name: impl Into<String>, text: impl Into<String>) -> Hook {
        Hook {
            user_name: Some(user_name.into()),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Name to address in replies: user name, then user id, then a placeholder.
    pub fn user(&self) -> &str {
        self.user_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.user_id.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("someone")
    }

    /// Same hook with its text replaced.
    pub fn with_text(&self, text: String) -> Hook {
        Hook {
            text,
            ..self.clone()
        }
    }
}

/// Parsed opensearch response.
///
/// On the wire this is `[query, [titles], [descriptions], [urls]]`; the three
/// lists are index-aligned.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub query: String,
    pub titles: Vec<String>,
    pub descriptions: Vec<String>,
    pub urls: Vec<String>,
}

impl SearchResult {
    pub fn new(
        query: String,
        titles: Vec<String>,
        descriptions: Vec<String>,
        urls: Vec<String>,
    ) -> Result<SearchResult, WikibotError> {
        check_lengths(&titles, &descriptions, &urls)
            .map_err(|message| WikibotError::upstream(None, message))?;
        Ok(SearchResult {
            query,
            titles,
            descriptions,
            urls,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }
}

impl<'de> Deserialize<'de> for SearchResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (query, titles, descriptions, urls) =
            <(String, Vec<String>, Vec<String>, Vec<String>)>::deserialize(deserializer)?;
        check_lengths(&titles, &descriptions, &urls).map_err(serde::de::Error::custom)?;
        Ok(SearchResult {
            query,
            titles,
            descriptions,
            urls,
        })
    }
}

fn check_lengths(titles: &[String], descriptions: &[String], urls: &[String]) -> Result<(), String> {
    if titles.len() != descriptions.len() || titles.len() != urls.len() {
        return Err(format!(
            "mismatched result lengths: {} titles, {} descriptions, {} urls",
            titles.len(),
            descriptions.len(),
            urls.len()
        ));
    }
    Ok(())
}
