use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::data_models::Hook;
use crate::error::WikibotError;
use crate::query::OpenSearchQuery;
use crate::reply::Reply;
use crate::search::Search;

pub const WIKI: &str = "wiki";

#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// `hook.text` has already had the command token stripped.
    async fn handle(&self, hook: &Hook) -> Result<Reply, WikibotError>;
}

/// Looks the phrase up and replies with the best match.
pub struct WikiCommand {
    search: Arc<dyn Search>,
}

impl WikiCommand {
    pub fn new(search: Arc<dyn Search>) -> Self {
        WikiCommand { search }
    }
}

#[async_trait]
impl CommandHandler for WikiCommand {
    async fn handle(&self, hook: &Hook) -> Result<Reply, WikibotError> {
        let query = OpenSearchQuery::new(hook.text.as_str());
        let result = self.search.search(&query).await?;
        Reply::from_result(&result, 0).ok_or_else(|| WikibotError::no_results(hook.text.as_str()))
    }
}

/// Removes the command token and one following delimiter from `text`.
///
/// Counts characters, not bytes, and never looks at what the token actually
/// says: the platform has already matched it.
pub fn strip_command(command: &str, text: &str) -> String {
    let mut rest = text.chars().skip(command.chars().count()).peekable();
    if rest.peek().is_some_and(|c| c.is_whitespace()) {
        rest.next();
    }
    rest.collect()
}

/// Command name to handler. Built once at startup and only read afterwards.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in command wired to `search`.
    pub fn with_defaults(search: Arc<dyn Search>) -> Self {
        Self::new().register(WIKI, WikiCommand::new(search))
    }

    pub fn register(
        mut self,
        command: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Self {
        self.handlers.insert(command.into(), Arc::new(handler));
        self
    }

    pub fn get(&self, command: &str) -> Option<&Arc<dyn CommandHandler>> {
        self.handlers.get(command)
    }

    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Always produces exactly one reply, whatever happens.
    pub async fn dispatch(&self, command: &str, hook: &Hook) -> Reply {
        let Some(handler) = self.get(command) else {
            log::warn!("no handler found for command: '{command}'");
            return Reply::error(hook.user(), &WikibotError::routing(command));
        };

        log::info!("found handler for command '{command}'");
        let hook = hook.with_text(strip_command(command, &hook.text));
        match handler.handle(&hook).await {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("command '{command}' failed: {e}");
                Reply::error(hook.user(), &e)
            }
        }
    }
}

#[test]
fn test_strip_command() {
    assert_eq!(strip_command("wiki", "wiki albert einstein"), "albert einstein");
    assert_eq!(strip_command("wiki", "wiki  two spaces"), " two spaces");
    assert_eq!(strip_command("wiki", "wiki"), "");
    assert_eq!(strip_command("wiki", "wikipedia"), "pedia");
    assert_eq!(strip_command("wiki", "wi"), "");
    assert_eq!(strip_command("wiki", "wiki\tcafé"), "café");
    assert_eq!(strip_command("wiki", "wiki Zürich"), "Zürich");
    assert_eq!(strip_command("日本", "日本 東京"), "東京");
}

#[test]
fn test_strip_round_trips() {
    for text in ["", "rust", "albert einstein", " leading", "ünïcödé words"] {
        let full = format!("{WIKI} {text}");
        assert_eq!(strip_command(WIKI, &full), text);
    }
}
