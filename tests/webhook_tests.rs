use async_trait::async_trait;
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::Query,
    http::{Request, StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use wikibot::api::{AppState, create_router};
use wikibot::commands::{CommandHandler, CommandRegistry};
use wikibot::config::Config;
use wikibot::data_models::{Hook, SearchResult};
use wikibot::error::WikibotError;
use wikibot::query::OpenSearchQuery;
use wikibot::reply::Reply;
use wikibot::search::{Search, WikiClient};

mod test_helpers {
    use super::*;

    /// Answers every query with a canned result and records what it was asked.
    pub struct StubSearch {
        result: Result<SearchResult, WikibotError>,
        pub seen: Mutex<Vec<String>>,
    }

    impl StubSearch {
        pub fn returning(result: Result<SearchResult, WikibotError>) -> Arc<Self> {
            Arc::new(StubSearch {
                result,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Search for StubSearch {
        async fn search(&self, query: &OpenSearchQuery) -> Result<SearchResult, WikibotError> {
            self.seen.lock().unwrap().push(query.search.clone());
            self.result.clone()
        }
    }

    /// Echoes whatever text it receives.
    pub struct Echo;

    #[async_trait]
    impl CommandHandler for Echo {
        async fn handle(&self, hook: &Hook) -> Result<Reply, WikibotError> {
            Ok(Reply::new(hook.text.clone()))
        }
    }

    pub fn einstein() -> SearchResult {
        SearchResult::new(
            "albert einstein".to_string(),
            vec!["Albert Einstein".to_string()],
            vec!["German physicist".to_string()],
            vec!["https://en.wikipedia.org/wiki/Albert_Einstein".to_string()],
        )
        .unwrap()
    }

    pub fn empty(query: &str) -> SearchResult {
        SearchResult::new(query.to_string(), vec![], vec![], vec![]).unwrap()
    }

    pub fn app(registry: CommandRegistry) -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        create_router(Arc::new(AppState::new(registry, config)))
    }

    pub async fn post_form(app: Router, path: &str, body: &str) -> (StatusCode, Reply) {
        post(app, path, "application/x-www-form-urlencoded", body.to_string()).await
    }

    pub async fn post(
        app: Router,
        path: &str,
        content_type: &str,
        body: String,
    ) -> (StatusCode, Reply) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub fn expected_error(user: &str, message: &str) -> String {
        format!("Sorry, @{user}, I can't process that request because of this error: \"{message}\"")
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_wiki_command_replies_with_first_match() {
    let search = StubSearch::returning(Ok(einstein()));
    let app = app(CommandRegistry::with_defaults(search.clone()));

    let (status, reply) =
        post_form(app, "/wiki", "user_name=bob&text=wiki+albert+einstein").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        reply.text,
        "\"Albert Einstein\" - \"German physicist\"... https://en.wikipedia.org/wiki/Albert_Einstein"
    );
    assert_eq!(*search.seen.lock().unwrap(), vec!["albert einstein"]);
}

#[tokio::test]
async fn test_wiki_command_without_results() {
    let search = StubSearch::returning(Ok(empty("zzzznotaword")));
    let app = app(CommandRegistry::with_defaults(search));

    let (status, reply) = post_form(app, "/wiki", "user_name=bob&text=wiki+zzzznotaword").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        reply.text,
        expected_error("bob", "Could not find any results for: 'zzzznotaword'.")
    );
}

#[tokio::test]
async fn test_upstream_failure_becomes_reply() {
    let search = StubSearch::returning(Err(WikibotError::upstream(Some(502), "Bad Gateway")));
    let app = app(CommandRegistry::with_defaults(search));

    let (status, reply) = post_form(app, "/wiki", "user_name=bob&text=wiki+rust").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        reply.text,
        expected_error("bob", "Error making HTTP request: 502 - Bad Gateway.")
    );
}

#[tokio::test]
async fn test_unknown_command() {
    let search = StubSearch::returning(Ok(einstein()));
    let app = app(CommandRegistry::with_defaults(search.clone()));

    let (status, reply) = post_form(app, "/foo", "user_name=bob&text=foo+bar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply.text, expected_error("bob", "Command not found: 'foo'."));
    assert!(search.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_command_ignores_hook_content() {
    for body in ["", "text=wiki+albert+einstein", "user_id=U1&text=%F0%9F%A6%80"] {
        let app = app(CommandRegistry::with_defaults(StubSearch::returning(Ok(
            einstein(),
        ))));
        let (_, reply) = post_form(app, "/foo", body).await;
        assert!(
            reply
                .text
                .ends_with("because of this error: \"Command not found: 'foo'.\""),
            "{body}: {}",
            reply.text
        );
    }
}

#[tokio::test]
async fn test_json_body_is_accepted() {
    let search = StubSearch::returning(Ok(einstein()));
    let app = app(CommandRegistry::with_defaults(search.clone()));

    let body = serde_json::json!({ "user_id": "U42", "text": "wiki albert einstein" });
    let (status, reply) = post(app, "/wiki", "application/json", body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(reply.text.starts_with("\"Albert Einstein\""));
    assert_eq!(*search.seen.lock().unwrap(), vec!["albert einstein"]);
}

#[tokio::test]
async fn test_undecodable_body_still_gets_a_reply() {
    let app = app(CommandRegistry::new());

    let (status, reply) = post(app, "/wiki", "application/json", "{not json".to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        reply.text,
        expected_error("someone", "Command not found: 'wiki'.")
    );
}

#[tokio::test]
async fn test_handler_receives_stripped_text() {
    let registry = CommandRegistry::new().register("echo", Echo);

    for text in ["hello world", "", "  padded", "ünïcödé"] {
        let hook = Hook::new("bob", format!("echo {text}"));
        let reply = registry.dispatch("echo", &hook).await;
        assert_eq!(reply.text, text);
    }
}

#[tokio::test]
async fn test_registry_lists_commands() {
    let registry = CommandRegistry::with_defaults(StubSearch::returning(Ok(einstein())))
        .register("echo", Echo);
    assert_eq!(registry.commands(), vec!["echo", "wiki"]);
    assert!(registry.get("wiki").is_some());
    assert!(registry.get("foo").is_none());
}

async fn stub_opensearch(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let search = params.get("search").cloned().unwrap_or_default();
    if search == "albert einstein" {
        Json(serde_json::json!([
            "albert einstein",
            ["Albert Einstein"],
            ["German physicist"],
            ["https://en.wikipedia.org/wiki/Albert_Einstein"]
        ]))
    } else {
        Json(serde_json::json!([search, [], [], []]))
    }
}

#[tokio::test]
async fn test_end_to_end_against_stub_api() {
    let stub = Router::new().route("/w/api.php", get(stub_opensearch));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });

    let client = Arc::new(WikiClient::with_api_url(format!("http://{addr}/w/api.php")));
    let registry = CommandRegistry::with_defaults(client);
    let state = Arc::new(AppState::new(registry, Config::from_lookup(|_| None).unwrap()));

    let (_, reply) = post_form(
        create_router(state.clone()),
        "/wiki",
        "user_name=carol&text=wiki+albert+einstein",
    )
    .await;
    assert_eq!(
        reply.text,
        "\"Albert Einstein\" - \"German physicist\"... https://en.wikipedia.org/wiki/Albert_Einstein"
    );

    let (_, reply) = post_form(
        create_router(state),
        "/wiki",
        "user_name=carol&text=wiki+zzzznotaword",
    )
    .await;
    assert_eq!(
        reply.text,
        expected_error("carol", "Could not find any results for: 'zzzznotaword'.")
    );
}
