use axum::{
    Form, Json,
    extract::{FromRequest, Path, Request, State},
    http::header::CONTENT_TYPE,
};
use std::sync::Arc;

use crate::data_models::Hook;
use crate::reply::Reply;

use super::models::AppState;

pub async fn command_handler(
    State(state): State<Arc<AppState>>,
    Path(command): Path<String>,
    request: Request,
) -> Json<Reply> {
    log::info!("handling command: '{command}'");

    let hook = decode_hook(request).await;
    log::info!("hook details: {:?}", hook);

    if !state.config.token_matches(hook.token.as_deref()) {
        log::warn!("hook for '{command}' carries an unexpected token");
    }

    let reply = state.registry.dispatch(&command, &hook).await;
    log::info!("sending reply: {:?}", reply.text);
    Json(reply)
}

/// Accepts form bodies (what the chat platform sends) and JSON. Anything that
/// doesn't decode becomes an empty hook so the caller still gets a reply.
async fn decode_hook(request: Request) -> Hook {
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    let decoded = if is_json {
        Json::<Hook>::from_request(request, &())
            .await
            .map(|Json(hook)| hook)
            .map_err(|e| e.body_text())
    } else {
        Form::<Hook>::from_request(request, &())
            .await
            .map(|Form(hook)| hook)
            .map_err(|e| e.body_text())
    };

    decoded.unwrap_or_else(|e| {
        log::warn!("could not decode hook body: {e}");
        Hook::default()
    })
}
