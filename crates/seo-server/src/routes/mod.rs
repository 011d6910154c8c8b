//! Route definitions for the HTTP API.

pub mod analyze;
pub mod extract;
pub mod health;
pub mod self_check;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(extract::routes())
        .merge(analyze::routes())
        .merge(self_check::routes())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{Body, to_bytes};
    use axum::response::Response;
    use serde_json::Value;

    use crate::config::ServerConfig;
    use crate::state::AppState;

    pub fn state() -> AppState {
        state_with(ServerConfig::default())
    }

    pub fn state_with(config: ServerConfig) -> AppState {
        AppState::new(config).unwrap()
    }

    pub fn json_request(method: &str, uri: &str, body: &Value) -> http::Request<Body> {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
