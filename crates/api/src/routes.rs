//! Route handlers: `/` greeting and `/screen`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use screener_engine::{ScreeningError, ScreeningMatch, ScreeningQuery};

use crate::context::AppContext;

/// Placeholder rendered for NULL source fields.
const MISSING_FIELD: &str = "-";

pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/screen", get(screen))
        .with_state(context)
}

async fn root() -> Json<Value> {
    Json(json!({
        "status": "success",
        "response": "Welcome to the sanctions screener"
    }))
}

#[derive(Deserialize)]
struct ScreenParams {
    name: String,
    threshold: Option<f64>,
}

async fn screen(
    State(context): State<Arc<AppContext>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(params): Query<ScreenParams>,
) -> Result<Json<Value>, ApiError> {
    let threshold = params
        .threshold
        .unwrap_or(context.service.config().default_threshold);
    let query = ScreeningQuery::new(params.name, threshold, addr.ip());
    let outcome = context.service.screen(query).await?;

    let status = if outcome.matched {
        "potential matches found"
    } else {
        "no matches found"
    };
    let entities: Vec<Value> = outcome.matches.iter().map(render_match).collect();

    Ok(Json(json!({
        "status": status,
        "client_host": addr.ip().to_string(),
        "entities": entities,
    })))
}

/// One match rendered as the source row's fields plus its `fuzz`
/// score. NULL columns surface as `"-"` here, never in the domain
/// model.
fn render_match(m: &ScreeningMatch) -> Value {
    let mut fields = Map::new();
    fields.insert("id".to_string(), Value::from(m.entry_id));
    fields.insert("name".to_string(), Value::from(m.raw_name.clone()));
    fields.insert(
        "cleaned_name".to_string(),
        Value::from(m.canonical_name.clone()),
    );
    for (key, value) in &m.attributes {
        let rendered = match value {
            Some(v) => Value::from(v.clone()),
            None => Value::from(MISSING_FIELD),
        };
        fields.insert(key.clone(), rendered);
    }
    fields.insert("fuzz".to_string(), Value::from(m.score));
    Value::Object(fields)
}

/// HTTP mapping of the screening error taxonomy. Each kind keeps its
/// own status so callers and operators can tell them apart; an audit
/// write failure in particular is never dressed up as a success.
pub struct ApiError(ScreeningError);

impl From<ScreeningError> for ApiError {
    fn from(err: ScreeningError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ScreeningError::InvalidThreshold(_) => StatusCode::BAD_REQUEST,
            ScreeningError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ScreeningError::AuditWriteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("screen request failed: {}", self.0);
        }
        let body = Json(json!({
            "status": "error",
            "error": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_match_substitutes_placeholder_for_null_fields() {
        let m = ScreeningMatch {
            entry_id: 42,
            score: 0.913,
            raw_name: "John Smith".to_string(),
            canonical_name: "JOHN SMITH".to_string(),
            attributes: BTreeMap::from([
                ("country".to_string(), Some("GB".to_string())),
                ("remarks".to_string(), None),
            ]),
        };

        let rendered = render_match(&m);
        assert_eq!(rendered["id"], 42);
        assert_eq!(rendered["name"], "John Smith");
        assert_eq!(rendered["cleaned_name"], "JOHN SMITH");
        assert_eq!(rendered["country"], "GB");
        assert_eq!(rendered["remarks"], "-");
        assert_eq!(rendered["fuzz"], 0.913);
    }
}
