//! Page and fragment handlers
//!
//! Components are built fresh for every request and dropped with the
//! response. Only the counter value outlives a request.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use serde_json::{json, Map};

use crate::components::flow::{generate_flow, generate_flow_data_by_type, FlowComponent};
use crate::components::table::{generate_user_data, TableComponent};
use crate::components::Counter;

use super::error::AppError;
use super::state::AppState;

/// Page template rendered by `GET /`
pub const INDEX_TEMPLATE: &str = "index.html";

const TABLE_TITLE: &str = "User Management";

/// Query parameters for `GET /`
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Flow diagram to show instead of the configured one
    pub flow: Option<String>,
}

/// GET / - Full page with every component rendered in place
///
/// Query params:
///   - flow: simple, decision, workflow or random
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexQuery>,
) -> Result<Html<String>, AppError> {
    let counter = counter(&state, state.count());

    let (rows, columns) = generate_user_data(state.demo.table_rows);
    let user_table = TableComponent::new(TABLE_TITLE, columns, rows);

    let flow_data = match params.flow {
        Some(kind) => generate_flow_data_by_type(&kind)?,
        None => generate_flow(state.demo.flow_kind),
    };
    let flow_data = match &state.demo.flow_title {
        Some(title) => flow_data.with_title(title),
        None => flow_data,
    };
    let flow = FlowComponent::from(flow_data);

    let mut props = Map::new();
    props.insert(
        "CounterComponent".to_string(),
        state.renderer.props(&counter)?,
    );
    props.insert(
        "UserTableComponent".to_string(),
        state.renderer.props(&user_table)?,
    );
    props.insert("FlowComponent".to_string(), state.renderer.props(&flow)?);

    let page = state
        .renderer
        .render_page(INDEX_TEMPLATE, &json!({ "props": props }))?;

    Ok(Html(page.into_string()))
}

/// POST /increment - Returns the updated counter fragment
pub async fn increment(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    counter_fragment(&state, 1)
}

/// POST /decrement - Returns the updated counter fragment
pub async fn decrement(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    counter_fragment(&state, -1)
}

/// Counter with the configured heading, so fragments match the full page
fn counter(state: &AppState, count: i64) -> Counter {
    match &state.demo.counter_title {
        Some(title) => Counter::new(count).with_title(title),
        None => Counter::new(count),
    }
}

fn counter_fragment(state: &AppState, delta: i64) -> Result<Html<String>, AppError> {
    let count = state.adjust(delta);
    tracing::debug!(count, delta, "Counter updated");

    let html = state.renderer.html(&counter(state, count))?;
    Ok(Html(html.into_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Renderer;
    use crate::config::DemoConfig;
    use crate::engine::JinjaEngine;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let engine = JinjaEngine::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"));
        let renderer = Renderer::with_engine(Arc::new(engine));
        let demo = DemoConfig {
            table_rows: 4,
            ..DemoConfig::default()
        };
        AppState::new(Arc::new(renderer), demo)
    }

    fn query(flow: Option<&str>) -> Query<IndexQuery> {
        Query(IndexQuery {
            flow: flow.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_increment_twice_from_zero() {
        let state = test_state();
        increment(State(state.clone())).await.unwrap();
        let Html(body) = increment(State(state.clone())).await.unwrap();

        assert!(body.contains(">2<"), "{}", body);
        assert!(body.contains("id=\"counter\""));
        assert_eq!(state.count(), 2);
    }

    #[tokio::test]
    async fn test_decrement_goes_negative() {
        let state = test_state();
        let Html(body) = decrement(State(state.clone())).await.unwrap();
        assert!(body.contains(">-1<"), "{}", body);
    }

    #[tokio::test]
    async fn test_fragment_is_not_a_full_page() {
        let Html(body) = increment(State(test_state())).await.unwrap();
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn test_index_places_all_components() {
        let state = test_state();
        state.adjust(7);

        let Html(body) = index(State(state), query(Some("workflow"))).await.unwrap();
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains(">7<"));
        assert!(body.contains("User Management"));
        assert!(body.contains("Submit Request"));
        // Fragments are embedded as markup, not escaped text
        assert!(body.contains("<section id=\"counter\""));
        assert!(!body.contains("&lt;section"));
    }

    #[tokio::test]
    async fn test_index_uses_configured_flow() {
        let Html(body) = index(State(test_state()), query(None)).await.unwrap();
        assert!(body.contains("Random Flow"));
    }

    #[tokio::test]
    async fn test_configured_titles() {
        let mut state = test_state();
        state.demo.counter_title = Some("Clicks".to_string());
        state.demo.flow_title = Some("Pipeline".to_string());

        let Html(page) = index(State(state.clone()), query(Some("simple"))).await.unwrap();
        assert!(page.contains("Clicks"));
        assert!(page.contains("Pipeline"));
        assert!(!page.contains("Simple Flow"));

        // The swapped-in fragment keeps the same heading
        let Html(fragment) = increment(State(state)).await.unwrap();
        assert!(fragment.contains("Clicks"));
        assert!(!fragment.contains("HTMX Counter SPA"));
    }

    #[tokio::test]
    async fn test_index_rejects_unknown_flow() {
        let result = index(State(test_state()), query(Some("nonexistent"))).await;
        assert!(matches!(result, Err(AppError::BadRequest(ref msg)) if msg.contains("nonexistent")));
    }

    #[tokio::test]
    async fn test_render_failure_without_engine() {
        let state = AppState::new(Arc::new(Renderer::new()), DemoConfig::default());
        let result = increment(State(state)).await;
        assert!(matches!(result, Err(AppError::Render(ref msg)) if msg.contains("set_engine")));
    }
}
