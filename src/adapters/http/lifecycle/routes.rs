//! Axum router configuration for lifecycle endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    archive_item, create_revision, get_lifecycle, get_reference_list, invalidate_reference_list,
    submit_lifecycle, LifecycleAppState,
};

/// Create the lifecycle API router.
///
/// # Routes
///
/// ## Items
/// - `GET /api/items/:item_type/:id/lifecycle` - Lifecycle panel (item, timeline, gates)
/// - `PUT /api/items/:item_type/:id/lifecycle` - Submit the edit form
/// - `POST /api/items/:item_type/:id/revisions` - Create the next revision
/// - `POST /api/items/:item_type/:id/archive` - Archive the item
///
/// `:item_type` accepts the route segment (`parts`, `assemblies`, `pcbas`,
/// `documents`) or the type name.
///
/// ## Reference data
/// - `GET /api/reference/:kind` - Cached list (`customers`, `projects`, `part_types`)
/// - `DELETE /api/reference/:kind` - Invalidate a cached list
pub fn lifecycle_router() -> Router<LifecycleAppState> {
    Router::new()
        .route(
            "/api/items/:item_type/:id/lifecycle",
            get(get_lifecycle).put(submit_lifecycle),
        )
        .route("/api/items/:item_type/:id/revisions", post(create_revision))
        .route("/api/items/:item_type/:id/archive", post(archive_item))
        .route(
            "/api/reference/:kind",
            get(get_reference_list).delete(invalidate_reference_list),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::adapters::cache::InMemoryCacheStore;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryItemGateway, StaticReferenceData, StaticRulesEvaluator};
    use crate::application::handlers::lifecycle::{RefreshTracker, REFRESH_EVENT_TYPES};
    use crate::application::reference::{ReadThroughCache, ReferenceDataService};
    use crate::domain::foundation::ItemId;
    use crate::domain::item::{ItemType, Revision, RevisionScheme, VersionedItem};
    use crate::domain::lifecycle::ReleaseState;
    use crate::ports::{EventSubscriber, GatewayError, ReferenceEntry, ReferenceKind};

    // ───────────────────────────────────────────────────────────────
    // Fixtures
    // ───────────────────────────────────────────────────────────────

    fn part(id: i64, state: ReleaseState) -> VersionedItem {
        VersionedItem {
            id: ItemId::new(id),
            item_type: ItemType::Part,
            full_number: format!("PRT{}A", 1000 + id),
            display_name: "Bracket".to_string(),
            release_state: state,
            is_approved_for_release: false,
            is_latest_revision: true,
            revision: Revision::new("A"),
            quality_assurance: None,
            project_id: None,
            is_archived: false,
        }
    }

    struct Harness {
        app: Router,
        items: Arc<InMemoryItemGateway>,
        bus: Arc<InMemoryEventBus>,
    }

    fn harness(items: Vec<VersionedItem>) -> Harness {
        let items = Arc::new(InMemoryItemGateway::with_items(items));
        let bus = Arc::new(InMemoryEventBus::new());
        let refresh = Arc::new(RefreshTracker::new());
        bus.subscribe_all(&REFRESH_EVENT_TYPES, refresh.clone());

        let source = StaticReferenceData::new().with_list(
            ReferenceKind::Customers,
            vec![ReferenceEntry {
                id: 1,
                name: "Acme".to_string(),
                extra: Default::default(),
            }],
        );
        let reference_data = Arc::new(ReferenceDataService::new(
            Arc::new(source),
            ReadThroughCache::new(Arc::new(InMemoryCacheStore::new())),
        ));

        let state = LifecycleAppState::new(
            items.clone(),
            Arc::new(StaticRulesEvaluator::failing()),
            bus.clone(),
            reference_data,
            refresh,
            RevisionScheme::Letter,
        );
        Harness {
            app: lifecycle_router().with_state(state),
            items,
            bus,
        }
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("X-User-Id", "user-1")
            .header("content-type", "application/json");
        let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    // ───────────────────────────────────────────────────────────────
    // Lifecycle
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn get_lifecycle_returns_view() {
        let h = harness(vec![part(42, ReleaseState::Review)]);

        let (status, body) = send(&h.app, "GET", "/api/items/parts/42/lifecycle", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["id"], 42);
        assert_eq!(body["steps"].as_array().unwrap().len(), 3);
        assert_eq!(body["mandatory_field"], "display_name");
        assert_eq!(body["was_stale"], false);
    }

    #[tokio::test]
    async fn unknown_item_is_404_and_bad_type_is_400() {
        let h = harness(vec![]);

        let (status, body) = send(&h.app, "GET", "/api/items/parts/9/lifecycle", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ITEM_NOT_FOUND");

        let (status, _) = send(&h.app, "GET", "/api/items/widgets/9/lifecycle", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn submit_then_reload_reports_staleness_once() {
        let h = harness(vec![part(42, ReleaseState::Draft)]);

        let (status, body) = send(
            &h.app,
            "PUT",
            "/api/items/parts/42/lifecycle",
            Some(json!({"release_state": "Review", "display_name": "Bracket"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["refresh_required"], true);
        assert_eq!(h.bus.published_events().len(), 1);

        let (_, body) = send(&h.app, "GET", "/api/items/parts/42/lifecycle", None).await;
        assert_eq!(body["item"]["release_state"], "Review");
        assert_eq!(body["was_stale"], true);

        let (_, body) = send(&h.app, "GET", "/api/items/parts/42/lifecycle", None).await;
        assert_eq!(body["was_stale"], false);
    }

    #[tokio::test]
    async fn release_with_failing_rules_is_gated() {
        let h = harness(vec![part(42, ReleaseState::Review)]);

        let (status, body) = send(
            &h.app,
            "PUT",
            "/api/items/parts/42/lifecycle",
            Some(json!({"release_state": "Released", "display_name": "Bracket"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "RELEASE_GATED");

        let (status, _) = send(
            &h.app,
            "PUT",
            "/api/items/parts/42/lifecycle",
            Some(json!({
                "release_state": "Released",
                "display_name": "Bracket",
                "rules_overridden": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn backend_failure_maps_to_bad_gateway() {
        let h = harness(vec![part(42, ReleaseState::Draft)]);
        h.items.fail_next(GatewayError::Network("connection reset".into()));

        let (status, body) = send(&h.app, "GET", "/api/items/parts/42/lifecycle", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], "Something went wrong. Please try again.");
    }

    // ───────────────────────────────────────────────────────────────
    // Revisions and archive
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_revision_returns_201_with_navigation_target() {
        let h = harness(vec![part(42, ReleaseState::Released)]);

        let (status, body) = send(
            &h.app,
            "POST",
            "/api/items/parts/42/revisions",
            Some(json!({"copy_previous_description": true})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let new_id = body["item"]["id"].as_i64().unwrap();
        assert_eq!(body["navigation_target"], format!("/parts/{}", new_id));
        assert_eq!(body["item"]["revision"], "B");
    }

    #[tokio::test]
    async fn revision_of_old_revision_is_conflict() {
        let mut old = part(42, ReleaseState::Released);
        old.is_latest_revision = false;
        let h = harness(vec![old]);

        let (status, body) = send(
            &h.app,
            "POST",
            "/api/items/parts/42/revisions",
            Some(json!({"copy_previous_description": true})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "REVISION_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn archive_twice_is_conflict() {
        let h = harness(vec![part(42, ReleaseState::Released)]);

        let (status, body) = send(&h.app, "POST", "/api/items/parts/42/archive", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["navigation_target"], "/parts");

        let (status, _) = send(&h.app, "POST", "/api/items/parts/42/archive", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    // ───────────────────────────────────────────────────────────────
    // Reference data
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn reference_list_is_served_and_invalidated() {
        let h = harness(vec![]);

        let (status, body) = send(&h.app, "GET", "/api/reference/customers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "customers");
        assert_eq!(body["entries"][0]["name"], "Acme");

        let (status, _) = send(&h.app, "DELETE", "/api/reference/customers", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&h.app, "GET", "/api/reference/widgets", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
