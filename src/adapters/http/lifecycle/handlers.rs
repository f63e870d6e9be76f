//! HTTP handlers for lifecycle endpoints.
//!
//! These handlers connect Axum routes to the lifecycle command and query handlers.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Json, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::handlers::lifecycle::{
    ArchiveItemCommand, ArchiveItemError, ArchiveItemHandler, CreateRevisionCommand,
    CreateRevisionError, CreateRevisionHandler, GetItemLifecycleHandler, GetItemLifecycleQuery,
    ItemLifecycleView, RefreshTracker, SubmitLifecycleCommand, SubmitLifecycleError,
    SubmitLifecycleHandler,
};
use crate::application::reference::ReferenceDataService;
use crate::domain::foundation::{CommandMetadata, ErrorCode, ItemId, UserId, ValidationError};
use crate::domain::item::{ItemType, RevisionScheme};
use crate::domain::revision::RevisionRequest;
use crate::ports::{
    CacheError, EventPublisher, GatewayError, ItemGateway, ReferenceKind, RulesEvaluator,
};

use super::dto::{ErrorResponse, ReferenceListResponse, SubmitLifecycleRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the lifecycle routes.
#[derive(Clone)]
pub struct LifecycleAppState {
    pub get_lifecycle: Arc<GetItemLifecycleHandler>,
    pub submit_lifecycle: Arc<SubmitLifecycleHandler>,
    pub create_revision: Arc<CreateRevisionHandler>,
    pub archive_item: Arc<ArchiveItemHandler>,
    pub reference_data: Arc<ReferenceDataService>,
    pub refresh: Arc<RefreshTracker>,
}

impl LifecycleAppState {
    /// Wires every lifecycle handler over the same ports.
    pub fn new(
        items: Arc<dyn ItemGateway>,
        rules: Arc<dyn RulesEvaluator>,
        event_publisher: Arc<dyn EventPublisher>,
        reference_data: Arc<ReferenceDataService>,
        refresh: Arc<RefreshTracker>,
        revision_scheme: RevisionScheme,
    ) -> Self {
        Self {
            get_lifecycle: Arc::new(GetItemLifecycleHandler::new(items.clone(), rules.clone())),
            submit_lifecycle: Arc::new(SubmitLifecycleHandler::new(
                items.clone(),
                rules,
                event_publisher.clone(),
            )),
            create_revision: Arc::new(CreateRevisionHandler::new(
                items.clone(),
                event_publisher.clone(),
                revision_scheme,
            )),
            archive_item: Arc::new(ArchiveItemHandler::new(items, event_publisher)),
            reference_data,
            refresh,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Request context
// ════════════════════════════════════════════════════════════════════════════════

const ANONYMOUS: &str = "anonymous";

/// Caller identity and correlation id taken from request headers.
///
/// `X-User-Id` names the acting user; `X-Request-Id`, when present, becomes
/// the correlation id of published events.
#[derive(Debug, Clone)]
pub struct RequestContext(pub CommandMetadata);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let user_id = UserId::new(header("X-User-Id").unwrap_or(ANONYMOUS))?;
        let mut metadata = CommandMetadata::new(user_id);
        if let Some(request_id) = header("X-Request-Id") {
            metadata = metadata.with_correlation_id(request_id);
        }
        Ok(RequestContext(metadata))
    }
}

fn parse_target(item_type: &str, id: &str) -> Result<(ItemType, ItemId), ApiError> {
    let item_type = item_type.parse::<ItemType>()?;
    let item_id = id.parse::<ItemId>().map_err(|_| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            ErrorCode::ValidationFailed,
            format!("'{}' is not a valid item id", id),
        )
    })?;
    Ok((item_type, item_id))
}

// ════════════════════════════════════════════════════════════════════════════════
// Lifecycle endpoints
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct LifecycleResponse {
    #[serde(flatten)]
    pub view: ItemLifecycleView,
    /// The item changed since it was last loaded through this service.
    pub was_stale: bool,
}

/// GET /api/items/:item_type/:id/lifecycle - Load the lifecycle panel of an item
pub async fn get_lifecycle(
    State(state): State<LifecycleAppState>,
    Path((item_type, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let (item_type, item_id) = parse_target(&item_type, &id)?;
    let view = state
        .get_lifecycle
        .handle(GetItemLifecycleQuery { item_type, item_id })
        .await?;

    let was_stale = state
        .refresh
        .acknowledge(&item_type.to_string(), &item_id.to_string());
    Ok(Json(LifecycleResponse { view, was_stale }))
}

/// PUT /api/items/:item_type/:id/lifecycle - Submit the lifecycle edit form
pub async fn submit_lifecycle(
    State(state): State<LifecycleAppState>,
    Path((item_type, id)): Path<(String, String)>,
    RequestContext(metadata): RequestContext,
    Json(req): Json<SubmitLifecycleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (item_type, item_id) = parse_target(&item_type, &id)?;
    let cmd = SubmitLifecycleCommand {
        item_type,
        item_id,
        release_state: req.release_state,
        is_approved_for_release: req.is_approved_for_release,
        display_name: req.display_name,
        rules_overridden: req.rules_overridden,
        extra: req.extra,
    };

    let result = state.submit_lifecycle.handle(cmd, metadata).await?;
    Ok(Json(result))
}

/// POST /api/items/:item_type/:id/revisions - Create the next revision
pub async fn create_revision(
    State(state): State<LifecycleAppState>,
    Path((item_type, id)): Path<(String, String)>,
    RequestContext(metadata): RequestContext,
    Json(request): Json<RevisionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (item_type, item_id) = parse_target(&item_type, &id)?;
    let cmd = CreateRevisionCommand {
        item_type,
        item_id,
        request,
    };

    let result = state.create_revision.handle(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// POST /api/items/:item_type/:id/archive - Archive an item
pub async fn archive_item(
    State(state): State<LifecycleAppState>,
    Path((item_type, id)): Path<(String, String)>,
    RequestContext(metadata): RequestContext,
) -> Result<impl IntoResponse, ApiError> {
    let (item_type, item_id) = parse_target(&item_type, &id)?;
    let result = state
        .archive_item
        .handle(ArchiveItemCommand { item_type, item_id }, metadata)
        .await?;
    Ok(Json(result))
}

// ════════════════════════════════════════════════════════════════════════════════
// Reference data endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/reference/:kind - Cached reference list
pub async fn get_reference_list(
    State(state): State<LifecycleAppState>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = kind.parse::<ReferenceKind>()?;
    let entries = state.reference_data.list(kind).await?;
    Ok(Json(ReferenceListResponse { kind, entries }))
}

/// DELETE /api/reference/:kind - Drop a cached reference list
pub async fn invalidate_reference_list(
    State(state): State<LifecycleAppState>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = kind.parse::<ReferenceKind>()?;
    state.reference_data.invalidate(kind).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code.as_str(), message),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed, err.to_string())
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let (status, code) = match &err {
            GatewayError::Unauthorized => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::ItemNotFound),
            GatewayError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),
            GatewayError::Network(_)
            | GatewayError::UnexpectedStatus { .. }
            | GatewayError::Decode(_) => {
                tracing::error!(error = %err, "Backend request failed");
                (StatusCode::BAD_GATEWAY, ErrorCode::BackendError)
            }
        };
        Self::new(status, code, err.user_message())
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        tracing::error!(error = %err, "Cache operation failed");
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::CacheUnavailable,
            "The reference cache is unavailable.",
        )
    }
}

impl From<SubmitLifecycleError> for ApiError {
    fn from(err: SubmitLifecycleError) -> Self {
        match err {
            SubmitLifecycleError::AlreadySubmitting => {
                Self::new(StatusCode::CONFLICT, ErrorCode::SubmissionInProgress, err.to_string())
            }
            SubmitLifecycleError::Gate(block) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::ReleaseGated,
                block.tooltip(),
            ),
            SubmitLifecycleError::Approval(e) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::ApprovalNotEditable,
                e.message,
            ),
            SubmitLifecycleError::Gateway(e) => e.into(),
        }
    }
}

impl From<CreateRevisionError> for ApiError {
    fn from(err: CreateRevisionError) -> Self {
        match err {
            CreateRevisionError::NotEligible(reason) => {
                Self::new(StatusCode::CONFLICT, ErrorCode::RevisionNotAllowed, reason)
            }
            CreateRevisionError::Validation(e) => e.into(),
            CreateRevisionError::Gateway(e) => e.into(),
        }
    }
}

impl From<ArchiveItemError> for ApiError {
    fn from(err: ArchiveItemError) -> Self {
        match err {
            ArchiveItemError::AlreadyArchived(..) => {
                Self::new(StatusCode::CONFLICT, ErrorCode::AlreadyArchived, err.to_string())
            }
            ArchiveItemError::Gateway(e) => e.into(),
        }
    }
}
