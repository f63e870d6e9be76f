//! End-to-end lifecycle flows over the in-memory adapters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use dokuly_lifecycle::adapters::cache::InMemoryCacheStore;
use dokuly_lifecycle::adapters::events::InMemoryEventBus;
use dokuly_lifecycle::adapters::memory::{InMemoryItemGateway, StaticRulesEvaluator};
use dokuly_lifecycle::application::handlers::lifecycle::{
    ArchiveItemCommand, ArchiveItemError, ArchiveItemHandler, CreateRevisionCommand,
    CreateRevisionError, CreateRevisionHandler, GetItemLifecycleHandler, GetItemLifecycleQuery,
    RefreshTracker, SubmitLifecycleCommand, SubmitLifecycleError, SubmitLifecycleHandler,
    REFRESH_EVENT_TYPES,
};
use dokuly_lifecycle::application::reference::{ReadThroughCache, ReferenceDataService};
use dokuly_lifecycle::domain::foundation::{CommandMetadata, ItemId, UserId};
use dokuly_lifecycle::domain::item::{ItemType, Revision, RevisionScheme, VersionedItem};
use dokuly_lifecycle::domain::lifecycle::ReleaseState;
use dokuly_lifecycle::domain::revision::{RevisionPayload, RevisionRequest};
use dokuly_lifecycle::ports::{
    CacheStore, EventSubscriber, GatewayError, ItemGateway, ItemUpdate, ReferenceDataSource,
    ReferenceEntry, ReferenceKind,
};

// ─────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────

fn metadata() -> CommandMetadata {
    CommandMetadata::new(UserId::new("engineer-1").unwrap()).with_correlation_id("flow-test")
}

fn item(id: i64, item_type: ItemType, state: ReleaseState, latest: bool) -> VersionedItem {
    VersionedItem {
        id: ItemId::new(id),
        item_type,
        full_number: format!("PRT{}A", 1000 + id),
        display_name: "Bracket".to_string(),
        release_state: state,
        is_approved_for_release: false,
        is_latest_revision: latest,
        revision: Revision::new("A"),
        quality_assurance: None,
        project_id: None,
        is_archived: false,
    }
}

fn submit(id: i64, state: ReleaseState) -> SubmitLifecycleCommand {
    SubmitLifecycleCommand {
        item_type: ItemType::Part,
        item_id: ItemId::new(id),
        release_state: state,
        is_approved_for_release: false,
        display_name: "Bracket".to_string(),
        rules_overridden: false,
        extra: Default::default(),
    }
}

fn copy_description() -> RevisionRequest {
    RevisionRequest {
        copy_previous_description: true,
        ..Default::default()
    }
}

/// Delegates to the in-memory gateway but can fail or stall `update_item`.
struct ControlledGateway {
    inner: InMemoryItemGateway,
    fail_updates: bool,
    entered: Notify,
    release: Notify,
    stall_updates: bool,
}

impl ControlledGateway {
    fn new(items: Vec<VersionedItem>) -> Self {
        Self {
            inner: InMemoryItemGateway::with_items(items),
            fail_updates: false,
            entered: Notify::new(),
            release: Notify::new(),
            stall_updates: false,
        }
    }
}

#[async_trait]
impl ItemGateway for ControlledGateway {
    async fn load_item(&self, item_type: ItemType, id: ItemId) -> Result<VersionedItem, GatewayError> {
        self.inner.load_item(item_type, id).await
    }

    async fn update_item(
        &self,
        item_type: ItemType,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<(), GatewayError> {
        if self.stall_updates {
            self.entered.notify_one();
            self.release.notified().await;
        }
        if self.fail_updates {
            return Err(GatewayError::Conflict("modified concurrently".into()));
        }
        self.inner.update_item(item_type, id, update).await
    }

    async fn create_revision(
        &self,
        item_type: ItemType,
        id: ItemId,
        payload: RevisionPayload,
    ) -> Result<VersionedItem, GatewayError> {
        self.inner.create_revision(item_type, id, payload).await
    }

    async fn archive_item(&self, item_type: ItemType, id: ItemId) -> Result<(), GatewayError> {
        self.inner.archive_item(item_type, id).await
    }
}

// ─────────────────────────────────────────────────────────────────────
// Revisions
// ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn revision_eligibility_follows_latest_flag_then_state() {
    let items = Arc::new(InMemoryItemGateway::with_items(vec![
        item(1, ItemType::Part, ReleaseState::Released, false),
        item(2, ItemType::Part, ReleaseState::Draft, true),
    ]));
    let handler = CreateRevisionHandler::new(
        items.clone(),
        Arc::new(InMemoryEventBus::new()),
        RevisionScheme::Letter,
    );

    let older = handler
        .handle(
            CreateRevisionCommand {
                item_type: ItemType::Part,
                item_id: ItemId::new(1),
                request: copy_description(),
            },
            metadata(),
        )
        .await;
    match older {
        Err(CreateRevisionError::NotEligible(reason)) => {
            assert_eq!(reason, "Cannot create a new revision, a newer revision already exists.")
        }
        other => panic!("expected NotEligible, got {:?}", other),
    }

    let draft = handler
        .handle(
            CreateRevisionCommand {
                item_type: ItemType::Part,
                item_id: ItemId::new(2),
                request: copy_description(),
            },
            metadata(),
        )
        .await;
    match draft {
        Err(CreateRevisionError::NotEligible(reason)) => {
            assert!(reason.contains("is not released yet! Current state: Draft."), "{reason}")
        }
        other => panic!("expected NotEligible, got {:?}", other),
    }
}

#[tokio::test]
async fn new_revision_is_draft_and_navigates_to_its_id() {
    let items = Arc::new(InMemoryItemGateway::with_items(vec![item(
        41,
        ItemType::Part,
        ReleaseState::Released,
        true,
    )]));
    let bus = Arc::new(InMemoryEventBus::new());
    let handler = CreateRevisionHandler::new(items.clone(), bus.clone(), RevisionScheme::Letter);

    let result = handler
        .handle(
            CreateRevisionCommand {
                item_type: ItemType::Part,
                item_id: ItemId::new(41),
                request: copy_description(),
            },
            metadata(),
        )
        .await
        .unwrap();

    assert_eq!(result.item.id, ItemId::new(42));
    assert_eq!(result.item.release_state, ReleaseState::Draft);
    assert!(result.item.is_latest_revision);
    assert_eq!(result.navigation_target, "/parts/42");

    let previous = items.get(ItemType::Part, ItemId::new(41)).unwrap();
    assert!(!previous.is_latest_revision);
    assert!(bus.has_event("item.revision_created"));
}

#[tokio::test]
async fn assembly_revision_may_copy_its_bom() {
    let items = Arc::new(InMemoryItemGateway::with_items(vec![item(
        60,
        ItemType::Assembly,
        ReleaseState::Released,
        true,
    )]));
    let handler = CreateRevisionHandler::new(
        items.clone(),
        Arc::new(InMemoryEventBus::new()),
        RevisionScheme::Letter,
    );

    let result = handler
        .handle(
            CreateRevisionCommand {
                item_type: ItemType::Assembly,
                item_id: ItemId::new(60),
                request: RevisionRequest {
                    copy_bom: true,
                    ..copy_description()
                },
            },
            metadata(),
        )
        .await
        .unwrap();

    assert_eq!(result.item.release_state, ReleaseState::Draft);
    assert_eq!(result.navigation_target, "/assemblies/61");
}

// ─────────────────────────────────────────────────────────────────────
// Submissions
// ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_update_leaves_state_unchanged() {
    let mut gateway = ControlledGateway::new(vec![item(7, ItemType::Part, ReleaseState::Draft, true)]);
    gateway.fail_updates = true;
    let gateway = Arc::new(gateway);
    let rules = Arc::new(StaticRulesEvaluator::passing());
    let bus = Arc::new(InMemoryEventBus::new());

    let submit_handler = SubmitLifecycleHandler::new(gateway.clone(), rules.clone(), bus.clone());
    let err = submit_handler
        .handle(submit(7, ReleaseState::Review), metadata())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitLifecycleError::Gateway(GatewayError::Conflict(_))));

    let view = GetItemLifecycleHandler::new(gateway, rules)
        .handle(GetItemLifecycleQuery {
            item_type: ItemType::Part,
            item_id: ItemId::new(7),
        })
        .await
        .unwrap();
    assert_eq!(view.item.release_state, ReleaseState::Draft);
    assert_eq!(bus.event_count(), 0);
}

#[tokio::test]
async fn concurrent_submit_for_same_item_is_rejected() {
    let mut gateway = ControlledGateway::new(vec![item(7, ItemType::Part, ReleaseState::Draft, true)]);
    gateway.stall_updates = true;
    let gateway = Arc::new(gateway);
    let handler = Arc::new(SubmitLifecycleHandler::new(
        gateway.clone(),
        Arc::new(StaticRulesEvaluator::passing()),
        Arc::new(InMemoryEventBus::new()),
    ));

    let first = tokio::spawn({
        let handler = handler.clone();
        async move { handler.handle(submit(7, ReleaseState::Review), metadata()).await }
    });
    gateway.entered.notified().await;

    let second = handler.handle(submit(7, ReleaseState::Released), metadata()).await;
    assert!(matches!(second, Err(SubmitLifecycleError::AlreadySubmitting)));

    gateway.release.notify_one();
    let first = first.await.unwrap().unwrap();
    assert_eq!(first.release_state, ReleaseState::Review);

    // Claim is released once the first call returns
    gateway.release.notify_one();
    assert!(handler
        .handle(submit(7, ReleaseState::Draft), metadata())
        .await
        .is_ok());
}

#[tokio::test]
async fn successful_submit_marks_item_stale_for_refresh() {
    let items = Arc::new(InMemoryItemGateway::with_items(vec![item(
        7,
        ItemType::Part,
        ReleaseState::Review,
        true,
    )]));
    let bus = Arc::new(InMemoryEventBus::new());
    let tracker = Arc::new(RefreshTracker::new());
    bus.subscribe_all(&REFRESH_EVENT_TYPES, tracker.clone());

    let handler = SubmitLifecycleHandler::new(
        items.clone(),
        Arc::new(StaticRulesEvaluator::passing()),
        bus.clone(),
    );
    let result = handler
        .handle(submit(7, ReleaseState::Released), metadata())
        .await
        .unwrap();

    assert!(result.refresh_required);
    assert!(tracker.is_stale("Part", "7"));
    let stored = items.get(ItemType::Part, ItemId::new(7)).unwrap();
    assert_eq!(stored.release_state, ReleaseState::Released);
}

// ─────────────────────────────────────────────────────────────────────
// Archive
// ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn archive_navigates_to_list_and_refuses_repeat() {
    let items = Arc::new(InMemoryItemGateway::with_items(vec![item(
        9,
        ItemType::Assembly,
        ReleaseState::Released,
        true,
    )]));
    let handler = ArchiveItemHandler::new(items.clone(), Arc::new(InMemoryEventBus::new()));
    let cmd = ArchiveItemCommand {
        item_type: ItemType::Assembly,
        item_id: ItemId::new(9),
    };

    let result = handler.handle(cmd, metadata()).await.unwrap();
    assert_eq!(result.navigation_target, "/assemblies");
    assert!(items.get(ItemType::Assembly, ItemId::new(9)).unwrap().is_archived);

    let again = handler.handle(cmd, metadata()).await;
    assert!(matches!(again, Err(ArchiveItemError::AlreadyArchived(..))));
}

// ─────────────────────────────────────────────────────────────────────
// Reference data
// ─────────────────────────────────────────────────────────────────────

struct CountingSource {
    fetches: AtomicUsize,
}

#[async_trait]
impl ReferenceDataSource for CountingSource {
    async fn fetch(&self, _kind: ReferenceKind) -> Result<Vec<ReferenceEntry>, GatewayError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![ReferenceEntry {
            id: 3,
            name: "Orbital".to_string(),
            extra: Default::default(),
        }])
    }
}

#[tokio::test]
async fn corrupt_cache_entry_is_refetched_once() {
    let store = Arc::new(InMemoryCacheStore::new());
    store
        .set("reference:projects", "{not json".to_string())
        .await
        .unwrap();
    let source = Arc::new(CountingSource {
        fetches: AtomicUsize::new(0),
    });
    let service = ReferenceDataService::new(source.clone(), ReadThroughCache::new(store.clone()));

    let first = service.list(ReferenceKind::Projects).await.unwrap();
    let second = service.list(ReferenceKind::Projects).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].name, "Orbital");
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    let cached = store.get("reference:projects").await.unwrap().unwrap();
    assert!(cached.contains("Orbital"));
}
