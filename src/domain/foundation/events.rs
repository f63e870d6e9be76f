//! Refresh signals published after the backend accepts a change.
//!
//! Handlers never patch a caller's copy of an item; whoever displays the
//! item re-fetches it when one of these events arrives.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Something that happened to one item.
pub trait DomainEvent: Send + Sync {
    /// Routing key, e.g. `item.revision_created`.
    fn event_type(&self) -> &'static str;

    /// Backend id of the item, as text.
    fn aggregate_id(&self) -> String;

    /// Item type label, e.g. `Part` or `PCBA`.
    fn aggregate_type(&self) -> &'static str;

    fn occurred_at(&self) -> Timestamp;

    fn event_id(&self) -> EventId;
}

/// Blanket `to_envelope()` for every serializable event.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope::from_event(self)
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements `DomainEvent` from named fields.
///
/// The aggregate type comes from an `ItemType` field, so one event struct
/// serves all four item types.
///
/// ```ignore
/// domain_event!(
///     ItemArchived,
///     event_type = "item.archived",
///     aggregate_id = item_id,
///     aggregate_type = item_type,
///     occurred_at = archived_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        aggregate_id = $agg_id_field:ident,
        aggregate_type = $agg_type_field:ident,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                self.$agg_type_field.capabilities().label()
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field.clone()
            }
        }
    };
}

pub use crate::domain_event;

/// Identity of one published event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request context copied from `CommandMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// What actually travels over the bus: routing fields plus the event as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// A payload that fails to serialize is sent as `null`; routing still works.
    pub fn from_event<T>(event: &T) -> Self
    where
        T: DomainEvent + Serialize + ?Sized,
    {
        let event_type = event.event_type().to_string();
        let payload = serde_json::to_value(event).unwrap_or_else(|e| {
            tracing::warn!(event_type = %event_type, error = %e, "Event payload serialization failed");
            JsonValue::Null
        });

        Self {
            event_id: event.event_id(),
            event_type,
            aggregate_id: event.aggregate_id(),
            aggregate_type: event.aggregate_type().to_string(),
            occurred_at: event.occurred_at(),
            payload,
            metadata: EventMetadata::default(),
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(id.into());
        self
    }

    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.user_id = Some(id.into());
        self
    }

    /// Decodes the payload back into a concrete event.
    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ItemId;
    use crate::domain::item::ItemType;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestEvent {
        event_id: EventId,
        item_id: ItemId,
        item_type: ItemType,
        happened_at: Timestamp,
    }

    domain_event!(
        TestEvent,
        event_type = "item.tested",
        aggregate_id = item_id,
        aggregate_type = item_type,
        occurred_at = happened_at,
        event_id = event_id
    );

    fn test_event() -> TestEvent {
        TestEvent {
            event_id: EventId::from_string("evt-1"),
            item_id: ItemId::new(42),
            item_type: ItemType::Pcba,
            happened_at: Timestamp::now(),
        }
    }

    #[test]
    fn event_ids_are_unique_strings() {
        assert_ne!(EventId::new(), EventId::new());
        let id = EventId::from_string("evt-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""evt-7""#);
    }

    #[test]
    fn to_envelope_copies_routing_fields() {
        let event = test_event();
        let envelope = event.to_envelope();

        assert_eq!(envelope.event_id.as_str(), "evt-1");
        assert_eq!(envelope.event_type, "item.tested");
        assert_eq!(envelope.aggregate_id, "42");
        assert_eq!(envelope.aggregate_type, "PCBA");
        assert_eq!(envelope.occurred_at, event.happened_at);
    }

    #[test]
    fn payload_round_trips() {
        let event = test_event();
        let envelope = event.to_envelope();
        let decoded: TestEvent = envelope.payload_as().unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn builder_sets_metadata() {
        let envelope = test_event()
            .to_envelope()
            .with_correlation_id("req-1")
            .with_user_id("user-9");
        assert_eq!(envelope.metadata.correlation_id.as_deref(), Some("req-1"));
        assert_eq!(envelope.metadata.user_id.as_deref(), Some("user-9"));
    }

    #[test]
    fn metadata_skips_none_fields() {
        let json = serde_json::to_string(&EventMetadata::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
