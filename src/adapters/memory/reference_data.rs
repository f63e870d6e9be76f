//! Fixed reference lists.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::ports::{GatewayError, ReferenceDataSource, ReferenceEntry, ReferenceKind};

/// Serves reference lists from memory.
#[derive(Debug, Default)]
pub struct StaticReferenceData {
    lists: HashMap<ReferenceKind, Vec<ReferenceEntry>>,
}

impl StaticReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, kind: ReferenceKind, entries: Vec<ReferenceEntry>) -> Self {
        self.lists.insert(kind, entries);
        self
    }
}

#[async_trait]
impl ReferenceDataSource for StaticReferenceData {
    async fn fetch(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>, GatewayError> {
        Ok(self.lists.get(&kind).cloned().unwrap_or_default())
    }
}
