// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Per-resource policies plugged into the generic store

use serde::Serialize;
use serde::de::DeserializeOwned;
use sh_api_contract::ApiContractError;
use std::fmt::Debug;

/// Where a freshly created item lands in the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPolicy {
    /// Newest first; the new item is visible at the top immediately
    Prepend,
    /// Chronological; the new item goes to the end
    Append,
}

/// A server-managed entity type and the rules the store applies to it
pub trait Resource: Send + Sync + 'static {
    type Item: Clone + Debug + PartialEq + DeserializeOwned + Send + Sync + 'static;
    type Counters: Clone + Debug + Default + PartialEq + Send + Sync + 'static;
    type Filter: Serialize + Default + Send + Sync;
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;

    /// Collection path segment, e.g. `announcements`
    const NAME: &'static str;

    const INSERT_POLICY: InsertPolicy;

    /// Server-assigned identity of an item
    fn id(item: &Self::Item) -> &str;

    /// Local checks run before a create request is sent
    fn validate_create(_payload: &Self::Create) -> Result<(), ApiContractError> {
        Ok(())
    }

    /// Adjust derived counters for an observed `previous -> next` replacement
    ///
    /// Called once per applied update for which the previous version of the
    /// item was held. Counters are never recomputed from the collection.
    fn on_update(_previous: &Self::Item, _next: &Self::Item, _counters: &mut Self::Counters) {}
}

/// A resource with a dedicated counter endpoint answering `{ count: n }`
pub trait CountedResource: Resource {
    /// Counter path, e.g. `messages/unread/count`
    const COUNTER_PATH: &'static str;

    fn counters_from_count(count: u64) -> Self::Counters;
}
