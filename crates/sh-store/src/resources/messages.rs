// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde::Serialize;
use sh_api_contract::{
    ApiContractError, Message, MessageFilter, MessagePatch, MessageStatus, NewMessage,
    validate_new_message,
};

use crate::resource::{CountedResource, InsertPolicy, Resource};
use crate::store::{OperationOutcome, ResourceStore};

/// Direct messages, oldest first
#[derive(Debug, Clone, Copy)]
pub struct Messages;

/// Denormalized message counters
///
/// `unread_count` is maintained from observed transitions and from the
/// counter endpoint. It is never derived by scanning the collection, which
/// may hold only one folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MessageCounters {
    pub unread_count: u64,
}

impl Resource for Messages {
    type Item = Message;
    type Counters = MessageCounters;
    type Filter = MessageFilter;
    type Create = NewMessage;
    type Update = MessagePatch;

    const NAME: &'static str = "messages";
    const INSERT_POLICY: InsertPolicy = InsertPolicy::Append;

    fn id(item: &Message) -> &str {
        &item.id
    }

    fn validate_create(payload: &NewMessage) -> Result<(), ApiContractError> {
        validate_new_message(payload)
    }

    fn on_update(previous: &Message, next: &Message, counters: &mut MessageCounters) {
        if previous.status == MessageStatus::Sent && next.status == MessageStatus::Read {
            counters.unread_count = counters.unread_count.saturating_sub(1);
        }
    }
}

impl CountedResource for Messages {
    const COUNTER_PATH: &'static str = "messages/unread/count";

    fn counters_from_count(count: u64) -> MessageCounters {
        MessageCounters {
            unread_count: count,
        }
    }
}

impl ResourceStore<Messages> {
    /// Mark one message as read
    pub async fn mark_read(&self, id: &str) -> OperationOutcome {
        let patch = MessagePatch {
            status: Some(MessageStatus::Read),
        };
        self.update(id, &patch).await
    }

    pub fn unread_count(&self) -> u64 {
        self.read(|state| state.counters().unread_count)
    }
}
