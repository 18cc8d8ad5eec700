// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Async intents on top of the reducer
//!
//! Every intent follows the same shape: issue a token and apply the pending
//! action under one write lock, await the transport with no lock held, then
//! apply the fulfilled or rejected action. The reducer drops the outcome if a
//! newer request of the same class was issued in the meantime.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use sh_api_contract::DeletedRecord;
use sh_client_api::{
    ApiRequest, ClientApi, ClientApiError, ClientApiResult, decode_count, decode_data,
};
use tracing::{debug, warn};

use crate::action::{Reduction, StoreAction, reduce};
use crate::request_state::{OperationClass, RequestState, RequestToken};
use crate::resource::{CountedResource, Resource};

/// What happened to one intent, from the caller's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    Succeeded,
    /// The error is in the state's `last_error`
    Failed,
    /// A newer request of the same class owns the state; this one changed nothing
    Superseded,
}

impl OperationOutcome {
    pub fn is_success(self) -> bool {
        self == OperationOutcome::Succeeded
    }
}

/// State holder for one resource
pub struct ResourceStore<R: Resource> {
    api: Arc<dyn ClientApi>,
    state: RwLock<RequestState<R::Item, R::Counters>>,
}

impl<R: Resource> std::fmt::Debug for ResourceStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("resource", &R::NAME)
            .field("state", &*self.read_guard())
            .finish()
    }
}

impl<R: Resource> ResourceStore<R> {
    /// Empty collection, every class idle
    pub fn new(api: Arc<dyn ClientApi>) -> Self {
        Self {
            api,
            state: RwLock::new(RequestState::new()),
        }
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> RequestState<R::Item, R::Counters> {
        self.read_guard().clone()
    }

    /// Borrow the state for the duration of `f`
    pub fn read<T>(&self, f: impl FnOnce(&RequestState<R::Item, R::Counters>) -> T) -> T {
        f(&self.read_guard())
    }

    /// Apply one action directly
    pub fn dispatch(&self, action: StoreAction<R>) -> Reduction {
        reduce::<R>(&mut self.write_guard(), action)
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, RequestState<R::Item, R::Counters>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, RequestState<R::Item, R::Counters>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the collection with the server's list for `filter`
    pub async fn fetch_list(&self, filter: &R::Filter) -> OperationOutcome {
        let request = ApiRequest::get(R::NAME).with_query(filter);
        self.run(OperationClass::ListFetch, request, |body| {
            let items: Vec<R::Item> = decode_data(body)?;
            Ok(StoreActionBuilder::List(items))
        })
        .await
    }

    /// Fetch one item into `selected`
    pub async fn fetch_item(&self, id: &str) -> OperationOutcome {
        let request = Ok(ApiRequest::get(item_path::<R>(id)));
        self.run(OperationClass::ItemFetch, request, |body| {
            Ok(StoreActionBuilder::Item(decode_data(body)?))
        })
        .await
    }

    /// Create an item; payloads failing local validation never reach the transport
    pub async fn create(&self, payload: &R::Create) -> OperationOutcome {
        let request = R::validate_create(payload)
            .map_err(ClientApiError::from)
            .and_then(|()| ApiRequest::post(R::NAME).with_body(payload));
        self.run(OperationClass::Create, request, |body| {
            Ok(StoreActionBuilder::Item(decode_data(body)?))
        })
        .await
    }

    pub async fn update(&self, id: &str, patch: &R::Update) -> OperationOutcome {
        let request = ApiRequest::patch(item_path::<R>(id)).with_body(patch);
        self.run(OperationClass::Update, request, |body| {
            Ok(StoreActionBuilder::Item(decode_data(body)?))
        })
        .await
    }

    /// Delete an item; the server must echo the id it removed
    pub async fn delete(&self, id: &str) -> OperationOutcome {
        let request = Ok(ApiRequest::delete(item_path::<R>(id)));
        let expected = id.to_string();
        self.run(OperationClass::Delete, request, move |body| {
            let record: DeletedRecord = decode_data(body)?;
            if record.id != expected {
                return Err(ClientApiError::MalformedResponse(format!(
                    "delete of {expected} confirmed id {}",
                    record.id
                )));
            }
            Ok(StoreActionBuilder::Deleted(record.id))
        })
        .await
    }

    async fn run<F>(
        &self,
        class: OperationClass,
        request: ClientApiResult<ApiRequest>,
        decode: F,
    ) -> OperationOutcome
    where
        F: FnOnce(Value) -> ClientApiResult<StoreActionBuilder<R>>,
    {
        let Some(token) = self.begin(class) else {
            return OperationOutcome::Superseded;
        };

        let result = match request {
            Ok(request) => self.api.execute(request).await.and_then(decode),
            Err(err) => Err(err),
        };

        let action = match result {
            Ok(builder) => builder.fulfilled(token),
            Err(err) => rejected(token, err.to_string()),
        };
        self.finish(action, token)
    }

    fn begin(&self, class: OperationClass) -> Option<RequestToken> {
        let mut state = self.write_guard();
        let token = state.next_token(class);
        match reduce::<R>(&mut state, pending(token)) {
            Reduction::Applied => {
                debug!(resource = R::NAME, class = %class, generation = token.generation, "request started");
                Some(token)
            }
            Reduction::Superseded => None,
        }
    }

    fn finish(&self, action: StoreAction<R>, token: RequestToken) -> OperationOutcome {
        let failure = match &action {
            StoreAction::ListRejected { error, .. }
            | StoreAction::ItemRejected { error, .. }
            | StoreAction::CreateRejected { error, .. }
            | StoreAction::UpdateRejected { error, .. }
            | StoreAction::DeleteRejected { error, .. }
            | StoreAction::CounterRejected { error, .. } => Some(error.clone()),
            _ => None,
        };

        match (self.dispatch(action), failure) {
            (Reduction::Superseded, _) => {
                debug!(
                    resource = R::NAME,
                    class = %token.class,
                    generation = token.generation,
                    "discarding superseded response"
                );
                OperationOutcome::Superseded
            }
            (Reduction::Applied, Some(error)) => {
                warn!(
                    resource = R::NAME,
                    class = %token.class,
                    generation = token.generation,
                    %error,
                    "operation failed"
                );
                OperationOutcome::Failed
            }
            (Reduction::Applied, None) => {
                debug!(
                    resource = R::NAME,
                    class = %token.class,
                    generation = token.generation,
                    status = "succeeded",
                    "response applied"
                );
                OperationOutcome::Succeeded
            }
        }
    }
}

impl<R: CountedResource> ResourceStore<R> {
    /// Replace the derived counters with the server's count
    pub async fn refresh_counters(&self) -> OperationOutcome {
        let request = Ok(ApiRequest::get(R::COUNTER_PATH));
        self.run(OperationClass::Counter, request, |body| {
            Ok(StoreActionBuilder::Counters(R::counters_from_count(decode_count(body)?)))
        })
        .await
    }
}

fn item_path<R: Resource>(id: &str) -> String {
    sh_client_api::item_path(R::NAME, id)
}

/// Decoded payload waiting for its token
enum StoreActionBuilder<R: Resource> {
    List(Vec<R::Item>),
    Item(R::Item),
    Deleted(String),
    Counters(R::Counters),
}

impl<R: Resource> StoreActionBuilder<R> {
    fn fulfilled(self, token: RequestToken) -> StoreAction<R> {
        use OperationClass::*;
        match (token.class, self) {
            (ListFetch, StoreActionBuilder::List(items)) => StoreAction::ListFulfilled { token, items },
            (ItemFetch, StoreActionBuilder::Item(item)) => StoreAction::ItemFulfilled { token, item },
            (Create, StoreActionBuilder::Item(item)) => StoreAction::CreateFulfilled { token, item },
            (Update, StoreActionBuilder::Item(item)) => StoreAction::UpdateFulfilled { token, item },
            (Delete, StoreActionBuilder::Deleted(id)) => StoreAction::DeleteFulfilled { token, id },
            (Counter, StoreActionBuilder::Counters(counters)) => {
                StoreAction::CounterFulfilled { token, counters }
            }
            (class, _) => rejected(token, format!("Malformed response: unexpected payload for {class}")),
        }
    }
}

fn pending<R: Resource>(token: RequestToken) -> StoreAction<R> {
    match token.class {
        OperationClass::ListFetch => StoreAction::ListPending(token),
        OperationClass::ItemFetch => StoreAction::ItemPending(token),
        OperationClass::Create => StoreAction::CreatePending(token),
        OperationClass::Update => StoreAction::UpdatePending(token),
        OperationClass::Delete => StoreAction::DeletePending(token),
        OperationClass::Counter => StoreAction::CounterPending(token),
    }
}

fn rejected<R: Resource>(token: RequestToken, error: String) -> StoreAction<R> {
    match token.class {
        OperationClass::ListFetch => StoreAction::ListRejected { token, error },
        OperationClass::ItemFetch => StoreAction::ItemRejected { token, error },
        OperationClass::Create => StoreAction::CreateRejected { token, error },
        OperationClass::Update => StoreAction::UpdateRejected { token, error },
        OperationClass::Delete => StoreAction::DeleteRejected { token, error },
        OperationClass::Counter => StoreAction::CounterRejected { token, error },
    }
}
