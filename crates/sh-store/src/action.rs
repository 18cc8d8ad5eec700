// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Tagged store actions and the reducer that applies them
//!
//! There is one variant per (operation, lifecycle phase) pair. The reducer
//! matches them exhaustively; network I/O never happens here.

use crate::request_state::{OperationClass, RequestState, RequestStatus, RequestToken};
use crate::resource::{InsertPolicy, Resource};

#[derive(Debug, Clone)]
pub enum StoreAction<R: Resource> {
    ListPending(RequestToken),
    ListFulfilled { token: RequestToken, items: Vec<R::Item> },
    ListRejected { token: RequestToken, error: String },

    ItemPending(RequestToken),
    ItemFulfilled { token: RequestToken, item: R::Item },
    ItemRejected { token: RequestToken, error: String },

    CreatePending(RequestToken),
    CreateFulfilled { token: RequestToken, item: R::Item },
    CreateRejected { token: RequestToken, error: String },

    UpdatePending(RequestToken),
    UpdateFulfilled { token: RequestToken, item: R::Item },
    UpdateRejected { token: RequestToken, error: String },

    DeletePending(RequestToken),
    DeleteFulfilled { token: RequestToken, id: String },
    DeleteRejected { token: RequestToken, error: String },

    CounterPending(RequestToken),
    CounterFulfilled { token: RequestToken, counters: R::Counters },
    CounterRejected { token: RequestToken, error: String },
}

/// Whether an action changed the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Applied,
    /// A newer request of the same class exists; the action was discarded
    Superseded,
}

type StateOf<R> = RequestState<<R as Resource>::Item, <R as Resource>::Counters>;

/// Apply one action to the state of resource `R`
pub fn reduce<R: Resource>(state: &mut StateOf<R>, action: StoreAction<R>) -> Reduction {
    use OperationClass::*;
    use StoreAction::*;

    match action {
        ListPending(token) => begin(state, ListFetch, token),
        ListFulfilled { token, items } => succeed(state, ListFetch, token, |state| {
            state.collection = items;
        }),
        ListRejected { token, error } => fail(state, ListFetch, token, error),

        ItemPending(token) => begin(state, ItemFetch, token),
        ItemFulfilled { token, item } => succeed(state, ItemFetch, token, |state| {
            if let Some(slot) = find_mut::<R>(&mut state.collection, R::id(&item)) {
                *slot = item.clone();
            }
            state.selected = Some(item);
        }),
        ItemRejected { token, error } => fail(state, ItemFetch, token, error),

        CreatePending(token) => begin(state, Create, token),
        CreateFulfilled { token, item } => succeed(state, Create, token, |state| {
            match R::INSERT_POLICY {
                InsertPolicy::Prepend => state.collection.insert(0, item),
                InsertPolicy::Append => state.collection.push(item),
            }
        }),
        CreateRejected { token, error } => fail(state, Create, token, error),

        UpdatePending(token) => begin(state, Update, token),
        UpdateFulfilled { token, item } => succeed(state, Update, token, |state| {
            apply_update::<R>(state, item);
        }),
        UpdateRejected { token, error } => fail(state, Update, token, error),

        DeletePending(token) => begin(state, Delete, token),
        DeleteFulfilled { token, id } => succeed(state, Delete, token, |state| {
            state.collection.retain(|item| R::id(item) != id);
            if state.selected.as_ref().is_some_and(|item| R::id(item) == id) {
                state.selected = None;
            }
        }),
        DeleteRejected { token, error } => fail(state, Delete, token, error),

        CounterPending(token) => begin(state, Counter, token),
        CounterFulfilled { token, counters } => succeed(state, Counter, token, |state| {
            state.counters = counters;
        }),
        CounterRejected { token, error } => fail(state, Counter, token, error),
    }
}

fn find_mut<'a, R: Resource>(items: &'a mut [R::Item], id: &str) -> Option<&'a mut R::Item> {
    items.iter_mut().find(|item| R::id(item) == id)
}

fn apply_update<R: Resource>(state: &mut StateOf<R>, item: R::Item) {
    let id = R::id(&item).to_string();

    // The transition is observed once, against the held copy: collection
    // first, selection as a fallback.
    let previous = state
        .collection
        .iter()
        .find(|held| R::id(held) == id)
        .or_else(|| state.selected.as_ref().filter(|held| R::id(held) == id));
    if let Some(previous) = previous {
        R::on_update(previous, &item, &mut state.counters);
    }

    if let Some(slot) = find_mut::<R>(&mut state.collection, &id) {
        *slot = item.clone();
    }
    if let Some(selected) = state.selected.as_mut().filter(|held| R::id(held) == id) {
        *selected = item;
    }
}

fn begin<T, C>(state: &mut RequestState<T, C>, class: OperationClass, token: RequestToken) -> Reduction {
    if token.class != class {
        return Reduction::Superseded;
    }
    let op = state.operation_mut(class);
    if token.generation <= op.generation {
        return Reduction::Superseded;
    }
    op.generation = token.generation;
    op.status = RequestStatus::Loading;
    op.error = None;
    state.last_error = None;
    Reduction::Applied
}

fn is_current<T, C>(state: &RequestState<T, C>, class: OperationClass, token: RequestToken) -> bool {
    let op = state.operation(class);
    token.class == class && token.generation == op.generation && op.status == RequestStatus::Loading
}

fn succeed<T, C>(
    state: &mut RequestState<T, C>,
    class: OperationClass,
    token: RequestToken,
    merge: impl FnOnce(&mut RequestState<T, C>),
) -> Reduction {
    if !is_current(state, class, token) {
        return Reduction::Superseded;
    }
    merge(state);
    state.operation_mut(class).status = RequestStatus::Succeeded;
    Reduction::Applied
}

fn fail<T, C>(
    state: &mut RequestState<T, C>,
    class: OperationClass,
    token: RequestToken,
    error: String,
) -> Reduction {
    if !is_current(state, class, token) {
        return Reduction::Superseded;
    }
    let op = state.operation_mut(class);
    op.status = RequestStatus::Failed;
    op.error = Some(error.clone());
    state.last_error = Some(error);
    Reduction::Applied
}
