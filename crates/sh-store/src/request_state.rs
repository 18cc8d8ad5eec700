// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Held state of one remote resource
//!
//! A [`RequestState`] starts empty with every operation class idle. It is only
//! mutated by [`reduce`](crate::action::reduce); everything here is read
//! access plus token issuance.

use serde::Serialize;

/// Operation classes tracked independently per resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationClass {
    ListFetch,
    ItemFetch,
    Create,
    Update,
    Delete,
    /// Resource-specific counter endpoint (e.g. unread messages)
    Counter,
}

impl OperationClass {
    pub const ALL: [OperationClass; 6] = [
        OperationClass::ListFetch,
        OperationClass::ItemFetch,
        OperationClass::Create,
        OperationClass::Update,
        OperationClass::Delete,
        OperationClass::Counter,
    ];

    fn index(self) -> usize {
        match self {
            OperationClass::ListFetch => 0,
            OperationClass::ItemFetch => 1,
            OperationClass::Create => 2,
            OperationClass::Update => 3,
            OperationClass::Delete => 4,
            OperationClass::Counter => 5,
        }
    }
}

impl std::fmt::Display for OperationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationClass::ListFetch => write!(f, "list-fetch"),
            OperationClass::ItemFetch => write!(f, "item-fetch"),
            OperationClass::Create => write!(f, "create"),
            OperationClass::Update => write!(f, "update"),
            OperationClass::Delete => write!(f, "delete"),
            OperationClass::Counter => write!(f, "counter"),
        }
    }
}

/// Request lifecycle of one operation class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Identifies one issued request of a class
///
/// Generations increase by one per issued request. Only the outcome carrying
/// the latest generation of its class may touch the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestToken {
    pub class: OperationClass,
    pub generation: u64,
}

/// Status, latest generation and error of one operation class
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OperationState {
    pub status: RequestStatus,
    pub generation: u64,
    /// Set exactly when `status` is `Failed`
    pub error: Option<String>,
}

/// Last known state of a resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestState<T, C = ()> {
    pub(crate) collection: Vec<T>,
    pub(crate) selected: Option<T>,
    pub(crate) counters: C,
    pub(crate) last_error: Option<String>,
    pub(crate) operations: [OperationState; 6],
}

impl<T, C: Default> Default for RequestState<T, C> {
    fn default() -> Self {
        Self {
            collection: Vec::new(),
            selected: None,
            counters: C::default(),
            last_error: None,
            operations: Default::default(),
        }
    }
}

impl<T, C: Default> RequestState<T, C> {
    /// Empty collections, idle statuses
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, C> RequestState<T, C> {
    pub fn collection(&self) -> &[T] {
        &self.collection
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Denormalized, resource-specific counters
    pub fn counters(&self) -> &C {
        &self.counters
    }

    /// Most recent failure of any class; cleared whenever a request begins
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn operation(&self, class: OperationClass) -> &OperationState {
        &self.operations[class.index()]
    }

    pub(crate) fn operation_mut(&mut self, class: OperationClass) -> &mut OperationState {
        &mut self.operations[class.index()]
    }

    pub fn status(&self, class: OperationClass) -> RequestStatus {
        self.operation(class).status
    }

    pub fn is_loading(&self, class: OperationClass) -> bool {
        self.status(class) == RequestStatus::Loading
    }

    /// True while any class has a request in flight
    pub fn is_busy(&self) -> bool {
        self.operations.iter().any(|op| op.status == RequestStatus::Loading)
    }

    /// Token the next request of `class` will carry
    pub fn next_token(&self, class: OperationClass) -> RequestToken {
        RequestToken {
            class,
            generation: self.operation(class).generation + 1,
        }
    }
}
