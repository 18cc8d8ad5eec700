// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client-side state for the schoolhub portal
//!
//! Two independent pieces live here:
//!
//! - The **resource store**: one [`ResourceStore`] per backend resource
//!   (announcements, messages, schedules, users). Each store keeps the last
//!   known collection, the selected item and the lifecycle of every
//!   operation class, and applies remote outcomes through the
//!   [`reduce`](action::reduce) function. Responses that belong to a request
//!   superseded by a newer one of the same class are discarded.
//! - The **schedule grid projector**: [`project`](schedule_grid::project)
//!   turns a flat list of schedule entries into a day by time-slot matrix.
//!
//! [`AppStore`] bundles the four resource stores around one shared
//! [`ClientApi`](sh_client_api::ClientApi) transport.

pub mod action;
pub mod app;
pub mod dashboard;
pub mod request_state;
pub mod resource;
pub mod resources;
pub mod schedule_grid;
pub mod store;

pub use action::{Reduction, StoreAction, reduce};
pub use app::AppStore;
pub use dashboard::{DashboardStats, RoleCounts, Viewer};
pub use request_state::{OperationClass, OperationState, RequestState, RequestStatus, RequestToken};
pub use resource::{CountedResource, InsertPolicy, Resource};
pub use resources::{Announcements, MessageCounters, Messages, Schedules, Users};
pub use schedule_grid::{
    CellContent, EMPTY_CELL, GridCell, GridRow, ScheduleGrid, TimeSlot, default_slots,
    normalize_time, project,
};
pub use store::{OperationOutcome, ResourceStore};
