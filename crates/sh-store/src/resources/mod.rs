// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The four backend resources and their store policies

mod announcements;
mod messages;
mod schedules;
mod users;

pub use announcements::Announcements;
pub use messages::{MessageCounters, Messages};
pub use schedules::Schedules;
pub use users::Users;
