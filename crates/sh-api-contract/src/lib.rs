// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! schoolhub REST API contract types and validation
//!
//! This crate defines the wire types exchanged with the school backend:
//! announcements, messages, schedule entries and users, the payloads used to
//! create and update them, the list filters, and the `{ data: ... }` response
//! envelope. The types are shared by the REST client, the in-memory mock
//! backend and the client-side store.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
pub use validation::*;
