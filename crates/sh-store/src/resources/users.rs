// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use sh_api_contract::{ApiContractError, NewUser, User, UserFilter, UserPatch, validate_new_user};

use crate::resource::{InsertPolicy, Resource};

#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Resource for Users {
    type Item = User;
    type Counters = ();
    type Filter = UserFilter;
    type Create = NewUser;
    type Update = UserPatch;

    const NAME: &'static str = "users";
    const INSERT_POLICY: InsertPolicy = InsertPolicy::Append;

    fn id(item: &User) -> &str {
        &item.id
    }

    fn validate_create(payload: &NewUser) -> Result<(), ApiContractError> {
        validate_new_user(payload)
    }
}
