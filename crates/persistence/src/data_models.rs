// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::diesel_schema::collections;

/// A stored collection row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = collections)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CollectionRow {
    pub collection_key: String,
    pub payload: String,
    pub updated_at: String,
}

/// A collection row to insert or replace.
#[derive(Debug, Insertable)]
#[diesel(table_name = collections)]
pub struct NewCollectionRow<'a> {
    pub collection_key: &'a str,
    pub payload: &'a str,
    pub updated_at: &'a str,
}
