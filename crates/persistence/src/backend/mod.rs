// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Connection initialization, migrations and PRAGMA configuration live
//! here. Everything else is plain Diesel DSL in `sqlite_store`.

pub mod sqlite;
