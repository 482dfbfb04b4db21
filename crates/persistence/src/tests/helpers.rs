// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Value, json};

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn supplier_record(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "cpf_cnpj": "",
        "contact": "",
        "products_supplied": "Toalhas",
        "created_at": "2024-01-01T12:00:00Z",
        "updated_at": "2024-01-01T12:00:00Z"
    })
}

pub fn audit_record(id: &str, entity_id: &str) -> Value {
    json!({
        "id": id,
        "user_id": "admin-123",
        "user_name": "Admin",
        "action": "CREATE",
        "entity_type": "SUPPLIER",
        "entity_id": entity_id,
        "changes": "Created",
        "created_at": "2024-01-01T12:00:00Z"
    })
}

/// A fresh, not yet created directory under the system temp dir.
pub fn temp_mirror_dir(label: &str) -> PathBuf {
    let n: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "partyrent-mirror-{label}-{}-{n}",
        std::process::id()
    ))
}
