// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::source::SqliteSource;
use crate::source::sample::sample_bonds;
use crate::source::sqlite::upsert_bond;

/// Load the sample bonds into an empty database. Returns how many were added.
pub fn handle(conn: &mut Connection) -> Result<usize> {
    let existing = SqliteSource::new(conn).count()?;
    if existing > 0 {
        println!("Database already holds {} bonds; nothing seeded", existing);
        return Ok(0);
    }
    let bonds = sample_bonds();
    let tx = conn.transaction()?;
    for bond in &bonds {
        upsert_bond(&tx, bond)?;
    }
    tx.commit()?;
    println!("Seeded {} sample bonds", bonds.len());
    Ok(bonds.len())
}
