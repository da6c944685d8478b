// src/db/transaction.rs
//
// Scoped write transactions
//
// A write begins with `begin_transaction` and ends with an explicit
// `commit()`. Any other exit (early `?` return, panic) drops the
// `Transaction`, which rolls back.

use rusqlite::{Transaction, TransactionBehavior};

use crate::db::PooledConn;
use crate::error::AppResult;

/// Begin an IMMEDIATE transaction so the write lock is taken up front
pub fn begin_transaction(conn: &mut PooledConn) -> AppResult<Transaction<'_>> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    Ok(tx)
}
