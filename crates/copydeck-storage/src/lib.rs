// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Copydeck durable key-value contract.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread; the [`SqliteKvStore`] IS the single writer. Do not create
//! additional Connection instances for writes.

pub mod store;

pub use store::SqliteKvStore;
