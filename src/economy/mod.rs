//! Resource economy: the catalog of items and spells players can buy.
//!
//! Balances live on each player's `ResourceLedger`; purchasing goes through
//! `Game::purchase`, which debits the ledger and applies the entry's effects.

pub mod catalog;

pub use catalog::{Catalog, CatalogEntry, CatalogId, CatalogKind};
