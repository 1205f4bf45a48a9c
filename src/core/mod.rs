//! Stateless services that derive presentation aggregates from expense snapshots.

pub mod services;
