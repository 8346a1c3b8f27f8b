//! Alert reconciliation engine.
//!
//! Ingests batches of externally-sourced alert rows, matches them against
//! the case registry, deduplicates them against previously stored alerts
//! through tiered identity keys, provisions skeleton cases for alerts that
//! cannot be matched, and computes decay-based priority weights for the
//! work queue.
//!
//! Every entry point takes its full input (alert collection, case snapshot)
//! and returns a new value; callers own persistence and are responsible for
//! serializing writes. Apart from the [`provision::CaseRegistry`] seam the
//! engine performs no I/O.

pub mod conflict;
pub mod identity;
pub mod lookup;
pub mod matcher;
pub mod merge;
pub mod normalize;
pub mod provision;
pub mod status;
pub mod views;
pub mod weight;

#[cfg(test)]
mod tests;
