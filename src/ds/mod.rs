//! Data-structure layer: the slot-arena-backed recency chain.

pub mod recency_list;

pub use recency_list::{EntryId, RecencyList};
