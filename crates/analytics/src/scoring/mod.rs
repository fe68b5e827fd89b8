//! Structural scoring over citation graph snapshots
//!
//! Both engines read a graph and never mutate it.

mod betweenness;
mod kcore;

pub use betweenness::{betweenness, rank_by_betweenness};
pub use kcore::{core_numbers, k_core};
