//! Shared utilities for the commitment layer.

pub mod parallel;

pub use parallel::{parallelism_enabled, set_parallelism, ParallelismGuard};
