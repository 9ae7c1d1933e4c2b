//! Background Tasks Module
//!
//! # Tasks
//! - TTL Sweep: removes expired cache entries once per TTL period

mod sweep;

pub use sweep::spawn_sweep_task;
