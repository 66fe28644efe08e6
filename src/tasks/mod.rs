//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the client.
//!
//! # Tasks
//! - TTL Sweep: Removes expired cache entries once per TTL period

mod sweeper;

pub(crate) use sweeper::spawn_sweep_task;
