//! Booking domain
//!
//! Duration labels, the status state machine, the service that drives the
//! lifecycle, and the two background passes (status sweep, archival).

pub mod archive;
pub mod duration;
pub mod service;
pub mod status;
pub mod sweeper;
