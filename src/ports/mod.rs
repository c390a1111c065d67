//! Port traits at the domain boundary.

pub mod config_port;
pub mod data_port;
pub mod diagnostic_port;
pub mod report_port;
