//! The two operations exposed over HTTP.

pub mod aggregate;
pub mod authorize;
