//! # Observability
//!
//! - `metrics`: Prometheus metrics collection
//!
//! Tracing is plain `tracing` spans; the subscriber is installed by the binary.

pub mod metrics;

pub use metrics::*;
