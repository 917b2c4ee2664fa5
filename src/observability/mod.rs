//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer and Notion client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through request spans
//! - Metrics are cheap and disabled by default

pub mod logging;
pub mod metrics;
