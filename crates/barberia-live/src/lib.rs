//! # barberia-live: Reactive Report Coordinator
//!
//! Keeps one [`Report`](barberia_core::report::Report) continuously up to
//! date from store change notifications, so the dashboard always reads the
//! latest numbers and never computes them itself.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  barberia-store ──change feed──► barberia-live (THIS CRATE)            │
//! │                                        │                                │
//! │                                        │ reload + compute_report        │
//! │                                        │ (barberia-core)                │
//! │                                        ▼                                │
//! │                                  watch<Report> ──► dashboard            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use barberia_core::dates::DatePreset;
//! use barberia_live::ReportFeed;
//!
//! let today = chrono::Utc::now().date_naive();
//! let feed = ReportFeed::spawn(store, DatePreset::Today.resolve(today)).await?;
//!
//! // Read the latest numbers at any time
//! let report = feed.report();
//!
//! // Or react to updates
//! let mut rx = feed.subscribe();
//! while rx.changed().await.is_ok() {
//!     render(&rx.borrow());
//! }
//! ```

pub mod error;
pub mod feed;

pub use error::{LiveError, LiveResult};
pub use feed::ReportFeed;
