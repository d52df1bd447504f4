//! Structural schema inference.
//!
//! Feed [`Analyzer::analyze`] a single, possibly deeply nested
//! [`scry_ir::Datum`] and get back a [`scry_types::Pattern`] describing
//! its repetitive shape: container composition, leaf types and ranges,
//! recurring literal fields versus variable keys, string-encoded numbers
//! and dates, fixed-width character templates, and optional fields.
//!
//! ```
//! use scry_analysis::{Analyzer, Config};
//! use scry_ir::Datum;
//!
//! let analyzer = Analyzer::new(Config::default())?;
//! let data = Datum::list((0..100).map(Datum::from));
//! let pattern = analyzer.analyze(&data)?;
//! assert_eq!(pattern.to_string(), "[int range=0..99]");
//! # Ok::<(), scry_analysis::Error>(())
//! ```
//!
//! The analyzer is single-threaded and CPU-bound; it performs no I/O
//! and never mutates its input. A host that wants feedback can watch
//! [`Analyzer::progress`] from another thread and collect validation
//! [`Anomaly`] warnings through [`Analyzer::on_warning`].

mod analyzer;
mod anomaly;
mod config;
mod error;
mod progress;

pub use analyzer::Analyzer;
pub use anomaly::Anomaly;
pub use config::Config;
pub use error::Error;
pub use progress::Progress;
