//! Reactive curve pipeline: knot updates in, dense spline publishes out.
//!
//! This crate maintains the knot → curve → spline dependency graph declared
//! in a [`PipelineConfig`] and drives it on a push basis:
//!
//! 1. A market update arrives for a knot's subscription stream.
//! 2. The knot's value is overwritten; every curve watching it rebuilds its
//!    sample arrays.
//! 3. Each dependent spline re-interpolates a dense series over the curve
//!    (via [`spline_core`]) at its configured increment.
//! 4. Splines with an attached downstream stream publish immediately;
//!    unwatched splines cache the result for the next attach.
//!
//! The transport at either edge is a collaborator, not part of this crate:
//! subscriptions go through [`MarketSource`], outbound updates through
//! [`MarketSink`]. Dispatch is single-threaded by construction: every entry
//! point takes `&mut self`, and the pipeline performs no internal locking or
//! threading of its own.
//!
//! ## Example
//!
//! ```
//! use curve_pipeline::{Pipeline, PipelineConfig, CurveDef, KnotDef, SplineDef};
//!
//! let cfg = PipelineConfig {
//!     service: "rates".into(),
//!     directory: None,
//!     curves: vec![CurveDef {
//!         name: "Swaps".into(),
//!         knots: vec![
//!             KnotDef { ticker: "SWAP.3M".into(), interval: 3.0, field_id: None },
//!             KnotDef { ticker: "SWAP.6M".into(), interval: 6.0, field_id: None },
//!             KnotDef { ticker: "SWAP.1Y".into(), interval: 12.0, field_id: None },
//!         ],
//!     }],
//!     splines: vec![SplineDef::new("Swaps.monthly", "Swaps", 1.0)],
//! };
//!
//! let pipeline = Pipeline::from_config(&cfg).unwrap();
//! assert_eq!(pipeline.curve_count(), 1);
//! assert_eq!(pipeline.spline_count(), 1);
//! ```

mod config;
mod error;
mod feed;
mod pipeline;

pub use config::{CurveDef, KnotDef, PipelineConfig, SplineDef};
pub use error::PipelineError;
pub use feed::{MarketSink, MarketSource, SplineUpdate, StreamId, VectorField};
pub use pipeline::{Pipeline, DEFAULT_INC_FID, DEFAULT_VALUE_FID, DEFAULT_X_FID, DEFAULT_Y_FID};
