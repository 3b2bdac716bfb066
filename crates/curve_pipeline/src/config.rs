//! Declarative pipeline configuration.
//!
//! The pipeline is built from a static description of its curves and
//! splines. The types here are plain serde `Deserialize` structs so the
//! caller may feed them from any format; the `curvecast` binary uses TOML:
//!
//! ```toml
//! service = "velocity"
//! directory = "curvecast"
//!
//! [[curve]]
//! name = "Swaps"
//! knot = [
//!     { ticker = "RATES.SWAP.USD.PAR.3M", interval = 3.0 },
//!     { ticker = "RATES.SWAP.USD.PAR.6M", interval = 6.0 },
//!     { ticker = "RATES.SWAP.USD.PAR.1Y", interval = 12.0 },
//! ]
//!
//! [[spline]]
//! name = "SwapSpline.monthly"
//! curve = "Swaps"
//! increment = 1.0
//! ```

use serde::Deserialize;

/// Top-level pipeline description.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Upstream service name subscriptions are keyed by.
    #[serde(default = "default_service")]
    pub service: String,

    /// Name of the published symbol-list directory. Defaults to
    /// `"curvecast"` when absent.
    #[serde(default)]
    pub directory: Option<String>,

    /// Curve definitions.
    #[serde(default, rename = "curve")]
    pub curves: Vec<CurveDef>,

    /// Spline definitions.
    #[serde(default, rename = "spline")]
    pub splines: Vec<SplineDef>,
}

/// One curve: a name and the knots sampling it.
#[derive(Debug, Clone, Deserialize)]
pub struct CurveDef {
    /// Curve name, referenced by spline definitions.
    pub name: String,

    /// Knot list. Entries with an empty ticker or non-positive interval are
    /// skipped at build time; a curve left with zero knots is excluded.
    #[serde(default, rename = "knot")]
    pub knots: Vec<KnotDef>,
}

/// One knot: a market ticker pinned to a point on the maturity axis.
#[derive(Debug, Clone, Deserialize)]
pub struct KnotDef {
    /// Upstream ticker supplying the knot's value.
    pub ticker: String,

    /// Position on the independent axis (maturity/interval, must be > 0).
    pub interval: f64,

    /// Field carrying the value in inbound updates. Defaults to the
    /// conventional value field when absent.
    #[serde(default)]
    pub field_id: Option<i32>,
}

/// One published spline output over a curve.
#[derive(Debug, Clone, Deserialize)]
pub struct SplineDef {
    /// Published ticker name.
    pub name: String,

    /// Name of the curve this spline samples.
    pub curve: String,

    /// Evaluation increment along the x-axis. Values below 0.001 are
    /// clamped up at build time.
    #[serde(default = "default_increment")]
    pub increment: f64,

    /// Field id for the published increment. Conventional default when absent.
    #[serde(default)]
    pub inc_field_id: Option<i32>,

    /// Field id for the published evaluation-point vector.
    #[serde(default)]
    pub x_field_id: Option<i32>,

    /// Field id for the published value vector.
    #[serde(default)]
    pub y_field_id: Option<i32>,

    /// Decimal display precision of the published value vector.
    #[serde(default = "default_precision")]
    pub precision: u8,
}

impl SplineDef {
    /// Shorthand for a spline with default field ids and precision.
    pub fn new(name: impl Into<String>, curve: impl Into<String>, increment: f64) -> Self {
        Self {
            name: name.into(),
            curve: curve.into(),
            increment,
            inc_field_id: None,
            x_field_id: None,
            y_field_id: None,
            precision: default_precision(),
        }
    }
}

fn default_service() -> String {
    "velocity".to_string()
}

fn default_increment() -> f64 {
    1.0
}

fn default_precision() -> u8 {
    4
}
