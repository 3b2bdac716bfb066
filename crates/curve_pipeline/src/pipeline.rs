//! Arena-based knot/curve/spline store and update dispatch.
//!
//! All records live in flat vectors owned by [`Pipeline`]; relationships are
//! typed indices rather than shared references, so there are no ownership
//! cycles and iteration order is deterministic (insertion order).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use spline_core::{CubicSpline, SplineError};
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::feed::{MarketSink, MarketSource, SplineUpdate, StreamId, VectorField};

/// Conventional field id carrying a knot's value in inbound updates.
pub const DEFAULT_VALUE_FID: i32 = 6;
/// Conventional field id of the published increment.
pub const DEFAULT_INC_FID: i32 = 6;
/// Conventional field id of the published evaluation-point vector.
pub const DEFAULT_X_FID: i32 = -8001;
/// Conventional field id of the published value vector.
pub const DEFAULT_Y_FID: i32 = -8002;

/// Display precision of published evaluation points.
const X_PRECISION: u8 = 2;
/// Smallest accepted evaluation increment; lower values are clamped up.
const MIN_INCREMENT: f64 = 0.001;
/// Recomputes at or above this duration are logged.
const SLOW_RECOMPUTE: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KnotId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CurveId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SplineId(usize);

/// A named sampled point on the maturity axis. `x` is fixed per watch;
/// `y` is overwritten by each inbound update.
#[derive(Debug)]
struct Knot {
    ticker: String,
    field_id: i32,
    y: f64,
    stream: Option<StreamId>,
    /// Curves to notify when this knot's value changes (deduplicated).
    curves: Vec<CurveId>,
}

/// The knot→curve relationship: which knot contributes a sample, and where
/// on the x-axis it sits. Created at build time, immutable thereafter.
#[derive(Debug, Clone, Copy)]
struct KnotWatch {
    knot: KnotId,
    x: f64,
}

/// An ordered set of knot watches plus the parallel sample arrays rebuilt
/// from them on every update. `xs` never changes after construction.
#[derive(Debug)]
struct Curve {
    name: String,
    watches: Vec<KnotWatch>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    x_max: f64,
    splines: Vec<SplineId>,
}

/// One published dense series over a curve.
#[derive(Debug)]
struct Spline {
    name: String,
    curve: CurveId,
    inc: f64,
    inc_fid: i32,
    x_fid: i32,
    y_fid: i32,
    precision: u8,
    xd: Vec<f64>,
    z: Vec<f64>,
    /// `Some` while a downstream consumer is attached (Bound state).
    stream: Option<StreamId>,
    computed: bool,
}

/// The knot → curve → spline dependency graph and its dispatch logic.
///
/// Built once from a [`PipelineConfig`] and driven for the process lifetime.
/// Entry points take `&mut self`: updates must be delivered serially, which
/// matches the single dispatch thread of the upstream transport. Each knot
/// update triggers one full recompute of every dependent spline; no
/// coalescing or debouncing is performed.
#[derive(Debug)]
pub struct Pipeline {
    service: String,
    directory: String,
    knots: Vec<Knot>,
    curves: Vec<Curve>,
    splines: Vec<Spline>,
    knot_by_ticker: HashMap<String, KnotId>,
    knot_by_stream: HashMap<StreamId, KnotId>,
    curve_by_name: HashMap<String, CurveId>,
    spline_by_name: HashMap<String, SplineId>,
}

impl Pipeline {
    /// Build the dependency graph from a declarative configuration.
    ///
    /// Knots are deduplicated by ticker: two curves naming the same ticker
    /// share one knot. Watches are sorted ascending by interval so the
    /// engine's sorted-input precondition holds. Defects degrade rather
    /// than fail: knots with an empty ticker or non-positive interval are
    /// skipped, a curve left with zero knots is excluded, and a spline
    /// naming an unknown or excluded curve is dropped, each with a logged
    /// warning. Only duplicate curve/spline names are structural errors.
    pub fn from_config(cfg: &PipelineConfig) -> Result<Self, PipelineError> {
        let mut pipeline = Pipeline {
            service: cfg.service.clone(),
            directory: cfg
                .directory
                .clone()
                .unwrap_or_else(|| "curvecast".to_string()),
            knots: Vec::new(),
            curves: Vec::new(),
            splines: Vec::new(),
            knot_by_ticker: HashMap::new(),
            knot_by_stream: HashMap::new(),
            curve_by_name: HashMap::new(),
            spline_by_name: HashMap::new(),
        };

        for def in &cfg.curves {
            if pipeline.curve_by_name.contains_key(&def.name) {
                return Err(PipelineError::DuplicateCurve {
                    name: def.name.clone(),
                });
            }

            let mut watches = Vec::with_capacity(def.knots.len());
            for kd in &def.knots {
                if kd.ticker.is_empty() {
                    warn!(curve = %def.name, "skipping knot with empty ticker");
                    continue;
                }
                if !(kd.interval > 0.0) {
                    warn!(
                        curve = %def.name,
                        ticker = %kd.ticker,
                        interval = kd.interval,
                        "skipping knot with non-positive interval"
                    );
                    continue;
                }
                let kid =
                    pipeline.intern_knot(&kd.ticker, kd.field_id.unwrap_or(DEFAULT_VALUE_FID));
                watches.push(KnotWatch {
                    knot: kid,
                    x: kd.interval,
                });
            }

            if watches.is_empty() {
                warn!(curve = %def.name, "curve has no resolvable knots; excluded");
                continue;
            }
            watches.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));

            let cid = CurveId(pipeline.curves.len());
            let xs: Vec<f64> = watches.iter().map(|w| w.x).collect();
            let ys: Vec<f64> = watches
                .iter()
                .map(|w| pipeline.knots[w.knot.0].y)
                .collect();
            let x_max = xs.iter().fold(1.0_f64, |m, &x| m.max(x));
            for w in &watches {
                let watching = &mut pipeline.knots[w.knot.0].curves;
                if !watching.contains(&cid) {
                    watching.push(cid);
                }
            }
            info!(curve = %def.name, knots = watches.len(), x_max, "curve added");
            pipeline.curves.push(Curve {
                name: def.name.clone(),
                watches,
                xs,
                ys,
                x_max,
                splines: Vec::new(),
            });
            pipeline.curve_by_name.insert(def.name.clone(), cid);
        }

        for def in &cfg.splines {
            if pipeline.spline_by_name.contains_key(&def.name) {
                return Err(PipelineError::DuplicateSpline {
                    name: def.name.clone(),
                });
            }
            let Some(&cid) = pipeline.curve_by_name.get(&def.curve) else {
                warn!(
                    spline = %def.name,
                    curve = %def.curve,
                    "spline references unknown or excluded curve; skipped"
                );
                continue;
            };

            let inc = if def.increment < MIN_INCREMENT {
                warn!(
                    spline = %def.name,
                    increment = def.increment,
                    clamped = MIN_INCREMENT,
                    "increment below minimum; clamped"
                );
                MIN_INCREMENT
            } else {
                def.increment
            };

            let sid = SplineId(pipeline.splines.len());
            pipeline.splines.push(Spline {
                name: def.name.clone(),
                curve: cid,
                inc,
                inc_fid: def.inc_field_id.unwrap_or(DEFAULT_INC_FID),
                x_fid: def.x_field_id.unwrap_or(DEFAULT_X_FID),
                y_fid: def.y_field_id.unwrap_or(DEFAULT_Y_FID),
                precision: def.precision,
                xd: Vec::new(),
                z: Vec::new(),
                stream: None,
                computed: false,
            });
            pipeline.curves[cid.0].splines.push(sid);
            pipeline.spline_by_name.insert(def.name.clone(), sid);
            info!(spline = %def.name, curve = %def.curve, inc, "spline added");
        }

        Ok(pipeline)
    }

    fn intern_knot(&mut self, ticker: &str, field_id: i32) -> KnotId {
        if let Some(&kid) = self.knot_by_ticker.get(ticker) {
            if self.knots[kid.0].field_id != field_id {
                debug!(
                    ticker,
                    kept = self.knots[kid.0].field_id,
                    ignored = field_id,
                    "conflicting field id for shared knot; first wins"
                );
            }
            return kid;
        }
        let kid = KnotId(self.knots.len());
        self.knots.push(Knot {
            ticker: ticker.to_string(),
            field_id,
            y: 0.0,
            stream: None,
            curves: Vec::new(),
        });
        self.knot_by_ticker.insert(ticker.to_string(), kid);
        kid
    }

    /// Open one upstream subscription per distinct knot and record the
    /// stream → knot mapping for dispatch. Returns the subscription count.
    pub fn open_all(&mut self, source: &mut dyn MarketSource) -> usize {
        for (idx, knot) in self.knots.iter_mut().enumerate() {
            let stream = source.subscribe(&self.service, &knot.ticker);
            knot.stream = Some(stream);
            self.knot_by_stream.insert(stream, KnotId(idx));
            debug!(ticker = %knot.ticker, stream, "knot subscribed");
        }
        self.knots.len()
    }

    /// Inbound update dispatch: the trigger for the whole recompute chain.
    ///
    /// A stream with no knot mapping is silently ignored (it may belong to
    /// an unrelated subsystem, or arrive during startup/shutdown races). An
    /// update that does not carry the knot's watched field is ignored too,
    /// leaving the stale value in place. Otherwise the knot's value is
    /// overwritten (last write wins) and every watching curve rebuilds and
    /// fans out to its dependent splines; only splines with an attached
    /// downstream stream publish.
    pub fn on_update(&mut self, stream: StreamId, fields: &[(i32, f64)], sink: &mut dyn MarketSink) {
        let Some(&kid) = self.knot_by_stream.get(&stream) else {
            return;
        };
        let knot = &self.knots[kid.0];
        let Some(&(_, value)) = fields.iter().find(|(fid, _)| *fid == knot.field_id) else {
            debug!(ticker = %knot.ticker, "update without watched field; ignored");
            return;
        };

        self.knots[kid.0].y = value;
        debug!(ticker = %self.knots[kid.0].ticker, value, "knot updated");

        let watching = self.knots[kid.0].curves.clone();
        for cid in watching {
            self.recompute_curve(cid, sink);
        }
    }

    /// Downstream attach: bind the spline to `stream` and publish at once.
    ///
    /// A request for a ticker with no configured spline is answered with an
    /// application-level error on the requester's stream, never a crash.
    pub fn on_spline_open(&mut self, ticker: &str, stream: StreamId, sink: &mut dyn MarketSink) {
        let Some(&sid) = self.spline_by_name.get(ticker) else {
            warn!(ticker, stream, "open request for non-existent spline");
            sink.publish_error(ticker, stream, "non-existent ticker");
            return;
        };

        info!(ticker, stream, "spline opened");
        self.splines[sid.0].stream = Some(stream);
        if !self.splines[sid.0].computed {
            // First attach before any knot update: seed from current values.
            if let Err(err) = self.recalc_spline(sid) {
                warn!(ticker, %err, "initial recompute failed");
                return;
            }
        }
        self.publish_spline(sid, sink);
    }

    /// Downstream detach: clear the bound stream. Recomputation continues;
    /// results are cached for the next attach.
    pub fn on_spline_close(&mut self, ticker: &str) {
        if let Some(&sid) = self.spline_by_name.get(ticker) {
            info!(ticker, "spline closed");
            self.splines[sid.0].stream = None;
        }
    }

    /// Symbol-list request: publish the active spline tickers when the
    /// requested directory matches, otherwise answer with an error naming
    /// the supported one.
    pub fn on_directory_open(&mut self, name: &str, stream: StreamId, sink: &mut dyn MarketSink) {
        if name != self.directory {
            let msg = format!(
                "Unsupported directory {}; request {} instead",
                name, self.directory
            );
            warn!(name, stream, "unsupported directory request");
            sink.publish_error(name, stream, &msg);
            return;
        }
        info!(name, stream, splines = self.splines.len(), "directory opened");
        let tickers: Vec<&str> = self.splines.iter().map(|s| s.name.as_str()).collect();
        sink.publish_directory(name, stream, &tickers);
    }

    /// Symbol-list close: no per-stream directory state is kept, so this
    /// only records the event.
    pub fn on_directory_close(&mut self, name: &str) {
        debug!(name, "directory closed");
    }

    fn recompute_curve(&mut self, cid: CurveId, sink: &mut dyn MarketSink) {
        // Rebuild Y from the watches; X is fixed since construction.
        for i in 0..self.curves[cid.0].watches.len() {
            let kid = self.curves[cid.0].watches[i].knot;
            self.curves[cid.0].ys[i] = self.knots[kid.0].y;
        }

        let dependents = self.curves[cid.0].splines.clone();
        for sid in dependents {
            if let Err(err) = self.recalc_spline(sid) {
                warn!(
                    curve = %self.curves[cid.0].name,
                    spline = %self.splines[sid.0].name,
                    %err,
                    "recompute failed; previous output retained"
                );
                continue;
            }
            if self.splines[sid.0].stream.is_some() {
                self.publish_spline(sid, sink);
            }
        }
    }

    fn recalc_spline(&mut self, sid: SplineId) -> Result<(), SplineError> {
        let started = Instant::now();
        let (inc, cid) = {
            let s = &self.splines[sid.0];
            (s.inc, s.curve)
        };
        let curve = &self.curves[cid.0];
        let engine = CubicSpline::natural(&curve.xs, &curve.ys)?;
        let (xd, z) = engine.sample(inc, curve.x_max)?;

        let spline = &mut self.splines[sid.0];
        spline.xd = xd;
        spline.z = z;
        spline.computed = true;

        let elapsed = started.elapsed();
        if elapsed >= SLOW_RECOMPUTE {
            warn!(
                spline = %spline.name,
                elapsed_us = elapsed.as_micros() as u64,
                "slow spline recompute"
            );
        }
        Ok(())
    }

    fn publish_spline(&self, sid: SplineId, sink: &mut dyn MarketSink) {
        let s = &self.splines[sid.0];
        let Some(stream) = s.stream else {
            return;
        };
        sink.publish(&SplineUpdate {
            ticker: &s.name,
            stream,
            increment: (s.inc_fid, s.inc),
            xs: VectorField {
                fid: s.x_fid,
                values: &s.xd,
                precision: X_PRECISION,
            },
            zs: VectorField {
                fid: s.y_fid,
                values: &s.z,
                precision: s.precision,
            },
        });
    }

    /// Number of distinct knots across all active curves.
    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }

    /// Number of active (validly constructed) curves.
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Number of active splines; splines bound to excluded curves never
    /// enter this set.
    pub fn spline_count(&self) -> usize {
        self.splines.len()
    }

    /// Upstream service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Name of the published symbol-list directory.
    pub fn directory_name(&self) -> &str {
        &self.directory
    }

    /// Active spline tickers in configuration order.
    pub fn spline_names(&self) -> impl Iterator<Item = &str> {
        self.splines.iter().map(|s| s.name.as_str())
    }

    /// Current value of a knot by ticker.
    pub fn knot_value(&self, ticker: &str) -> Option<f64> {
        self.knot_by_ticker
            .get(ticker)
            .map(|kid| self.knots[kid.0].y)
    }

    /// A curve's current sample arrays `(xs, ys)`.
    pub fn curve_samples(&self, name: &str) -> Option<(&[f64], &[f64])> {
        self.curve_by_name
            .get(name)
            .map(|cid| (&self.curves[cid.0].xs[..], &self.curves[cid.0].ys[..]))
    }

    /// A spline's most recently computed output `(xd, z)`.
    pub fn spline_output(&self, name: &str) -> Option<(&[f64], &[f64])> {
        self.spline_by_name
            .get(name)
            .map(|sid| (&self.splines[sid.0].xd[..], &self.splines[sid.0].z[..]))
    }

    /// Whether the spline currently has an attached downstream stream.
    pub fn spline_is_bound(&self, name: &str) -> Option<bool> {
        self.spline_by_name
            .get(name)
            .map(|sid| self.splines[sid.0].stream.is_some())
    }
}
