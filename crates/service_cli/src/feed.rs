//! Synthetic market feed and console sink.
//!
//! Stand-ins for the live transport at both edges of the pipeline: the feed
//! evolves each subscribed knot with a mean-reverting (Ornstein–Uhlenbeck)
//! step, and the sink renders published spline series to stdout.

use curve_pipeline::{MarketSink, MarketSource, SplineUpdate, StreamId, DEFAULT_VALUE_FID};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

/// Mean-reversion parameters for one simulated ticker.
///
/// dX = κ·(θ − X)·dt + σ·dW
#[derive(Debug, Clone, Copy)]
struct MeanReversion {
    /// Mean reversion speed (κ)
    speed: f64,
    /// Long-term mean level (θ)
    mean_level: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl MeanReversion {
    fn evolve(&self, current: f64, dt: f64, random_draw: f64) -> f64 {
        current + self.speed * (self.mean_level - current) * dt
            + self.volatility * dt.sqrt() * random_draw
    }
}

struct KnotState {
    stream: StreamId,
    ticker: String,
    level: f64,
    model: MeanReversion,
}

/// Deterministic (seeded) synthetic market source.
///
/// Each subscription gets its own mean level so the resulting curve has
/// shape; successive calls to [`tick`](Self::tick) evolve every level one
/// step and emit one update per subscribed ticker.
pub struct SyntheticFeed {
    rng: StdRng,
    normal: Normal<f64>,
    next_stream: StreamId,
    states: Vec<KnotState>,
}

impl SyntheticFeed {
    /// Time step per tick, in years.
    const DT: f64 = 1.0 / 252.0;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            normal: Normal::new(0.0, 1.0).expect("unit normal is well-formed"),
            next_stream: 0,
            states: Vec::new(),
        }
    }

    /// Evolve every subscribed ticker one step and return the updates,
    /// each carrying the conventional value field.
    pub fn tick(&mut self) -> Vec<(StreamId, Vec<(i32, f64)>)> {
        let mut updates = Vec::with_capacity(self.states.len());
        for state in &mut self.states {
            let draw = self.normal.sample(&mut self.rng);
            state.level = state.model.evolve(state.level, Self::DT, draw);
            debug!(ticker = %state.ticker, level = state.level, "synthetic tick");
            updates.push((state.stream, vec![(DEFAULT_VALUE_FID, state.level)]));
        }
        updates
    }

    /// Number of subscribed tickers.
    pub fn subscription_count(&self) -> usize {
        self.states.len()
    }
}

impl MarketSource for SyntheticFeed {
    fn subscribe(&mut self, _service: &str, ticker: &str) -> StreamId {
        self.next_stream += 1;
        // Spread the long-term means so the curve is not flat
        let mean_level = 1.0 + 0.25 * self.states.len() as f64;
        self.states.push(KnotState {
            stream: self.next_stream,
            ticker: ticker.to_string(),
            level: mean_level,
            model: MeanReversion {
                speed: 0.5,
                mean_level,
                volatility: 0.8,
            },
        });
        self.next_stream
    }
}

/// Output rendering for published updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable one-line-per-publish form
    Table,
    /// One JSON object per publish
    Json,
}

/// Console sink: renders publishes at the update's display precisions.
pub struct ConsoleSink {
    format: OutputFormat,
    published: u64,
}

impl ConsoleSink {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            published: 0,
        }
    }

    /// Total publishes rendered so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    fn render_values(values: &[f64], precision: u8) -> Vec<String> {
        values
            .iter()
            .map(|v| format!("{:.*}", precision as usize, v))
            .collect()
    }
}

impl MarketSink for ConsoleSink {
    fn publish(&mut self, update: &SplineUpdate<'_>) {
        self.published += 1;
        match self.format {
            OutputFormat::Table => {
                println!(
                    "{} inc={} x=[{}] z=[{}]",
                    update.ticker,
                    update.increment.1,
                    Self::render_values(update.xs.values, update.xs.precision).join(", "),
                    Self::render_values(update.zs.values, update.zs.precision).join(", "),
                );
            }
            OutputFormat::Json => {
                let obj = serde_json::json!({
                    "ticker": update.ticker,
                    "stream": update.stream,
                    "increment": update.increment.1,
                    "x": Self::render_values(update.xs.values, update.xs.precision),
                    "z": Self::render_values(update.zs.values, update.zs.precision),
                });
                println!("{}", obj);
            }
        }
    }

    fn publish_error(&mut self, ticker: &str, stream: StreamId, message: &str) {
        eprintln!("ERROR {} (stream {}): {}", ticker, stream, message);
    }

    fn publish_directory(&mut self, name: &str, _stream: StreamId, tickers: &[&str]) {
        println!("{} -> [{}]", name, tickers.join(", "));
    }
}
