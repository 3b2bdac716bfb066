//! Run command: drive the pipeline from the synthetic feed.

use std::thread;
use std::time::Duration;

use curve_pipeline::Pipeline;
use tracing::info;

use crate::error::{CliError, Result};
use crate::feed::{ConsoleSink, OutputFormat, SyntheticFeed};

/// First downstream stream id handed out for spline binds; upstream
/// subscription ids start at 1, so keep the ranges apart for readability.
const FIRST_DOWNSTREAM_STREAM: u64 = 1000;

/// Build the pipeline from `config_path`, bind the splines (unless
/// `unwatched`), and feed it `ticks` rounds of synthetic knot updates.
pub fn run(
    config_path: &str,
    ticks: u32,
    interval_ms: u64,
    seed: u64,
    format: OutputFormat,
    unwatched: bool,
) -> Result<()> {
    let cfg = super::load_config(config_path)?;
    let mut pipeline = Pipeline::from_config(&cfg)?;
    if pipeline.curve_count() == 0 {
        return Err(CliError::EmptyConfig(format!(
            "no valid curves in {}",
            config_path
        )));
    }
    if pipeline.spline_count() == 0 {
        return Err(CliError::EmptyConfig(format!(
            "no valid splines in {}",
            config_path
        )));
    }

    let mut feed = SyntheticFeed::new(seed);
    let subscriptions = pipeline.open_all(&mut feed);
    info!(
        curves = pipeline.curve_count(),
        splines = pipeline.spline_count(),
        subscriptions,
        "pipeline ready"
    );

    let mut sink = ConsoleSink::new(format);

    // Simulate the downstream side: list the directory, then attach a
    // consumer to every spline so publishes flow.
    let directory = pipeline.directory_name().to_string();
    pipeline.on_directory_open(&directory, FIRST_DOWNSTREAM_STREAM, &mut sink);
    if !unwatched {
        let names: Vec<String> = pipeline.spline_names().map(String::from).collect();
        for (i, name) in names.iter().enumerate() {
            pipeline.on_spline_open(name, FIRST_DOWNSTREAM_STREAM + 1 + i as u64, &mut sink);
        }
    }

    for _ in 0..ticks {
        for (stream, fields) in feed.tick() {
            pipeline.on_update(stream, &fields, &mut sink);
        }
        if interval_ms > 0 {
            thread::sleep(Duration::from_millis(interval_ms));
        }
    }

    info!(ticks, published = sink.published(), "run complete");
    Ok(())
}
