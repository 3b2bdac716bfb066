//! Check command: validate a pipeline configuration without running it.

use curve_pipeline::Pipeline;

use crate::error::{CliError, Result};

/// Load and build the configuration, then report what resolved.
///
/// Exclusions (curves with no resolvable knots, splines on missing curves)
/// are logged by the pipeline during construction; this command summarises
/// the surviving active set and fails if it is empty.
pub fn run(config_path: &str) -> Result<()> {
    let cfg = super::load_config(config_path)?;
    let declared_curves = cfg.curves.len();
    let declared_splines = cfg.splines.len();

    let pipeline = Pipeline::from_config(&cfg)?;

    println!("Configuration: {}", config_path);
    println!("  service:   {}", pipeline.service());
    println!("  directory: {}", pipeline.directory_name());
    println!(
        "  curves:    {} active ({} declared)",
        pipeline.curve_count(),
        declared_curves
    );
    println!(
        "  splines:   {} active ({} declared)",
        pipeline.spline_count(),
        declared_splines
    );
    println!("  knots:     {} distinct tickers", pipeline.knot_count());
    for name in pipeline.spline_names() {
        println!("    spline {}", name);
    }

    if pipeline.curve_count() == 0 || pipeline.spline_count() == 0 {
        return Err(CliError::EmptyConfig(format!(
            "no active curves/splines in {}",
            config_path
        )));
    }
    Ok(())
}
