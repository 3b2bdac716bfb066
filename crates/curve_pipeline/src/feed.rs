//! Collaborator interfaces at the pipeline's transport edges.
//!
//! The market-data transport is not part of this crate. Inbound, the
//! pipeline asks a [`MarketSource`] to open one subscription per distinct
//! knot ticker and is then driven through `Pipeline::on_update` by whoever
//! owns the transport's dispatch loop. Outbound, dense spline series leave
//! through a [`MarketSink`].

/// Opaque handle correlating a subscription or publication stream with
/// pipeline state. Issued by the transport; never interpreted here.
pub type StreamId = u64;

/// Market-data source collaborator: opens logical subscriptions.
///
/// Value delivery is asynchronous and out of band: the transport calls
/// back into the pipeline with the `StreamId` returned here.
pub trait MarketSource {
    /// Open a subscription for `ticker` on `service` and return its stream.
    fn subscribe(&mut self, service: &str, ticker: &str) -> StreamId;
}

/// One published vector field with an explicit display precision.
#[derive(Debug, Clone, Copy)]
pub struct VectorField<'a> {
    /// Outbound field identifier
    pub fid: i32,
    /// Field payload
    pub values: &'a [f64],
    /// Decimal display precision
    pub precision: u8,
}

/// One outbound spline update: the increment plus the two parallel vectors
/// (evaluation points and interpolated values).
#[derive(Debug, Clone, Copy)]
pub struct SplineUpdate<'a> {
    /// Published ticker
    pub ticker: &'a str,
    /// Downstream stream the update is addressed to
    pub stream: StreamId,
    /// Increment field: (field id, spacing)
    pub increment: (i32, f64),
    /// Evaluation points
    pub xs: VectorField<'a>,
    /// Interpolated values
    pub zs: VectorField<'a>,
}

/// Market-data sink collaborator: delivers outbound updates downstream.
pub trait MarketSink {
    /// Deliver a recomputed spline series.
    fn publish(&mut self, update: &SplineUpdate<'_>);

    /// Answer a malformed or unresolvable downstream request with an
    /// application-level error on its own stream.
    fn publish_error(&mut self, ticker: &str, stream: StreamId, message: &str);

    /// Deliver the symbol-list directory (the published spline tickers).
    fn publish_directory(&mut self, name: &str, stream: StreamId, tickers: &[&str]);
}
