/// Aggregate counters for one `work` run.
///
/// All counters start at zero when `work` is invoked and only ever grow.
/// After any completed iteration, `processed == succeeded + failed`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerMetrics {
    /// Completed receive calls, including a final one that came back empty.
    pub iterations: u64,

    /// Messages handed to the handler.
    pub processed: u64,

    /// Messages whose handler succeeded.
    pub succeeded: u64,

    /// Messages whose handler failed. They are left on the queue for
    /// redelivery.
    pub failed: u64,
}
