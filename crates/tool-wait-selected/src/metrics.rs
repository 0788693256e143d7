use crate::ports::MetricsPort;

#[derive(Clone, Debug, Default)]
pub struct NoopMetrics;

impl MetricsPort for NoopMetrics {
    fn record_ok(&self, _latency_ms: u128, _attempts: u32) {}
    fn record_timeout(&self, _reverse: bool) {}
    fn record_fail(&self, _kind: &str) {}
}
