use anyhow::Result;
use prometheus::{
    linear_buckets, Encoder, Histogram, HistogramOpts, IntCounter, Opts, Registry, TextEncoder,
};

/// Process-wide request metrics.
///
/// Metric names match the original service so existing scrape configs and
/// dashboards keep working. Cloning shares the underlying registry.
#[derive(Clone)]
pub struct ApiMetrics {
    registry: Registry,
    pub post_total: IntCounter,
    pub ping_total: IntCounter,
    pub post_duration: Histogram,
}

impl ApiMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let post_total = IntCounter::with_opts(Opts::new(
            "mesostic_post_app_total",
            "Total number of POST submissions to /app.",
        ))?;
        let ping_total = IntCounter::with_opts(Opts::new(
            "mesostic_ping_total",
            "Total number of readiness pings.",
        ))?;
        let post_duration = Histogram::with_opts(
            HistogramOpts::new(
                "mesostic_post_app_timer_seconds",
                "Runtime of POST submissions to /app.",
            )
            // 50 buckets, 10ms each, starting at 1ms
            .buckets(linear_buckets(0.001, 0.01, 50)?),
        )?;

        registry.register(Box::new(post_total.clone()))?;
        registry.register(Box::new(ping_total.clone()))?;
        registry.register(Box::new(post_duration.clone()))?;

        Ok(Self {
            registry,
            post_total,
            ping_total,
            post_duration,
        })
    }

    /// Render the registry in the Prometheus text exposition format
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_appear_in_exposition() {
        let metrics = ApiMetrics::new().unwrap();
        metrics.post_total.inc();
        metrics.ping_total.inc();
        metrics.ping_total.inc();

        let text = metrics.render().unwrap();
        assert!(text.contains("mesostic_post_app_total 1"));
        assert!(text.contains("mesostic_ping_total 2"));
    }

    #[test]
    fn test_duration_histogram_observes() {
        let metrics = ApiMetrics::new().unwrap();
        let timer = metrics.post_duration.start_timer();
        timer.observe_duration();

        let text = metrics.render().unwrap();
        assert!(text.contains("mesostic_post_app_timer_seconds_count 1"));
    }
}
