use clap::Args;
use otlptranslator::{MetricKind, trim_prom_suffixes, unit_suffix};

#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Prometheus metric name, e.g. `http_server_duration_milliseconds`
    #[arg(long)]
    pub(crate) name: String,

    /// Metric kind; only sums have `_total` trimmed
    #[arg(long, default_value = "unspecified")]
    pub(crate) kind: MetricKind,

    /// Unit in Prometheus form (`milliseconds`), or in OTel form with `--otel-unit`
    #[arg(long, default_value = "")]
    pub(crate) unit: String,

    /// Translate `--unit` from OTel (UCUM) form before trimming
    #[arg(long)]
    pub(crate) otel_unit: bool,

    /// Translate `--unit` under UTF-8 rules
    #[arg(long, requires = "otel_unit")]
    pub(crate) utf8: bool,
}

impl TrimArgs {
    pub fn run(self) -> anyhow::Result<()> {
        println!("{}", self.trim());
        Ok(())
    }

    fn trim(&self) -> String {
        let unit = if self.otel_unit {
            unit_suffix(&self.unit, self.utf8)
        } else {
            self.unit.clone()
        };
        let trimmed = trim_prom_suffixes(&self.name, self.kind, &unit);
        tracing::debug!(name = %self.name, %unit, %trimmed, "Trimmed metric name");
        trimmed
    }
}
