use clap::Args;
use common::Configuration;
use otlptranslator::{MetricDescriptor, MetricKind};

use super::NamerArgs;

#[derive(Args, Debug)]
pub struct NameArgs {
    /// OTel metric name, e.g. `http.server.duration`
    #[arg(long)]
    pub(crate) name: String,

    /// UCUM unit, e.g. `ms` or `By/s`
    #[arg(long, default_value = "")]
    pub(crate) unit: String,

    /// Metric kind: gauge, counter, updowncounter, histogram, exponential_histogram, summary
    #[arg(long, default_value = "unspecified")]
    pub(crate) kind: MetricKind,

    #[command(flatten)]
    pub(crate) namer: NamerArgs,
}

impl NameArgs {
    pub fn run(self, config: &Configuration) -> anyhow::Result<()> {
        println!("{}", self.translate(config));
        Ok(())
    }

    fn translate(&self, config: &Configuration) -> String {
        let namer = self.namer.metric_namer(config);
        let metric = MetricDescriptor::new(self.name.as_str(), self.unit.as_str(), self.kind);
        let name = namer.build(&metric);
        tracing::debug!(?metric, ?namer, %name, "Translated metric name");
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str, unit: &str, kind: MetricKind) -> NameArgs {
        NameArgs {
            name: name.to_string(),
            unit: unit.to_string(),
            kind,
            namer: NamerArgs::default(),
        }
    }

    #[test]
    fn test_translate_uses_configuration() {
        let mut config = Configuration::default();
        assert_eq!(
            args("http.server.duration", "ms", MetricKind::Gauge).translate(&config),
            "http_server_duration_milliseconds"
        );

        config.translator.namespace = "otel".to_string();
        config.translator.add_metric_suffixes = false;
        assert_eq!(
            args("http.server.duration", "ms", MetricKind::Gauge).translate(&config),
            "otel_http_server_duration"
        );
    }
}
