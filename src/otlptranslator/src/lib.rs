//! Translation of OpenTelemetry metric identifiers into Prometheus ones

pub mod prometheus;

pub use prometheus::{
    MetricDescriptor, MetricKind, MetricNamer, TranslatorError, build_compliant_name,
    trim_prom_suffixes, unit_suffix,
};
