//! OTel metric name → Prometheus metric name
//!
//! Follows the OpenTelemetry Prometheus compatibility rules for metric names:
//!
//! | Step | Rule |
//! |------|------|
//! | Tokens | Name split on characters outside the active [`CharacterRegime`] |
//! | Unit | UCUM unit spelled out (`ms` → `milliseconds`, `By/s` → `bytes_per_second`) unless already in the name |
//! | Type | `_total` for monotonic sums, `_ratio` for gauges with unit `1` |
//! | Namespace | Prepended as-is, joined with `_` |
//! | Leading digit | Prefixed with `_` |
//!
//! See <https://prometheus.io/docs/practices/naming/#metric-and-label-naming> and
//! <https://opentelemetry.io/docs/specs/otel/compatibility/prometheus_and_openmetrics/>.

use opentelemetry_proto::tonic::metrics::v1::Metric;

use super::tokens::{CharacterRegime, NameTokens};
use super::types::{MetricDescriptor, MetricKind};
use super::units::ResolvedUnit;

const TOTAL_SUFFIX: &str = "total";
const RATIO_SUFFIX: &str = "ratio";

/// Build a Prometheus compliant name for `metric`.
///
/// With `add_metric_suffixes` the name is fully normalized: unit and type
/// suffixes are appended. Without it, only characters are sanitized.
///
/// The name is prefixed with `namespace` and an underscore when `namespace` is
/// non-empty. The namespace is not cleaned up; callers must pass one that
/// already follows Prometheus naming conventions.
pub fn build_compliant_name(
    metric: &MetricDescriptor,
    namespace: &str,
    add_metric_suffixes: bool,
    allow_utf8: bool,
) -> String {
    let regime = CharacterRegime::new(allow_utf8);

    if add_metric_suffixes {
        return normalize_name(metric, namespace, regime);
    }

    let name = sanitize_name(&metric.name, regime);

    if !namespace.is_empty() {
        return format!("{namespace}_{name}");
    }

    match regime {
        CharacterRegime::Ascii => prefix_leading_digit(name),
        CharacterRegime::Utf8 => name,
    }
}

/// [`build_compliant_name`] for an OTLP protobuf metric
pub fn build_compliant_name_for_metric(
    metric: &Metric,
    namespace: &str,
    add_metric_suffixes: bool,
    allow_utf8: bool,
) -> String {
    build_compliant_name(
        &MetricDescriptor::from(metric),
        namespace,
        add_metric_suffixes,
        allow_utf8,
    )
}

/// Replace each run of characters outside `[a-zA-Z0-9:_]` with a single `_`,
/// dropping runs at either end. Underscores already in the name are kept as
/// they are, so `a__b..c` becomes `a__b_c`. UTF-8 names pass through
/// untouched.
fn sanitize_name(name: &str, regime: CharacterRegime) -> String {
    match regime {
        CharacterRegime::Ascii => name
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == ':' || c == '_'))
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join("_"),
        CharacterRegime::Utf8 => name.to_string(),
    }
}

/// Full normalization: tokenize, append unit and type suffixes, prepend the
/// namespace and rejoin.
pub(crate) fn normalize_name(
    metric: &MetricDescriptor,
    namespace: &str,
    regime: CharacterRegime,
) -> String {
    let tokens = NameTokens::tokenize(&metric.name, regime);

    let tokens = ResolvedUnit::resolve(&metric.unit, &tokens, regime).append_to(tokens);
    let mut tokens = add_type_suffixes(tokens, metric);

    if !namespace.is_empty() {
        tokens = tokens.with_leading_token(namespace);
    }

    // Legacy names are rebuilt with `_` only; UTF-8 names reuse the recorded
    // separators.
    prefix_leading_digit(tokens.join("_"))
}

fn add_type_suffixes(mut tokens: NameTokens, metric: &MetricDescriptor) -> NameTokens {
    if metric.kind.is_counter() {
        tokens = tokens.with_trailing(TOTAL_SUFFIX);
    }

    // Unit "1" is often misused for counts of objects, so `_ratio` is only
    // appended for gauges.
    if metric.unit == "1" && metric.kind == MetricKind::Gauge {
        tokens = tokens.with_trailing(RATIO_SUFFIX);
    }

    tokens
}

/// Metric names cannot start with a digit
fn prefix_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Translation settings applied to every metric of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricNamer {
    /// Prepended to every name; must already be a valid name token
    pub namespace: String,
    /// Full normalization with unit and type suffixes
    pub add_metric_suffixes: bool,
    /// Keep UTF-8 characters instead of restricting names to ASCII
    pub allow_utf8: bool,
}

impl MetricNamer {
    /// Create a namer with full normalization and legacy character rules
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            add_metric_suffixes: true,
            allow_utf8: false,
        }
    }

    pub fn with_metric_suffixes(mut self, add_metric_suffixes: bool) -> Self {
        self.add_metric_suffixes = add_metric_suffixes;
        self
    }

    pub fn with_utf8(mut self, allow_utf8: bool) -> Self {
        self.allow_utf8 = allow_utf8;
        self
    }

    pub fn build(&self, metric: &MetricDescriptor) -> String {
        build_compliant_name(
            metric,
            &self.namespace,
            self.add_metric_suffixes,
            self.allow_utf8,
        )
    }

    pub fn build_for_metric(&self, metric: &Metric) -> String {
        self.build(&MetricDescriptor::from(metric))
    }
}
