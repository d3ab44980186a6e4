//! Metric descriptors consumed by the Prometheus name translator
//!
//! The translator only needs three facts about a metric: its raw name, its
//! UCUM unit string, and its kind. These types carry exactly that, either built
//! directly or lifted from an OTLP protobuf `Metric`.

use std::fmt;
use std::str::FromStr;

use opentelemetry_proto::tonic::metrics::v1::{Metric, metric::Data};
use serde::{Deserialize, Serialize};

/// Errors raised while reading translator input from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslatorError {
    #[error("Unknown metric kind: {0:?}")]
    UnknownMetricKind(String),
}

/// OTLP metric kinds, as far as name translation cares about them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MetricKind {
    #[default]
    Unspecified,
    Gauge,
    /// A counter: a sum whose value only increases
    MonotonicSum,
    /// An up-down counter
    NonMonotonicSum,
    Histogram,
    ExponentialHistogram,
    Summary,
}

impl MetricKind {
    /// True for both monotonic and non-monotonic sums
    pub fn is_sum(self) -> bool {
        matches!(self, Self::MonotonicSum | Self::NonMonotonicSum)
    }

    /// True when the metric maps to a Prometheus counter
    pub fn is_counter(self) -> bool {
        self == Self::MonotonicSum
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Gauge => "gauge",
            Self::MonotonicSum => "monotonic_sum",
            Self::NonMonotonicSum => "non_monotonic_sum",
            Self::Histogram => "histogram",
            Self::ExponentialHistogram => "exponential_histogram",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = TranslatorError;

    /// Parse a kind name. Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "" | "unspecified" => Ok(Self::Unspecified),
            "gauge" => Ok(Self::Gauge),
            "counter" | "sum" | "monotonic_sum" => Ok(Self::MonotonicSum),
            "updowncounter" | "up_down_counter" | "non_monotonic_sum" => {
                Ok(Self::NonMonotonicSum)
            }
            "histogram" => Ok(Self::Histogram),
            "exponential_histogram" | "exphistogram" => Ok(Self::ExponentialHistogram),
            "summary" => Ok(Self::Summary),
            _ => Err(TranslatorError::UnknownMetricKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for MetricKind {
    type Error = TranslatorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MetricKind> for String {
    fn from(kind: MetricKind) -> Self {
        kind.as_str().to_string()
    }
}

impl From<&Metric> for MetricKind {
    fn from(metric: &Metric) -> Self {
        match &metric.data {
            Some(Data::Gauge(_)) => Self::Gauge,
            Some(Data::Sum(sum)) if sum.is_monotonic => Self::MonotonicSum,
            Some(Data::Sum(_)) => Self::NonMonotonicSum,
            Some(Data::Histogram(_)) => Self::Histogram,
            Some(Data::ExponentialHistogram(_)) => Self::ExponentialHistogram,
            Some(Data::Summary(_)) => Self::Summary,
            None => Self::Unspecified,
        }
    }
}

/// The parts of a metric that name translation reads
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricDescriptor {
    pub name: String,
    /// UCUM unit, e.g. `ms`, `By/s`, `{request}`
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub kind: MetricKind,
}

impl MetricDescriptor {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, kind: MetricKind) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            kind,
        }
    }
}

impl From<&Metric> for MetricDescriptor {
    fn from(metric: &Metric) -> Self {
        Self {
            name: metric.name.clone(),
            unit: metric.unit.clone(),
            kind: MetricKind::from(metric),
        }
    }
}
