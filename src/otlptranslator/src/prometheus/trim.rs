//! Prometheus metric name → OTel metric name
//!
//! The inverse of full normalization, used when Prometheus metrics are
//! converted back to OTLP: type and unit suffixes are stripped from the name.
//! See <https://opentelemetry.io/docs/specs/otel/metrics/data-model/#metric-metadata>.

use super::types::MetricKind;

const TOTAL_SUFFIX: &str = "total";

/// Trim type and unit suffixes from a Prometheus metric name.
///
/// `unit` must be the Prometheus form of the unit (`milliseconds`,
/// `bytes_per_second`), not the OTel unit (`ms`, `By/s`): suffixes are matched
/// literally, token by token. Use [`unit_suffix`](super::unit_suffix) to
/// translate an OTel unit first.
///
/// Only sums carry a type suffix at this point; suffixes of other types are
/// expected to have been removed during scrape.
pub fn trim_prom_suffixes(prom_name: &str, kind: MetricKind, unit: &str) -> String {
    let tokens: Vec<&str> = prom_name.split('_').collect();
    if tokens.len() == 1 {
        return prom_name.to_string();
    }

    let tokens = remove_type_suffixes(&tokens, kind);
    let tokens = remove_unit_suffixes(tokens, unit);

    tokens.join("_")
}

fn remove_type_suffixes<'a, 'b>(tokens: &'a [&'b str], kind: MetricKind) -> &'a [&'b str] {
    if kind.is_sum() {
        remove_suffix(tokens, TOTAL_SUFFIX)
    } else {
        tokens
    }
}

/// Drop the trailing unit tokens when all of them match. A match that would
/// consume the whole name is left alone.
fn remove_unit_suffixes<'a, 'b>(tokens: &'a [&'b str], unit: &str) -> &'a [&'b str] {
    if unit.is_empty() {
        return tokens;
    }

    let unit_tokens: Vec<&str> = unit.split('_').collect();
    if tokens.len() <= unit_tokens.len() {
        return tokens;
    }

    if tokens.ends_with(&unit_tokens) {
        &tokens[..tokens.len() - unit_tokens.len()]
    } else {
        tokens
    }
}

fn remove_suffix<'a, 'b>(tokens: &'a [&'b str], suffix: &str) -> &'a [&'b str] {
    match tokens.split_last() {
        Some((last, rest)) if *last == suffix => rest,
        _ => tokens,
    }
}
