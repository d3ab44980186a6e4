use opentelemetry_proto::tonic::metrics::v1::{Gauge, Metric, Sum, metric::Data};
use otlptranslator::prometheus::{
    MetricDescriptor, MetricKind, MetricNamer, build_compliant_name,
    build_compliant_name_for_metric, trim_prom_suffixes, unit_suffix,
};
use proptest::prelude::*;
use rstest::rstest;

const TABLE_UNITS: &[&str] = &[
    "d", "h", "min", "s", "ms", "us", "ns", "By", "KiBy", "MiBy", "GiBy", "TiBy", "KBy", "MBy",
    "GBy", "TBy", "m", "V", "A", "J", "W", "g", "Cel", "Hz", "1", "%", "By/s", "1/h", "m/mo",
];

fn normalize(name: &str, unit: &str, kind: MetricKind) -> String {
    build_compliant_name(&MetricDescriptor::new(name, unit, kind), "", true, false)
}

#[rstest]
#[case("http.server.duration", "ms", MetricKind::Gauge, "http_server_duration_milliseconds")]
#[case("requests", "1", MetricKind::Gauge, "requests_ratio")]
#[case("requests", "1", MetricKind::MonotonicSum, "requests_total")]
#[case("foo", "s/1", MetricKind::Gauge, "foo_seconds")]
#[case("request_seconds", "s", MetricKind::Gauge, "request_seconds")]
#[case("system.network.io", "By", MetricKind::MonotonicSum, "system_network_io_bytes_total")]
#[case("disk.throughput", "By/s", MetricKind::Gauge, "disk_throughput_bytes_per_second")]
#[case("uptime", "{seconds}", MetricKind::Gauge, "uptime")]
#[case("packets", "{packet}/s", MetricKind::MonotonicSum, "packets_per_second_total")]
#[case("jvm.cpu.recent_utilization", "1", MetricKind::Gauge, "jvm_cpu_recent_utilization_ratio")]
#[case("queue.depth", "items", MetricKind::NonMonotonicSum, "queue_depth_items")]
#[case("temperature", "Cel", MetricKind::Gauge, "temperature_celsius")]
#[case("storage", "weird unit!", MetricKind::Gauge, "storage_weird_unit_")]
#[case("latency", "ms/req", MetricKind::Histogram, "latency_milliseconds_per_req")]
#[case("__dunder__", "", MetricKind::Gauge, "dunder")]
#[case("", "", MetricKind::Gauge, "")]
#[case("", "1", MetricKind::Gauge, "ratio")]
fn test_normalize_scenarios(
    #[case] name: &str,
    #[case] unit: &str,
    #[case] kind: MetricKind,
    #[case] expected: &str,
) {
    assert_eq!(normalize(name, unit, kind), expected);
}

#[rstest]
#[case("9xyz", "", false, false, "_9xyz")]
#[case("9xyz", "", false, true, "9xyz")]
#[case("http.server.duration", "", false, false, "http_server_duration")]
#[case("http.server.duration", "otel", false, false, "otel_http_server_duration")]
#[case("http.server.duration", "otel", true, false, "otel_http_server_duration_milliseconds")]
#[case("http.server.duration", "", true, true, "http.server.duration_milliseconds")]
#[case("cache-hits", "", false, true, "cache-hits")]
fn test_build_compliant_name_flags(
    #[case] name: &str,
    #[case] namespace: &str,
    #[case] add_metric_suffixes: bool,
    #[case] allow_utf8: bool,
    #[case] expected: &str,
) {
    let metric = MetricDescriptor::new(name, "ms", MetricKind::Gauge);
    assert_eq!(
        build_compliant_name(&metric, namespace, add_metric_suffixes, allow_utf8),
        expected
    );
}

#[test]
fn test_unit_is_never_duplicated() {
    let name = normalize("request_seconds", "s", MetricKind::Gauge);
    assert!(!name.contains("seconds_seconds"), "{name}");
}

#[rstest]
#[case("a½total", "a_total")]
#[case("requests.total", "requests_total")]
#[case("aⅣb", "aⅣb_total")]
#[case("temp²total²", "temp_total")]
fn test_utf8_counter_has_single_total(#[case] name: &str, #[case] expected: &str) {
    let metric = MetricDescriptor::new(name, "", MetricKind::MonotonicSum);
    assert_eq!(build_compliant_name(&metric, "", true, true), expected);
}

#[test]
fn test_build_from_otlp_metric() {
    let counter = Metric {
        name: "http.server.request.count".to_string(),
        unit: "{request}".to_string(),
        data: Some(Data::Sum(Sum {
            is_monotonic: true,
            ..Default::default()
        })),
        ..Default::default()
    };
    assert_eq!(
        build_compliant_name_for_metric(&counter, "", true, false),
        "http_server_request_count_total"
    );

    let gauge = Metric {
        name: "process.cpu.utilization".to_string(),
        unit: "1".to_string(),
        data: Some(Data::Gauge(Gauge::default())),
        ..Default::default()
    };
    let namer = MetricNamer::new("app");
    assert_eq!(
        namer.build_for_metric(&gauge),
        "app_process_cpu_utilization_ratio"
    );
}

#[test]
fn test_round_trip_with_translated_unit() {
    let name = normalize("http_server_duration", "ms", MetricKind::Gauge);
    assert_eq!(name, "http_server_duration_milliseconds");
    assert_eq!(
        trim_prom_suffixes(&name, MetricKind::Gauge, &unit_suffix("ms", false)),
        "http_server_duration"
    );

    let name = normalize("disk_io", "By/s", MetricKind::MonotonicSum);
    assert_eq!(name, "disk_io_bytes_per_second_total");
    assert_eq!(
        trim_prom_suffixes(&name, MetricKind::MonotonicSum, "bytes_per_second"),
        "disk_io"
    );
}

fn name_tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 1..5)
}

proptest! {
    #[test]
    fn prop_simple_sanitize_is_idempotent(name in "[a-zA-Z][a-zA-Z0-9:_.\\- /é]{0,30}") {
        let once = build_compliant_name(
            &MetricDescriptor::new(name, "", MetricKind::Gauge),
            "",
            false,
            false,
        );
        let twice = build_compliant_name(
            &MetricDescriptor::new(once.clone(), "", MetricKind::Gauge),
            "",
            false,
            false,
        );
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_counter_round_trip(
        tokens in name_tokens(),
        unit in prop::sample::select(TABLE_UNITS),
    ) {
        let translated = unit_suffix(unit, false);
        prop_assume!(tokens.iter().all(|t| {
            t != "total" && !translated.split('_').any(|u| u == t)
        }));

        let name = tokens.join("_");
        let normalized = normalize(&name, unit, MetricKind::MonotonicSum);
        prop_assert_eq!(
            trim_prom_suffixes(&normalized, MetricKind::MonotonicSum, &translated),
            name
        );
    }

    #[test]
    fn prop_total_appended_exactly_once(
        tokens in prop::collection::vec(
            prop_oneof!["[a-m]{1,6}", Just("total".to_string())],
            1..8,
        ),
    ) {
        let normalized = normalize(&tokens.join("."), "", MetricKind::MonotonicSum);
        prop_assert!(normalized.ends_with("total"));
        prop_assert_eq!(normalized.matches("total").count(), 1);
    }

    #[test]
    fn prop_leading_digit_guard_applied_once(
        name in "[0-9][a-z0-9._]{0,12}",
        add_metric_suffixes in any::<bool>(),
    ) {
        let built = build_compliant_name(
            &MetricDescriptor::new(name, "", MetricKind::Gauge),
            "",
            add_metric_suffixes,
            false,
        );
        prop_assert!(built.starts_with('_'));
        prop_assert!(!built.starts_with("__"));
        prop_assert!(built[1..].starts_with(|c: char| c.is_ascii_digit()));
    }

    #[test]
    fn prop_ratio_only_for_gauges(name in "[a-z]{1,10}") {
        prop_assume!(!name.contains("ratio"));
        prop_assert!(normalize(&name, "1", MetricKind::Gauge).ends_with("_ratio"));
        for kind in [
            MetricKind::MonotonicSum,
            MetricKind::NonMonotonicSum,
            MetricKind::Histogram,
            MetricKind::Summary,
        ] {
            prop_assert!(!normalize(&name, "1", kind).contains("ratio"));
        }
    }
}
