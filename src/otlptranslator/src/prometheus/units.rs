//! OTel (UCUM) unit to Prometheus unit word resolution
//!
//! OTel units follow the c/s notation of <https://ucum.org/ucum.html>.
//! Prometheus prefers spelled-out base units as a name suffix, see
//! <https://prometheus.io/docs/practices/naming/#base-units>.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::tokens::{CharacterRegime, NameTokens};

/// Main unit abbreviations and their Prometheus unit words
static UNIT_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Time
        ("d", "days"),
        ("h", "hours"),
        ("min", "minutes"),
        ("s", "seconds"),
        ("ms", "milliseconds"),
        ("us", "microseconds"),
        ("ns", "nanoseconds"),
        // Bytes
        ("By", "bytes"),
        ("KiBy", "kibibytes"),
        ("MiBy", "mebibytes"),
        ("GiBy", "gibibytes"),
        ("TiBy", "tibibytes"),
        ("KBy", "kilobytes"),
        ("MBy", "megabytes"),
        ("GBy", "gigabytes"),
        ("TBy", "terabytes"),
        // SI
        ("m", "meters"),
        ("V", "volts"),
        ("A", "amperes"),
        ("J", "joules"),
        ("W", "watts"),
        ("g", "grams"),
        // Misc
        ("Cel", "celsius"),
        ("Hz", "hertz"),
        ("1", ""),
        ("%", "percent"),
    ])
});

/// "Per" unit abbreviations and their singular words, `s` => per second
static PER_UNIT_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("s", "second"),
        ("m", "minute"),
        ("h", "hour"),
        ("d", "day"),
        ("w", "week"),
        ("mo", "month"),
        ("y", "year"),
    ])
});

/// Prometheus word for a main unit, or the unit itself when unmapped
pub fn unit_word(unit: &str) -> &str {
    match UNIT_MAP.get(unit) {
        Some(word) => word,
        None => {
            tracing::trace!(unit, "No Prometheus word for unit, passing it through");
            unit
        }
    }
}

/// Singular word for a per unit, or the unit itself when unmapped
pub fn per_unit_word(per_unit: &str) -> &str {
    match PER_UNIT_MAP.get(per_unit) {
        Some(word) => word,
        None => {
            tracing::trace!(per_unit, "No Prometheus word for per unit, passing it through");
            per_unit
        }
    }
}

/// Replace every character outside `[a-zA-Z0-9_]` with `_`
pub fn sanitize_label_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Clean a unit word so it is a legal label name: sanitize, collapse runs of
/// underscores into one, then strip a single leading underscore.
pub fn clean_up_unit(unit: &str) -> String {
    let sanitized = sanitize_label_name(unit);

    let mut collapsed = String::with_capacity(sanitized.len());
    let mut last_was_underscore = false;
    for c in sanitized.chars() {
        if c == '_' {
            if !last_was_underscore {
                collapsed.push(c);
            }
            last_was_underscore = true;
        } else {
            collapsed.push(c);
            last_was_underscore = false;
        }
    }

    match collapsed.strip_prefix('_') {
        Some(stripped) => stripped.to_string(),
        None => collapsed,
    }
}

/// Unit tokens resolved for one metric
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResolvedUnit {
    /// e.g. `seconds`; empty when absent or already part of the name
    pub main: String,
    /// e.g. `per_second`; empty when absent or already part of the name
    pub per: String,
}

impl ResolvedUnit {
    /// Resolve `unit` against the tokens already present in the metric name.
    ///
    /// Annotations such as `{packet}` are not translated, and a token that is
    /// already in `name` is suppressed so it is not appended twice.
    pub(crate) fn resolve(unit: &str, name: &NameTokens, regime: CharacterRegime) -> Self {
        let (main_unit, per_unit) = match unit.split_once('/') {
            Some((main, per)) => (main, Some(per)),
            None => (unit, None),
        };

        let mut main = String::new();
        let main_unit = main_unit.trim();
        if is_translatable(main_unit) {
            main = clean_for_regime(unit_word(main_unit), regime);
            if name.contains(&main) {
                tracing::trace!(unit = %main, "Unit already present in metric name");
                main.clear();
            }
        }

        let mut per = String::new();
        if let Some(per_unit) = per_unit.map(str::trim) {
            // A dimensionless divisor ("s/1") adds nothing to the name
            if is_translatable(per_unit) && per_unit != "1" {
                let word = clean_for_regime(per_unit_word(per_unit), regime);
                if !word.is_empty() {
                    per = format!("per_{word}");
                }
            }
            if name.contains(&per) {
                tracing::trace!(unit = %per, "Per unit already present in metric name");
                per.clear();
            }
        }

        if !per.is_empty() {
            if let Some(stripped) = main.strip_suffix('_') {
                main = stripped.to_string();
            }
        }

        Self { main, per }
    }

    /// Append the resolved tokens, main unit first
    pub(crate) fn append_to(self, mut name: NameTokens) -> NameTokens {
        if !self.main.is_empty() {
            name = name.with_token(self.main);
        }
        if !self.per.is_empty() {
            name = name.with_token(self.per);
        }
        name
    }
}

fn is_translatable(unit: &str) -> bool {
    !unit.is_empty() && !unit.contains(['{', '}'])
}

fn clean_for_regime(word: &str, regime: CharacterRegime) -> String {
    match regime {
        CharacterRegime::Ascii => clean_up_unit(word),
        CharacterRegime::Utf8 => word.to_string(),
    }
}

/// The Prometheus unit suffix an OTel unit translates to, e.g. `By/s` =>
/// `bytes_per_second`.
///
/// [`trim_prom_suffixes`](super::trim_prom_suffixes) matches suffixes
/// literally and expects a unit in this translated form, not the OTel unit
/// the metric was declared with.
pub fn unit_suffix(unit: &str, allow_utf8: bool) -> String {
    let regime = CharacterRegime::new(allow_utf8);
    ResolvedUnit::resolve(unit, &NameTokens::default(), regime)
        .append_to(NameTokens::default())
        .join("_")
}
