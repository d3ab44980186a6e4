//! OTel ↔ Prometheus metric name translation
//!
//! ## OTel → Prometheus
//!
//! [`build_compliant_name`] turns an OTel metric name, unit and kind into a
//! Prometheus metric name. Without suffixes only characters are sanitized;
//! with suffixes the name is fully normalized (unit words, `_total`,
//! `_ratio`). Names can be restricted to legacy ASCII characters or keep
//! UTF-8 characters and their original punctuation.
//!
//! ## Prometheus → OTel
//!
//! [`trim_prom_suffixes`] strips the `_total` and unit suffixes again. It
//! takes the unit in Prometheus form; [`unit_suffix`] produces that form from
//! an OTel unit.
//!
//! All functions are pure. The unit tables are built once and only read.

mod normalize_name;
mod tokens;
mod trim;
mod types;
mod units;

pub use normalize_name::{MetricNamer, build_compliant_name, build_compliant_name_for_metric};
pub use tokens::{CharacterRegime, NameTokens};
pub use trim::trim_prom_suffixes;
pub use types::{MetricDescriptor, MetricKind, TranslatorError};
pub use units::{clean_up_unit, per_unit_word, sanitize_label_name, unit_suffix, unit_word};
