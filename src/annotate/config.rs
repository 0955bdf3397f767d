use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::KindStr;
use crate::with_field_fn;

/// Tunable constants of an annotation run.
///
/// Defaults reproduce the established heuristics: 15% wiggle trim on each
/// end, fragments below 95% subject coverage, a 1.1× edge for direct
/// nucleotide hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateConfig {
    /// Query is a linear molecule; circular queries are searched doubled.
    pub linear:             bool,
    /// Assign kinds from each database's details instead of one shared
    /// default kind.
    pub detailed:           bool,
    /// Rows with an e-value at or above this are discarded.
    pub max_evalue:         f64,
    pub wiggle_fraction:    f64,
    pub fragment_threshold: f64,
    /// Multiplier for hits with `pi_permatch == 100`.
    pub identity_bonus:     f64,
    pub nucleotide_bonus:   f64,
    /// Resolved features at or below this `pi_permatch` are not reported.
    pub min_pi_permatch:    f64,
    pub default_kind:       KindStr,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            linear:             false,
            detailed:           false,
            max_evalue:         1.0,
            wiggle_fraction:    0.15,
            fragment_threshold: 95.0,
            identity_bonus:     1.0,
            nucleotide_bonus:   1.1,
            min_pi_permatch:    3.0,
            default_kind:       KindStr::from("misc_feature"),
        }
    }
}

impl AnnotateConfig {
    with_field_fn!(linear, bool);

    with_field_fn!(detailed, bool);

    with_field_fn!(max_evalue, f64);

    with_field_fn!(wiggle_fraction, f64);

    with_field_fn!(fragment_threshold, f64);

    with_field_fn!(identity_bonus, f64);

    with_field_fn!(nucleotide_bonus, f64);

    with_field_fn!(min_pi_permatch, f64);

    with_field_fn!(default_kind, KindStr);
}
