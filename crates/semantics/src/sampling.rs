//! Shared helpers for evaluating a held-interpolated labels attribute over
//! an interval.

use stagegraph_core::{Attribute, Interval, TimeCode, Token};
use std::collections::HashSet;
use tracing::error;

/// Times at which `attr` must be sampled to cover `interval`: every
/// authored sample inside it, plus the interval's finite minimum (or the
/// earliest representable time when the minimum is unbounded). The extra
/// time picks up the value already holding as the interval begins, and
/// resolves to the default or first sample when nothing is authored inside
/// the interval.
pub(crate) fn interval_sample_times(attr: &Attribute, interval: &Interval) -> Vec<f64> {
    let mut times = attr.time_samples_in_interval(interval);
    let earliest = if interval.is_min_finite() {
        interval.min()
    } else {
        TimeCode::EARLIEST
            .value()
            .expect("EARLIEST is a numeric time")
    };
    if times.first() != Some(&earliest) {
        times.push(earliest);
    }
    times
}

/// The union of `attr`'s values across `times`. `None` when any read fails,
/// which is reported and treated as unlabeled by callers.
pub(crate) fn union_over_times(attr: &Attribute, times: &[f64]) -> Option<HashSet<Token>> {
    let mut labels = HashSet::new();
    for &t in times {
        match attr.get(TimeCode::from(t)) {
            Some(value) => labels.extend(value),
            None => {
                error!(
                    attribute = %attr.name(),
                    path = %attr.prim_path(),
                    time = t,
                    "labels attribute has no resolvable value"
                );
                return None;
            }
        }
    }
    Some(labels)
}

/// Deterministic output order for label sets.
pub(crate) fn sorted(labels: HashSet<Token>) -> Vec<Token> {
    let mut result: Vec<Token> = labels.into_iter().collect();
    result.sort();
    result
}
