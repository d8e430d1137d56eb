use chrono::{DateTime, Utc};
use thiserror::Error;

/// A CPU quantity string that is neither millicores nor whole cores.
/// Unlike sizes, CPU parsing is strict: callers decide whether to abort.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid cpu quantity {quantity:?}")]
pub struct InvalidCpuQuantity {
    quantity: String,
}

pub fn parse_size_to_gb(q: &str) -> f64 {
    let q = q.trim();

    // Suffix match is case-sensitive and exactly two characters.
    const UNITS: &[(&str, f64)] = &[("Ti", 1024.0), ("Gi", 1.0), ("Mi", 1.0 / 1024.0)];

    for (suffix, mult) in UNITS {
        if let Some(stripped) = q.strip_suffix(suffix) {
            return match stripped.parse::<f64>() {
                // negative and NaN prefixes degrade like any other bad input
                Ok(v) if v >= 0.0 => v * mult,
                _ => 0.0,
            };
        }
    }
    0.0
}

pub fn parse_cpu_to_cores(q: &str) -> Result<f64, InvalidCpuQuantity> {
    let q = q.trim();
    let parsed = match q.strip_suffix('m') {
        Some(millicores) => millicores.parse::<f64>().map(|v| v / 1000.0),
        // no suffix: already whole cores
        None => q.parse::<f64>(),
    };
    parsed.map_err(|_| InvalidCpuQuantity {
        quantity: q.to_string(),
    })
}

pub fn age_in_days(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    match created_at {
        // num_days truncates toward zero; clamp handles clock skew into the future
        Some(ts) => (now - ts).num_days().max(0),
        None => 0,
    }
}
