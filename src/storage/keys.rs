/// Prefix every key owned by this service lives under.
pub const KEY_PREFIX: &str = "/pcs/";

/// Segment holding power status records.
pub const SEGMENT_POWER_STATE: &str = "/powerstate";

/// Segment used by liveness probes.
pub const SEGMENT_PING: &str = "/ping";

/// Range sentinels: lowest and highest printable ASCII characters.
pub const KEY_MIN: &str = " ";
pub const KEY_MAX: &str = "~";

/// Place `key` under [`KEY_PREFIX`].
///
/// Keys already carrying the prefix pass through; otherwise one leading `/`
/// is dropped so the prefix's trailing separator is not doubled.
pub fn namespaced_key(key: &str) -> String {
    if key.starts_with(KEY_PREFIX) {
        return key.to_string();
    }
    let rest = key.strip_prefix('/').unwrap_or(key);
    format!("{}{}", KEY_PREFIX, rest)
}

/// `<segment>/<name>`, the logical (not yet namespaced) key of a record.
pub fn segment_key(segment: &str, name: &str) -> String {
    format!("{}/{}", segment, name)
}

/// Half-open range `[prefix + KEY_MIN, prefix + KEY_MAX)` covering every key
/// under `segment`.
pub fn segment_range(segment: &str) -> (String, String) {
    let base = namespaced_key(segment);
    (format!("{}{}", base, KEY_MIN), format!("{}{}", base, KEY_MAX))
}
