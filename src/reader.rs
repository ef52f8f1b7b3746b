use crate::config::{Config, SourcePrecedence};
use crate::models::{PanelDoc, PanelGroup, Period, SourceKind, BUCKET_COUNT, PERIOD_COUNT};
use crate::storage::{load_panel, load_store, store_payload};
use serde_json::Value;
use tracing::debug;

/// Coerce displayed control text to a count. Total: anything that is not a
/// number becomes 0, including empty and missing text.
pub fn parse_count(text: &str) -> i64 {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return value;
    }
    text.parse::<f64>().map(|value| value as i64).unwrap_or(0)
}

fn coerce_entry(value: &Value) -> i64 {
    match value {
        Value::Number(num) => num
            .as_i64()
            .or_else(|| num.as_f64().map(|v| v as i64))
            .unwrap_or(0),
        Value::String(text) => parse_count(text),
        _ => 0,
    }
}

fn period_from_array(entries: &[Value]) -> Period {
    let mut period = Period::default();
    if entries.len() < BUCKET_COUNT {
        return period;
    }
    for (b, entry) in entries.iter().take(BUCKET_COUNT).enumerate() {
        period.scored[b] = coerce_entry(entry);
    }
    if entries.len() >= BUCKET_COUNT * 2 {
        for (b, entry) in entries.iter().skip(BUCKET_COUNT).take(BUCKET_COUNT).enumerate() {
            period.conceded[b] = coerce_entry(entry);
        }
    }
    period
}

fn period_from_value(value: &Value) -> Period {
    match value {
        Value::Array(entries) => period_from_array(entries),
        Value::Object(map) => {
            // Numeric-string keys "0".."7": first four scored, rest conceded.
            let mut period = Period::default();
            for b in 0..BUCKET_COUNT {
                if let Some(entry) = map.get(&b.to_string()) {
                    period.scored[b] = coerce_entry(entry);
                }
                if let Some(entry) = map.get(&(b + BUCKET_COUNT).to_string()) {
                    period.conceded[b] = coerce_entry(entry);
                }
            }
            period
        }
        _ => Period::default(),
    }
}

/// Parse the raw store payload into 3 periods. Returns `None` when the
/// payload is not valid JSON or not an object at top level, so the caller
/// can fall back to the other source instead of reading all zeros.
pub fn parse_store_payload(raw: &str) -> Option<[Period; PERIOD_COUNT]> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let map = value.as_object()?;

    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    let mut periods = [Period::default(); PERIOD_COUNT];
    for (p, key) in keys.iter().take(PERIOD_COUNT).enumerate() {
        periods[p] = period_from_value(&map[key.as_str()]);
    }
    Some(periods)
}

fn period_from_group(group: &PanelGroup) -> Period {
    if group.rows.len() >= 2 && group.rows[0].len() >= BUCKET_COUNT && group.rows[1].len() >= BUCKET_COUNT {
        let mut period = Period::default();
        for b in 0..BUCKET_COUNT {
            period.scored[b] = parse_count(&group.rows[0][b]);
            period.conceded[b] = parse_count(&group.rows[1][b]);
        }
        return period;
    }

    // Row structure missing or short: fall back to a flat control list.
    let flat: Vec<&String> = if group.controls.is_empty() {
        group.rows.iter().flatten().collect()
    } else {
        group.controls.iter().collect()
    };

    let mut period = Period::default();
    if flat.len() < BUCKET_COUNT {
        return period;
    }
    for b in 0..BUCKET_COUNT {
        period.scored[b] = parse_count(flat[b]);
    }
    if flat.len() >= BUCKET_COUNT * 2 {
        for b in 0..BUCKET_COUNT {
            period.conceded[b] = parse_count(flat[b + BUCKET_COUNT]);
        }
    }
    period
}

/// Read 3 periods out of the structured panel document. Missing groups are
/// zero-filled; this source never signals "malformed" past the document load.
pub fn periods_from_panel(doc: &PanelDoc) -> [Period; PERIOD_COUNT] {
    let mut periods = [Period::default(); PERIOD_COUNT];
    for (p, group) in doc.groups.iter().take(PERIOD_COUNT).enumerate() {
        periods[p] = period_from_group(group);
    }
    periods
}

fn has_signal(periods: &[Period; PERIOD_COUNT]) -> bool {
    periods.iter().any(|period| !period.is_zero())
}

/// Pick between the two candidate sources. A source with at least one
/// non-zero value wins in precedence order; failing that, a structurally
/// present source beats an absent one, in the same order.
pub fn resolve(
    precedence: SourcePrecedence,
    store: Option<[Period; PERIOD_COUNT]>,
    panel: Option<[Period; PERIOD_COUNT]>,
) -> ([Period; PERIOD_COUNT], SourceKind) {
    let (first, first_kind, second, second_kind) = match precedence {
        SourcePrecedence::StoreFirst => (store, SourceKind::Store, panel, SourceKind::Panel),
        SourcePrecedence::PanelFirst => (panel, SourceKind::Panel, store, SourceKind::Store),
    };

    if let Some(periods) = first {
        if has_signal(&periods) {
            return (periods, first_kind);
        }
    }
    if let Some(periods) = second {
        if has_signal(&periods) {
            return (periods, second_kind);
        }
    }
    if let Some(periods) = first {
        return (periods, first_kind);
    }
    if let Some(periods) = second {
        return (periods, second_kind);
    }
    ([Period::default(); PERIOD_COUNT], SourceKind::None)
}

/// Full read: load both sources fresh and resolve them. Never fails; every
/// anticipated problem collapses into zero-filled periods.
pub async fn read_periods(config: &Config) -> ([Period; PERIOD_COUNT], SourceKind) {
    let store = load_store(&config.store_path).await;
    let store_periods = store
        .as_ref()
        .and_then(|store| store_payload(store))
        .and_then(parse_store_payload);

    let panel_periods = load_panel(&config.panel_path).await.map(|doc| periods_from_panel(&doc));

    let (periods, kind) = resolve(config.precedence, store_periods, panel_periods);
    debug!(?kind, "resolved momentum periods");
    (periods, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> [Period; PERIOD_COUNT] {
        parse_store_payload(raw).expect("payload should parse")
    }

    #[test]
    fn store_payload_full_arrays() {
        let periods = parse(
            r#"{"p1":[1,0,0,2,0,0,1,0],"p2":[0,0,0,0,0,0,0,0],"p3":[3,0,0,0,1,0,0,0]}"#,
        );
        assert_eq!(periods[0].scored, [1, 0, 0, 2]);
        assert_eq!(periods[0].conceded, [0, 0, 1, 0]);
        assert!(periods[1].is_zero());
        assert_eq!(periods[2].scored, [3, 0, 0, 0]);
        assert_eq!(periods[2].conceded, [1, 0, 0, 0]);
    }

    #[test]
    fn store_payload_keys_sorted_lexicographically() {
        let periods = parse(r#"{"c":[3,0,0,0],"a":[1,0,0,0],"b":[2,0,0,0]}"#);
        assert_eq!(periods[0].scored[0], 1);
        assert_eq!(periods[1].scored[0], 2);
        assert_eq!(periods[2].scored[0], 3);
    }

    #[test]
    fn store_payload_short_array_is_scored_only() {
        let periods = parse(r#"{"p1":[1,2,3,4,5]}"#);
        assert_eq!(periods[0].scored, [1, 2, 3, 4]);
        assert_eq!(periods[0].conceded, [0, 0, 0, 0]);
    }

    #[test]
    fn store_payload_tiny_array_is_zero() {
        let periods = parse(r#"{"p1":[7,7,7]}"#);
        assert!(periods[0].is_zero());
    }

    #[test]
    fn store_payload_nested_mapping() {
        let periods = parse(r#"{"p1":{"0":2,"3":1,"4":1,"7":"5"}}"#);
        assert_eq!(periods[0].scored, [2, 0, 0, 1]);
        assert_eq!(periods[0].conceded, [1, 0, 0, 5]);
    }

    #[test]
    fn store_payload_garbage_values_zeroed() {
        let periods = parse(r#"{"p1":[true,"x",null,{},1,2,3,4],"p2":"nope"}"#);
        assert_eq!(periods[0].scored, [0, 0, 0, 0]);
        assert_eq!(periods[0].conceded, [1, 2, 3, 4]);
        assert!(periods[1].is_zero());
    }

    #[test]
    fn store_payload_malformed_is_none() {
        assert!(parse_store_payload("not json").is_none());
        assert!(parse_store_payload("[1,2,3]").is_none());
        assert!(parse_store_payload("42").is_none());
    }

    fn group(rows: &[&[&str]], controls: &[&str]) -> PanelGroup {
        PanelGroup {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
            controls: controls.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn panel_two_rows() {
        let doc = PanelDoc {
            groups: vec![group(&[&["1", "0", "0", "0"], &["0", "0", "0", "2"]], &[])],
        };
        let periods = periods_from_panel(&doc);
        assert_eq!(periods[0].scored, [1, 0, 0, 0]);
        assert_eq!(periods[0].conceded, [0, 0, 0, 2]);
        assert!(periods[1].is_zero());
        assert!(periods[2].is_zero());
    }

    #[test]
    fn panel_flat_controls() {
        let doc = PanelDoc {
            groups: vec![
                group(&[], &["1", "2", "3", "4", "5", "6", "7", "8"]),
                group(&[], &["9", "8", "7", "6", "5"]),
                group(&[], &["1", "2"]),
            ],
        };
        let periods = periods_from_panel(&doc);
        assert_eq!(periods[0].scored, [1, 2, 3, 4]);
        assert_eq!(periods[0].conceded, [5, 6, 7, 8]);
        assert_eq!(periods[1].scored, [9, 8, 7, 6]);
        assert_eq!(periods[1].conceded, [0, 0, 0, 0]);
        assert!(periods[2].is_zero());
    }

    #[test]
    fn panel_short_rows_flatten() {
        let doc = PanelDoc {
            groups: vec![group(&[&["1", "2"], &["3", "4", "5", "6"]], &[])],
        };
        let periods = periods_from_panel(&doc);
        // Rows too short for the 4+4 shape, so they read as a flat list.
        assert_eq!(periods[0].scored, [1, 2, 3, 4]);
        assert_eq!(periods[0].conceded, [0, 0, 0, 0]);
    }

    #[test]
    fn panel_text_coercion_defaults_to_zero() {
        let doc = PanelDoc {
            groups: vec![group(&[&[" 2 ", "", "abc", "3.9"], &["1", "1", "1", "1"]], &[])],
        };
        let periods = periods_from_panel(&doc);
        assert_eq!(periods[0].scored, [2, 0, 0, 3]);
        assert_eq!(periods[0].conceded, [1, 1, 1, 1]);
    }

    fn nonzero() -> [Period; PERIOD_COUNT] {
        let mut periods = [Period::default(); PERIOD_COUNT];
        periods[0].scored[0] = 1;
        periods
    }

    #[test]
    fn resolve_prefers_nonzero_in_order() {
        let zeros = [Period::default(); PERIOD_COUNT];

        let (_, kind) = resolve(SourcePrecedence::StoreFirst, Some(nonzero()), Some(nonzero()));
        assert_eq!(kind, SourceKind::Store);

        let (_, kind) = resolve(SourcePrecedence::PanelFirst, Some(nonzero()), Some(nonzero()));
        assert_eq!(kind, SourceKind::Panel);

        let (periods, kind) = resolve(SourcePrecedence::StoreFirst, Some(zeros), Some(nonzero()));
        assert_eq!(kind, SourceKind::Panel);
        assert_eq!(periods[0].scored[0], 1);
    }

    #[test]
    fn resolve_all_zero_prefers_present_source() {
        let zeros = [Period::default(); PERIOD_COUNT];

        let (_, kind) = resolve(SourcePrecedence::StoreFirst, Some(zeros), None);
        assert_eq!(kind, SourceKind::Store);

        let (_, kind) = resolve(SourcePrecedence::StoreFirst, None, Some(zeros));
        assert_eq!(kind, SourceKind::Panel);

        let (periods, kind) = resolve(SourcePrecedence::StoreFirst, None, None);
        assert_eq!(kind, SourceKind::None);
        assert!(periods.iter().all(Period::is_zero));
    }
}
