//! Visualization configuration and result-row aggregation.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API layer and any future worker tooling.
//!
//! A [`VisualizationConfig`] describes how a widget renders a query's
//! result rows: which chart to draw, which columns feed the axes, and how
//! grouped values are reduced. [`aggregate_rows`] performs the group/reduce
//! step the chart renderer consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Chart kinds and aggregations
// ---------------------------------------------------------------------------

/// The chart primitives a widget can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Area,
    Table,
}

impl ChartKind {
    /// Lowercase label used in default widget titles and wire payloads.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Area => "area",
            ChartKind::Table => "table",
        }
    }

    /// Whether the aggregation selector applies to this chart kind.
    ///
    /// Only grouped charts (bar, pie) expose an aggregation choice; line
    /// and area plot the series as-is, and tables show raw rows.
    pub fn supports_aggregation(self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Pie)
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How grouped y-axis values are reduced to a single number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

// ---------------------------------------------------------------------------
// VisualizationConfig
// ---------------------------------------------------------------------------

/// Axis and aggregation selection for rendering a result set.
///
/// For `table` charts the axis/aggregation fields are stored but ignored at
/// render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationConfig {
    pub chart_kind: ChartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
    #[serde(default)]
    pub aggregation: Aggregation,
}

impl VisualizationConfig {
    /// A config with the given chart kind and no axis mapping.
    pub fn new(chart_kind: ChartKind) -> Self {
        Self {
            chart_kind,
            x_axis: None,
            y_axis: None,
            aggregation: Aggregation::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result rows and numeric coercion
// ---------------------------------------------------------------------------

/// One result row: a mapping from column name to a JSON scalar.
pub type ResultRow = serde_json::Map<String, Value>;

/// Coerce a result cell to a finite number, if possible.
///
/// Coercion succeeds for finite JSON numbers, booleans (`true` -> 1,
/// `false` -> 0), and strings whose trimmed text parses as a finite float.
/// `null`, arrays, objects, and unparseable or empty strings yield `None`.
pub fn coerce_numeric(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Render a cell as a group key the way the chart groups rows.
///
/// Strings group by their text; every other scalar groups by its JSON
/// rendering (`1`, `1.5`, `true`, `null`).
fn group_key(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Enumerate axis options from a result set.
///
/// Returns `(x_options, y_options)`: all column names present in the first
/// row, and the subset whose first-row value coerces to a number. An empty
/// result set yields two empty lists, which disables axis selection.
pub fn column_options(rows: &[ResultRow]) -> (Vec<String>, Vec<String>) {
    let Some(first) = rows.first() else {
        return (Vec::new(), Vec::new());
    };

    let x_options: Vec<String> = first.keys().cloned().collect();
    let y_options: Vec<String> = first
        .iter()
        .filter(|(_, v)| coerce_numeric(v).is_some())
        .map(|(k, _)| k.clone())
        .collect();

    (x_options, y_options)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Reduce a group's collected values per the aggregation.
///
/// Fold identities are deliberate and pinned by tests: an empty group (all
/// cells failed coercion) reduces to `0` for sum and count, `NaN` for avg,
/// and `+inf` / `-inf` for min / max.
pub fn reduce(values: &[f64], aggregation: Aggregation) -> f64 {
    match aggregation {
        Aggregation::Sum => values.iter().sum(),
        Aggregation::Avg => values.iter().sum::<f64>() / values.len() as f64,
        Aggregation::Count => values.len() as f64,
        Aggregation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Group rows by the x-axis column and reduce the y-axis values.
///
/// Behaviour:
/// 1. If either axis is unset, or the row set is empty, rows pass through
///    unmodified.
/// 2. Rows group by the x-axis cell's key in first-seen order.
/// 3. Y-axis cells that fail [`coerce_numeric`] are silently dropped.
/// 4. Each group reduces per the configured [`Aggregation`].
/// 5. Output is one `{x_axis: key, y_axis: value}` row per group, in
///    first-seen group order. Non-finite reductions serialize as `null`
///    because JSON cannot represent them.
pub fn aggregate_rows(rows: &[ResultRow], config: &VisualizationConfig) -> Vec<ResultRow> {
    let (Some(x_axis), Some(y_axis)) = (config.x_axis.as_deref(), config.y_axis.as_deref()) else {
        return rows.to_vec();
    };
    if rows.is_empty() {
        return Vec::new();
    }

    // First-seen group order, looked up by key.
    let mut order: Vec<String> = Vec::new();
    let mut groups: std::collections::HashMap<String, Vec<f64>> = std::collections::HashMap::new();

    for row in rows {
        let key = group_key(row.get(x_axis).unwrap_or(&Value::Null));
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        let values = groups.entry(key).or_default();
        if let Some(v) = row.get(y_axis).and_then(coerce_numeric) {
            values.push(v);
        }
    }

    order
        .into_iter()
        .map(|key| {
            let reduced = reduce(&groups[&key], config.aggregation);
            let mut out = ResultRow::new();
            out.insert(x_axis.to_string(), Value::String(key));
            out.insert(
                y_axis.to_string(),
                serde_json::Number::from_f64(reduced)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            );
            out
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(v: Value) -> Vec<ResultRow> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().unwrap().clone())
            .collect()
    }

    fn config(agg: Aggregation) -> VisualizationConfig {
        VisualizationConfig {
            chart_kind: ChartKind::Bar,
            x_axis: Some("cat".into()),
            y_axis: Some("v".into()),
            aggregation: agg,
        }
    }

    fn sample() -> Vec<ResultRow> {
        rows(json!([
            {"cat": "a", "v": 1},
            {"cat": "a", "v": 3},
            {"cat": "b", "v": 2},
        ]))
    }

    // -- Numeric coercion ---------------------------------------------------

    #[test]
    fn numbers_and_numeric_strings_coerce() {
        assert_eq!(coerce_numeric(&json!(2)), Some(2.0));
        assert_eq!(coerce_numeric(&json!(2.5)), Some(2.5));
        assert_eq!(coerce_numeric(&json!("3.25")), Some(3.25));
        assert_eq!(coerce_numeric(&json!(" 7 ")), Some(7.0));
    }

    #[test]
    fn booleans_coerce_to_zero_one() {
        assert_eq!(coerce_numeric(&json!(true)), Some(1.0));
        assert_eq!(coerce_numeric(&json!(false)), Some(0.0));
    }

    #[test]
    fn null_and_non_numeric_strings_do_not_coerce() {
        assert_eq!(coerce_numeric(&Value::Null), None);
        assert_eq!(coerce_numeric(&json!("abc")), None);
        assert_eq!(coerce_numeric(&json!("")), None);
        assert_eq!(coerce_numeric(&json!({"nested": 1})), None);
        assert_eq!(coerce_numeric(&json!([1])), None);
    }

    // -- Column enumeration -------------------------------------------------

    #[test]
    fn column_options_from_first_row() {
        let data = rows(json!([
            {"block_number": 1000, "label": "genesis", "ok": true},
        ]));
        let (x, y) = column_options(&data);
        assert_eq!(x.len(), 3);
        assert!(x.contains(&"block_number".to_string()));
        assert!(x.contains(&"label".to_string()));
        // Numeric-coercible columns only: block_number and the boolean.
        assert!(y.contains(&"block_number".to_string()));
        assert!(y.contains(&"ok".to_string()));
        assert!(!y.contains(&"label".to_string()));
    }

    #[test]
    fn no_rows_disables_axis_selection() {
        let (x, y) = column_options(&[]);
        assert!(x.is_empty());
        assert!(y.is_empty());
    }

    // -- Aggregation --------------------------------------------------------

    #[test]
    fn sum_groups_in_first_seen_order() {
        let out = aggregate_rows(&sample(), &config(Aggregation::Sum));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["cat"], json!("a"));
        assert_eq!(out[0]["v"], json!(4.0));
        assert_eq!(out[1]["cat"], json!("b"));
        assert_eq!(out[1]["v"], json!(2.0));
    }

    #[test]
    fn count_counts_coerced_values() {
        let out = aggregate_rows(&sample(), &config(Aggregation::Count));
        assert_eq!(out[0]["v"], json!(2.0));
        assert_eq!(out[1]["v"], json!(1.0));
    }

    #[test]
    fn max_takes_group_maximum() {
        let out = aggregate_rows(&sample(), &config(Aggregation::Max));
        assert_eq!(out[0]["v"], json!(3.0));
        assert_eq!(out[1]["v"], json!(2.0));
    }

    #[test]
    fn avg_divides_by_group_size() {
        let out = aggregate_rows(&sample(), &config(Aggregation::Avg));
        assert_eq!(out[0]["v"], json!(2.0));
        assert_eq!(out[1]["v"], json!(2.0));
    }

    #[test]
    fn empty_rows_yield_empty_output() {
        let out = aggregate_rows(&[], &config(Aggregation::Sum));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_axes_pass_rows_through() {
        let data = sample();
        let cfg = VisualizationConfig::new(ChartKind::Bar);
        assert_eq!(aggregate_rows(&data, &cfg), data);
    }

    #[test]
    fn unparseable_values_are_dropped_not_fatal() {
        let data = rows(json!([
            {"cat": "a", "v": "oops"},
            {"cat": "a", "v": 5},
        ]));
        let out = aggregate_rows(&data, &config(Aggregation::Sum));
        assert_eq!(out[0]["v"], json!(5.0));

        let out = aggregate_rows(&data, &config(Aggregation::Count));
        assert_eq!(out[0]["v"], json!(1.0));
    }

    #[test]
    fn aggregation_is_idempotent_for_sum() {
        // Aggregating an already single-row-per-group result again must not
        // change it (avg is only idempotent when group sizes are preserved).
        let once = aggregate_rows(&sample(), &config(Aggregation::Sum));
        let twice = aggregate_rows(&once, &config(Aggregation::Sum));
        assert_eq!(once, twice);
    }

    // -- Empty-group fold identities ----------------------------------------
    //
    // A group can end up empty when every cell fails coercion. These are the
    // reference fold identities; do not "fix" them without updating the
    // documented policy.

    #[test]
    fn reduce_of_empty_group() {
        assert_eq!(reduce(&[], Aggregation::Sum), 0.0);
        assert_eq!(reduce(&[], Aggregation::Count), 0.0);
        assert!(reduce(&[], Aggregation::Avg).is_nan());
        assert_eq!(reduce(&[], Aggregation::Min), f64::INFINITY);
        assert_eq!(reduce(&[], Aggregation::Max), f64::NEG_INFINITY);
    }

    #[test]
    fn non_finite_reductions_serialize_as_null() {
        let data = rows(json!([{"cat": "a", "v": "not-a-number"}]));
        let out = aggregate_rows(&data, &config(Aggregation::Min));
        assert_eq!(out[0]["v"], Value::Null);
    }

    // -- Config serialization -----------------------------------------------

    #[test]
    fn config_round_trips_with_lowercase_tags() {
        let cfg = VisualizationConfig {
            chart_kind: ChartKind::Pie,
            x_axis: Some("cat".into()),
            y_axis: Some("v".into()),
            aggregation: Aggregation::Max,
        };
        let encoded = serde_json::to_value(&cfg).unwrap();
        assert_eq!(encoded["chart_kind"], json!("pie"));
        assert_eq!(encoded["aggregation"], json!("max"));

        let decoded: VisualizationConfig = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, cfg);
    }

    #[test]
    fn aggregation_defaults_to_sum() {
        let decoded: VisualizationConfig =
            serde_json::from_value(json!({"chart_kind": "bar"})).unwrap();
        assert_eq!(decoded.aggregation, Aggregation::Sum);
    }
}
