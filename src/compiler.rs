//! Compilation of a monitor into one aggregate SQL query, and the inverse
//! decoding of that query's flat rows back into per-metric time series.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::drivers::ResultSet;
use crate::error::{Result, ScopeError};
use crate::metrics::{alias, Metric, MetricDataPoint, MetricKind};
use crate::monitor::{ColumnDescriptor, MonitorDefinition};

/// Result-row keys reserved for the window columns. Columns with these
/// names are excluded from metric generation to avoid alias collisions.
pub const RESERVED_KEYS: [&str; 3] = ["window_start", "window_end", "row_count"];

/// How far back the compiled query looks, in days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Compiles monitor definitions into metric queries.
///
/// `build` is a pure function from a definition plus a column schema to a
/// [`CompiledQuery`]; the compiler itself holds no state, so there is no
/// instance to misuse across cycles.
#[derive(Debug)]
pub struct MetricCompiler;

impl MetricCompiler {
    /// Compiles one aggregate query covering every applicable metric for
    /// every non-reserved column.
    ///
    /// Columns named `window_start`, `window_end`, or `row_count` are
    /// skipped regardless of their data category. Columns whose category
    /// has no applicable metrics contribute nothing, silently.
    #[instrument(skip(monitor, columns), fields(table = %monitor.table))]
    pub fn build(
        monitor: &MonitorDefinition,
        columns: &[ColumnDescriptor],
    ) -> Result<CompiledQuery> {
        monitor.validate()?;

        let mut metrics = Vec::new();
        let mut index = HashMap::new();

        for column in columns {
            if RESERVED_KEYS
                .iter()
                .any(|key| column.name.eq_ignore_ascii_case(key))
            {
                warn!(column = %column.name, "skipping column shadowing a reserved key");
                continue;
            }

            for kind in MetricKind::default_for(column.data_category) {
                index.insert(
                    (column.name.to_lowercase(), *kind),
                    metrics.len(),
                );
                metrics.push(Metric::shell(&monitor.table, &column.name, *kind));
            }
        }

        let sql = render_query(monitor, &metrics);
        debug!(metric_count = metrics.len(), "compiled metric query");

        Ok(CompiledQuery {
            table: monitor.table.clone(),
            sql,
            metrics,
            index,
        })
    }
}

/// One compiled query together with the metric shells it will populate.
///
/// Interpretation is append-only: calling [`CompiledQuery::interpret`] twice
/// with the same rows records every data point twice. A compiled query is
/// meant to interpret exactly one result set; compile a fresh one per cycle.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    table: String,
    sql: String,
    metrics: Vec<Metric>,
    /// Lookup from (lowercased column, kind) into `metrics`.
    index: HashMap<(String, MetricKind), usize>,
}

impl CompiledQuery {
    /// The SQL text to hand to the driver.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The compiled metrics, in build order. Empty until interpreted.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Decodes a result set into the compiled metrics.
    ///
    /// For every row, each key carrying the alias separator is decoded and
    /// matched against the compiled metric list; a decode failure or a
    /// lookup miss aborts the whole call, since either means the query text
    /// and the compiled list have diverged. Cells that fail numeric
    /// coercion are recorded as points with no value, never dropped.
    ///
    /// Returns the metrics in build order.
    #[instrument(skip(self, results), fields(table = %self.table, rows = results.rows.len()))]
    pub fn interpret(&mut self, results: &ResultSet) -> Result<&[Metric]> {
        for row in &results.rows {
            let window_start = reserved_cell(row, "WINDOW_START")?;
            let window_end = reserved_cell(row, "WINDOW_END")?;
            // Presence check only; the per-window row count is not carried
            // on individual metrics.
            reserved_cell(row, "ROW_COUNT")?;

            for (key, cell) in row {
                if !alias::is_metric_alias(key) {
                    continue;
                }

                let (column, metric_name) = alias::decode(key)?;
                let metric = self.lookup(&column, &metric_name)?;

                metric.values.push(MetricDataPoint {
                    window_start: window_start.clone(),
                    window_end: window_end.clone(),
                    value: coerce_numeric(cell),
                });
            }
        }

        Ok(&self.metrics)
    }

    /// Consumes the compiled query, yielding its metrics in build order.
    pub fn into_metrics(self) -> Vec<Metric> {
        self.metrics
    }

    fn lookup(&mut self, column: &str, metric_name: &str) -> Result<&mut Metric> {
        let miss = || ScopeError::MetricLookup {
            table: self.table.clone(),
            column: column.to_string(),
            metric: metric_name.to_string(),
        };

        let kind: MetricKind = metric_name.parse().map_err(|_| miss())?;
        let idx = self
            .index
            .get(&(column.to_string(), kind))
            .copied()
            .ok_or_else(miss)?;

        Ok(&mut self.metrics[idx])
    }
}

/// Assembles the full query: reserved window columns, metric fragments,
/// lookback filter, hourly grouping.
fn render_query(monitor: &MonitorDefinition, metrics: &[Metric]) -> String {
    let bucket = format!("DATE_TRUNC('HOUR', {})", monitor.timestamp_field);

    let mut select_list = vec![
        format!("{bucket} as window_start"),
        format!("DATEADD(hr, 1, {bucket}) as window_end"),
        "COUNT(*) as row_count".to_string(),
    ];
    select_list.extend(metrics.iter().map(Metric::select_fragment));

    format!(
        "SELECT\n    {select}\nFROM {table}\nWHERE {bucket} >= DATEADD(day, -{days}, CURRENT_TIMESTAMP())\nGROUP BY window_start, window_end\nORDER BY window_start ASC;",
        select = select_list.join(",\n    "),
        table = monitor.table,
        days = DEFAULT_LOOKBACK_DAYS,
    )
}

/// Reads a reserved window cell as text, erroring when the key is absent.
fn reserved_cell(row: &serde_json::Map<String, Value>, key: &str) -> Result<String> {
    let cell = row
        .get(key)
        .ok_or_else(|| ScopeError::malformed_row(format!("missing reserved column '{key}'")))?;

    Ok(match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Best-effort numeric coercion of a raw cell. Anything that is not a JSON
/// number or a numeric string yields `None`.
fn coerce_numeric(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::DataCategory;
    use serde_json::json;

    fn text_column(name: &str) -> ColumnDescriptor {
        ColumnDescriptor::new(name, DataCategory::Text)
    }

    fn orders_monitor() -> MonitorDefinition {
        MonitorDefinition::new("orders", "created_at")
    }

    fn row(pairs: &[(&str, Value)]) -> serde_json::Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn base_row() -> Vec<(&'static str, Value)> {
        vec![
            ("WINDOW_START", json!("2023-01-01T00:00:00")),
            ("WINDOW_END", json!("2023-01-01T01:00:00")),
            ("ROW_COUNT", json!(10)),
        ]
    }

    #[test]
    fn build_compiles_one_metric_per_applicable_kind() {
        let columns = vec![
            text_column("status"),
            ColumnDescriptor::new("amount", DataCategory::Numeric),
            ColumnDescriptor::new("created_at", DataCategory::Other),
        ];
        let compiled = MetricCompiler::build(&orders_monitor(), &columns).unwrap();

        // 12 text kinds + 8 numeric kinds; the Other column contributes none.
        assert_eq!(compiled.metrics().len(), 20);

        let mut aliases: Vec<String> = compiled.metrics().iter().map(Metric::alias).collect();
        let total = aliases.len();
        aliases.sort();
        aliases.dedup();
        assert_eq!(aliases.len(), total, "aliases must be unique");
    }

    #[test]
    fn build_skips_reserved_column_names() {
        let columns = vec![text_column("ROW_COUNT"), text_column("window_start")];
        let compiled = MetricCompiler::build(&orders_monitor(), &columns).unwrap();
        assert!(compiled.metrics().is_empty());
    }

    #[test]
    fn query_has_window_columns_lookback_and_ordering() {
        let compiled =
            MetricCompiler::build(&orders_monitor(), &[text_column("status")]).unwrap();
        let sql = compiled.sql();

        assert!(sql.contains("DATE_TRUNC('HOUR', created_at) as window_start"));
        assert!(sql.contains("DATEADD(hr, 1, DATE_TRUNC('HOUR', created_at)) as window_end"));
        assert!(sql.contains("COUNT(*) as row_count"));
        assert!(sql.contains("FROM orders"));
        assert!(sql.contains(&format!(
            "DATEADD(day, -{DEFAULT_LOOKBACK_DAYS}, CURRENT_TIMESTAMP())"
        )));
        assert!(sql.contains("GROUP BY window_start, window_end"));
        assert!(sql.trim_end().ends_with("ORDER BY window_start ASC;"));
        assert!(sql.contains("AS status__completeness"));
    }

    #[test]
    fn interpret_populates_matching_metric() {
        let mut compiled =
            MetricCompiler::build(&orders_monitor(), &[text_column("status")]).unwrap();

        let mut cells = base_row();
        cells.push(("status__completeness", json!("1.0")));
        let results = ResultSet {
            rows: vec![row(&cells)],
        };

        let metrics = compiled.interpret(&results).unwrap();
        let completeness = metrics
            .iter()
            .find(|m| m.kind == MetricKind::Completeness)
            .unwrap();
        assert_eq!(
            completeness.values,
            vec![MetricDataPoint {
                window_start: "2023-01-01T00:00:00".into(),
                window_end: "2023-01-01T01:00:00".into(),
                value: Some(1.0),
            }]
        );

        // Metrics absent from the row stay empty.
        let distinct = metrics
            .iter()
            .find(|m| m.kind == MetricKind::ApproxDistinctCount)
            .unwrap();
        assert!(distinct.values.is_empty());
    }

    #[test]
    fn coercion_failure_records_point_without_value() {
        let mut compiled =
            MetricCompiler::build(&orders_monitor(), &[text_column("status")]).unwrap();

        let mut cells = base_row();
        cells.push(("status__completeness", json!("not-a-number")));
        let results = ResultSet {
            rows: vec![row(&cells)],
        };

        let metrics = compiled.interpret(&results).unwrap();
        let completeness = metrics
            .iter()
            .find(|m| m.kind == MetricKind::Completeness)
            .unwrap();
        assert_eq!(completeness.values.len(), 1);
        assert_eq!(completeness.values[0].value, None);
    }

    #[test]
    fn null_cell_records_point_without_value() {
        let mut compiled =
            MetricCompiler::build(&orders_monitor(), &[text_column("status")]).unwrap();

        let mut cells = base_row();
        cells.push(("status__completeness", Value::Null));
        let results = ResultSet {
            rows: vec![row(&cells)],
        };

        let metrics = compiled.interpret(&results).unwrap();
        let completeness = metrics
            .iter()
            .find(|m| m.kind == MetricKind::Completeness)
            .unwrap();
        assert_eq!(completeness.values[0].value, None);
    }

    #[test]
    fn unknown_alias_is_a_lookup_error() {
        let mut compiled =
            MetricCompiler::build(&orders_monitor(), &[text_column("status")]).unwrap();

        let mut cells = base_row();
        cells.push(("email__completeness", json!(0.5)));
        let results = ResultSet {
            rows: vec![row(&cells)],
        };

        assert!(matches!(
            compiled.interpret(&results),
            Err(ScopeError::MetricLookup { .. })
        ));
    }

    #[test]
    fn malformed_alias_aborts_interpretation() {
        let mut compiled =
            MetricCompiler::build(&orders_monitor(), &[text_column("status")]).unwrap();

        let mut cells = base_row();
        cells.push(("status__", json!(0.5)));
        let results = ResultSet {
            rows: vec![row(&cells)],
        };

        assert!(matches!(
            compiled.interpret(&results),
            Err(ScopeError::AliasParse { .. })
        ));
    }

    #[test]
    fn missing_reserved_column_is_rejected() {
        let mut compiled =
            MetricCompiler::build(&orders_monitor(), &[text_column("status")]).unwrap();

        let results = ResultSet {
            rows: vec![row(&[("WINDOW_START", json!("2023-01-01T00:00:00"))])],
        };

        assert!(matches!(
            compiled.interpret(&results),
            Err(ScopeError::MalformedRow(_))
        ));
    }

    #[test]
    fn interpreting_twice_duplicates_points() {
        // Append-only by design: a compiled query interprets one result set
        // exactly once, and nothing deduplicates a second pass.
        let mut compiled =
            MetricCompiler::build(&orders_monitor(), &[text_column("status")]).unwrap();

        let mut cells = base_row();
        cells.push(("status__completeness", json!(1.0)));
        let results = ResultSet {
            rows: vec![row(&cells)],
        };

        compiled.interpret(&results).unwrap();
        let metrics = compiled.interpret(&results).unwrap();

        let completeness = metrics
            .iter()
            .find(|m| m.kind == MetricKind::Completeness)
            .unwrap();
        assert_eq!(completeness.values.len(), 2);
        assert_eq!(completeness.values[0], completeness.values[1]);
    }

    #[test]
    fn interpret_returns_metrics_in_build_order() {
        let columns = vec![text_column("status"), text_column("email")];
        let mut compiled = MetricCompiler::build(&orders_monitor(), &columns).unwrap();
        let before: Vec<String> = compiled.metrics().iter().map(Metric::alias).collect();

        let metrics = compiled.interpret(&ResultSet { rows: vec![] }).unwrap();
        let after: Vec<String> = metrics.iter().map(Metric::alias).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn coerce_numeric_handles_common_shapes() {
        assert_eq!(coerce_numeric(&json!(2)), Some(2.0));
        assert_eq!(coerce_numeric(&json!(0.25)), Some(0.25));
        assert_eq!(coerce_numeric(&json!(" 3.5 ")), Some(3.5));
        assert_eq!(coerce_numeric(&json!("abc")), None);
        assert_eq!(coerce_numeric(&json!(true)), None);
        assert_eq!(coerce_numeric(&Value::Null), None);
    }
}
