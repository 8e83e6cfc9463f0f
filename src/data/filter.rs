use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Regex, RegexBuilder};

use super::model::{CellValue, Table};

/// Columns with fewer distinct values than this are filtered with a
/// multiselect regardless of their nominal dtype.
pub const CATEGORICAL_MAX_DISTINCT: usize = 10;

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

/// The filtering behaviour a column gets. Derived at filter time from the
/// values currently in view, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Categorical,
    Numeric,
    Temporal,
    Text,
}

/// Classify a column from its distinct values.
///
/// Precedence: low cardinality (or an explicit categorical tag) wins over
/// the dtype, then numeric, then temporal, then text. Nulls don't count
/// toward the cardinality threshold.
pub fn classify(distinct: &BTreeSet<CellValue>, tagged_categorical: bool) -> ColumnKind {
    let non_null: Vec<&CellValue> = distinct.iter().filter(|v| !v.is_null()).collect();
    if tagged_categorical || non_null.len() < CATEGORICAL_MAX_DISTINCT {
        return ColumnKind::Categorical;
    }
    if non_null.iter().all(|v| v.as_f64().is_some()) {
        return ColumnKind::Numeric;
    }
    if non_null.iter().all(|v| v.as_datetime().is_some()) {
        return ColumnKind::Temporal;
    }
    ColumnKind::Text
}

// ---------------------------------------------------------------------------
// Filter specification: which columns are active, with which predicate
// ---------------------------------------------------------------------------

/// One column's row test.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnPredicate {
    /// Set membership against the selected values.
    AnyOf(BTreeSet<CellValue>),
    /// Inclusive numeric range. min == max is a fixed-point filter.
    NumericRange { min: f64, max: f64 },
    /// Inclusive date range over the value's date part.
    DateRange { start: NaiveDate, end: NaiveDate },
    /// Case-insensitive substring/regex test; empty means no filtering.
    Contains(String),
}

/// User filter input, decoupled from whatever renders the controls.
/// The default value (disabled, nothing activated) is the identity filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// The "Filter Data" toggle. Off means the table passes through as-is.
    pub enabled: bool,
    /// Columns to filter on, in activation order.
    pub columns: Vec<String>,
    /// Per-column user input. Missing or kind-mismatched entries fall back
    /// to the column's no-op default.
    pub predicates: BTreeMap<String, ColumnPredicate>,
}

impl FilterSpec {
    pub fn is_active(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Activate or deactivate filtering on a column. New activations go to
    /// the end of the list.
    pub fn toggle_column(&mut self, column: &str) {
        if let Some(pos) = self.columns.iter().position(|c| c == column) {
            self.columns.remove(pos);
        } else {
            self.columns.push(column.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Control descriptors handed back to the presentation layer
// ---------------------------------------------------------------------------

/// What widget an active column needs, with bounds derived from the rows
/// surviving the predicates applied before it.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterControl {
    MultiSelect { choices: Vec<CellValue> },
    RangeSlider { min: f64, max: f64, step: f64 },
    DatePickers { earliest: NaiveDate, latest: NaiveDate },
    TextSearch,
}

#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub table: Table,
    pub controls: Vec<(String, FilterControl)>,
}

// ---------------------------------------------------------------------------
// The filter pass
// ---------------------------------------------------------------------------

/// Run one full filter pass: temporal coercion, then per active column
/// classify → derive control → intersect the row mask.
///
/// Predicates apply in activation order and each column's control bounds
/// come from the rows left over by the columns before it. Never fails; a
/// disabled spec returns the input unchanged.
pub fn filter_table(table: &Table, spec: &FilterSpec) -> FilterOutcome {
    if !spec.enabled {
        return FilterOutcome {
            table: table.clone(),
            controls: Vec::new(),
        };
    }

    let mut work = table.clone();
    coerce_temporal_columns(&mut work);

    let mut mask = vec![true; work.row_count()];
    let mut controls = Vec::with_capacity(spec.columns.len());

    for name in &spec.columns {
        let Some(idx) = work.column_index(name) else {
            continue;
        };

        let distinct: BTreeSet<CellValue> = work
            .rows
            .iter()
            .zip(&mask)
            .filter(|(_, &live)| live)
            .map(|(row, _)| row[idx].clone())
            .collect();

        let kind = classify(&distinct, work.columns[idx].categorical);
        let control = control_for(kind, &distinct);
        let predicate = reconcile(spec.predicates.get(name), &control);

        apply_predicate(&work, idx, &predicate, &mut mask);
        controls.push((name.clone(), control));
    }

    FilterOutcome {
        table: work.retain_rows(&mask),
        controls,
    }
}

/// Build the control descriptor for a column's kind from its live values.
fn control_for(kind: ColumnKind, distinct: &BTreeSet<CellValue>) -> FilterControl {
    match kind {
        ColumnKind::Categorical => FilterControl::MultiSelect {
            choices: distinct.iter().cloned().collect(),
        },
        ColumnKind::Numeric => {
            let mut numbers = distinct.iter().filter_map(CellValue::as_f64);
            let first = numbers.next().unwrap_or(0.0);
            let (min, max) = numbers.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
            FilterControl::RangeSlider {
                min,
                max,
                step: (max - min) / 100.0,
            }
        }
        ColumnKind::Temporal => {
            let mut dates = distinct
                .iter()
                .filter_map(|v| v.as_datetime().map(|dt| dt.date()));
            let first = dates.next().unwrap_or(NaiveDate::MIN);
            let (earliest, latest) =
                dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
            FilterControl::DatePickers { earliest, latest }
        }
        ColumnKind::Text => FilterControl::TextSearch,
    }
}

/// Pair the user's stored input with the column's current control. Absent
/// or kind-mismatched input (a column can reclassify as earlier filters
/// narrow it) becomes the control's no-op default.
fn reconcile(user: Option<&ColumnPredicate>, control: &FilterControl) -> ColumnPredicate {
    match (control, user) {
        (FilterControl::MultiSelect { .. }, Some(p @ ColumnPredicate::AnyOf(_))) => p.clone(),
        (FilterControl::MultiSelect { choices }, _) => {
            ColumnPredicate::AnyOf(choices.iter().cloned().collect())
        }
        (FilterControl::RangeSlider { .. }, Some(p @ ColumnPredicate::NumericRange { .. })) => {
            p.clone()
        }
        (FilterControl::RangeSlider { min, max, .. }, _) => ColumnPredicate::NumericRange {
            min: *min,
            max: *max,
        },
        (FilterControl::DatePickers { .. }, Some(p @ ColumnPredicate::DateRange { .. })) => {
            p.clone()
        }
        (FilterControl::DatePickers { earliest, latest }, _) => ColumnPredicate::DateRange {
            start: *earliest,
            end: *latest,
        },
        (FilterControl::TextSearch, Some(p @ ColumnPredicate::Contains(_))) => p.clone(),
        (FilterControl::TextSearch, _) => ColumnPredicate::Contains(String::new()),
    }
}

/// Intersect one predicate into the row mask.
fn apply_predicate(table: &Table, idx: usize, predicate: &ColumnPredicate, mask: &mut [bool]) {
    match predicate {
        // Compile the pattern once for the whole column.
        ColumnPredicate::Contains(pattern) => {
            if pattern.is_empty() {
                return;
            }
            let matcher = TextMatcher::new(pattern);
            for (row, live) in table.rows.iter().zip(mask.iter_mut()) {
                if *live && !matcher.is_match(&row[idx].to_string()) {
                    *live = false;
                }
            }
        }
        other => {
            for (row, live) in table.rows.iter().zip(mask.iter_mut()) {
                if *live && !cell_passes(&row[idx], other) {
                    *live = false;
                }
            }
        }
    }
}

/// Whether a single cell satisfies a predicate. Cells without the
/// predicate's payload type (nulls in a range, say) fail the test.
pub fn cell_passes(cell: &CellValue, predicate: &ColumnPredicate) -> bool {
    match predicate {
        ColumnPredicate::AnyOf(selected) => selected.contains(cell),
        ColumnPredicate::NumericRange { min, max } => cell
            .as_f64()
            .map(|v| v >= *min && v <= *max)
            .unwrap_or(false),
        ColumnPredicate::DateRange { start, end } => cell
            .as_datetime()
            .map(|dt| {
                let d = dt.date();
                d >= *start && d <= *end
            })
            .unwrap_or(false),
        ColumnPredicate::Contains(pattern) => text_matches(pattern, &cell.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Text search
// ---------------------------------------------------------------------------

/// Case-insensitive containment test. The pattern is tried as a regex
/// first; one that fails to compile degrades to a plain substring search
/// instead of surfacing an error.
pub struct TextMatcher {
    inner: MatcherKind,
}

enum MatcherKind {
    Regex(Regex),
    Substring(String),
}

impl TextMatcher {
    pub fn new(pattern: &str) -> Self {
        let inner = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => MatcherKind::Regex(re),
            Err(_) => MatcherKind::Substring(pattern.to_lowercase()),
        };
        TextMatcher { inner }
    }

    pub fn is_match(&self, value: &str) -> bool {
        match &self.inner {
            MatcherKind::Regex(re) => re.is_match(value),
            MatcherKind::Substring(needle) => value.to_lowercase().contains(needle),
        }
    }
}

/// Convenience wrapper around [`TextMatcher`] for single tests. An empty
/// pattern filters nothing.
pub fn text_matches(pattern: &str, value: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    TextMatcher::new(pattern).is_match(value)
}

// ---------------------------------------------------------------------------
// Temporal coercion
// ---------------------------------------------------------------------------

/// Best-effort pass converting text columns to timezone-naive datetimes.
///
/// A column converts only when every non-null value parses; otherwise it
/// is left untouched. Categorical-tagged columns are skipped.
pub fn coerce_temporal_columns(table: &mut Table) {
    for idx in 0..table.columns.len() {
        if table.columns[idx].categorical {
            continue;
        }

        let mut parsed: Vec<Option<NaiveDateTime>> = Vec::with_capacity(table.rows.len());
        let mut convertible = true;
        let mut saw_value = false;

        for row in &table.rows {
            match &row[idx] {
                CellValue::Null => parsed.push(None),
                CellValue::String(s) => match try_parse_temporal(s) {
                    Some(dt) => {
                        saw_value = true;
                        parsed.push(Some(dt));
                    }
                    None => {
                        convertible = false;
                        break;
                    }
                },
                _ => {
                    convertible = false;
                    break;
                }
            }
        }

        if convertible && saw_value {
            for (row, value) in table.rows.iter_mut().zip(parsed) {
                row[idx] = match value {
                    Some(dt) => CellValue::DateTime(dt),
                    None => CellValue::Null,
                };
            }
        }
    }
}

/// Parse one value as a timezone-naive instant, trying offset-bearing
/// timestamps first, then plain timestamps, then bare dates. Offsets are
/// stripped keeping the written wall-clock time.
pub fn try_parse_temporal(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%B %d, %Y"];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnMeta;

    fn cat(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    fn int(i: i64) -> CellValue {
        CellValue::Integer(i)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// origin (3 distinct), score (12 distinct ints), note (free text).
    fn sample_table() -> Table {
        let origins = ["PTO", "DCT", "CFC"];
        let notes = [
            "Alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
            "lambda", "mu",
        ];
        let rows = (0..12)
            .map(|i| {
                vec![
                    cat(origins[i % 3]),
                    int(i as i64 + 1),
                    cat(notes[i]),
                ]
            })
            .collect();
        Table::new(
            vec![
                ColumnMeta::new("origin"),
                ColumnMeta::new("score"),
                ColumnMeta::new("note"),
            ],
            rows,
        )
    }

    fn enabled_spec(columns: &[&str]) -> FilterSpec {
        FilterSpec {
            enabled: true,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            predicates: BTreeMap::new(),
        }
    }

    #[test]
    fn test_disabled_spec_is_identity() {
        let table = sample_table();
        let mut spec = enabled_spec(&["origin"]);
        spec.enabled = false;
        spec.predicates
            .insert("origin".into(), ColumnPredicate::AnyOf(BTreeSet::new()));

        let outcome = filter_table(&table, &spec);
        assert_eq!(outcome.table, table);
        assert!(outcome.controls.is_empty());
    }

    #[test]
    fn test_default_spec_is_identity() {
        let table = sample_table();
        let outcome = filter_table(&table, &FilterSpec::default());
        assert_eq!(outcome.table, table);
    }

    #[test]
    fn test_activated_column_without_input_keeps_all_rows() {
        let table = sample_table();
        let outcome = filter_table(&table, &enabled_spec(&["origin", "score", "note"]));
        assert_eq!(outcome.table.row_count(), 12);
        assert_eq!(outcome.controls.len(), 3);
    }

    #[test]
    fn test_categorical_full_selection_keeps_all_rows() {
        let table = sample_table();
        let mut spec = enabled_spec(&["origin"]);
        let all: BTreeSet<CellValue> = ["PTO", "DCT", "CFC"].iter().map(|s| cat(s)).collect();
        spec.predicates
            .insert("origin".into(), ColumnPredicate::AnyOf(all));

        let outcome = filter_table(&table, &spec);
        assert_eq!(outcome.table.row_count(), 12);
    }

    #[test]
    fn test_categorical_empty_selection_drops_all_rows() {
        let table = sample_table();
        let mut spec = enabled_spec(&["origin"]);
        spec.predicates
            .insert("origin".into(), ColumnPredicate::AnyOf(BTreeSet::new()));

        let outcome = filter_table(&table, &spec);
        assert_eq!(outcome.table.row_count(), 0);
        assert_eq!(outcome.table.column_count(), 3);
    }

    #[test]
    fn test_numeric_range_is_inclusive() {
        let table = sample_table();
        let mut spec = enabled_spec(&["score"]);
        spec.predicates.insert(
            "score".into(),
            ColumnPredicate::NumericRange { min: 3.0, max: 7.0 },
        );

        let outcome = filter_table(&table, &spec);
        let idx = outcome.table.column_index("score").unwrap();
        let scores: Vec<i64> = outcome
            .table
            .rows
            .iter()
            .map(|r| match r[idx] {
                CellValue::Integer(i) => i,
                _ => panic!("expected integer"),
            })
            .collect();
        assert_eq!(scores, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_numeric_predicate_semantics_on_sparse_values() {
        let pred = ColumnPredicate::NumericRange { min: 1.0, max: 5.0 };
        assert!(cell_passes(&int(1), &pred));
        assert!(cell_passes(&int(5), &pred));
        assert!(!cell_passes(&int(10), &pred));
        assert!(!cell_passes(&CellValue::Null, &pred));
    }

    #[test]
    fn test_min_equals_max_passes_exact_matches_only() {
        let pred = ColumnPredicate::NumericRange { min: 5.0, max: 5.0 };
        assert!(cell_passes(&int(5), &pred));
        assert!(cell_passes(&CellValue::Float(5.0), &pred));
        assert!(!cell_passes(&int(4), &pred));
    }

    #[test]
    fn test_low_cardinality_numeric_gets_multiselect() {
        // 3 distinct integer values: categorical wins over numeric.
        let table = Table::new(
            vec![ColumnMeta::new("n")],
            (0..9).map(|i| vec![int(i % 3 + 1)]).collect(),
        );
        let mut spec = enabled_spec(&["n"]);
        spec.predicates.insert(
            "n".into(),
            ColumnPredicate::AnyOf([int(1)].into_iter().collect()),
        );

        let outcome = filter_table(&table, &spec);
        assert!(matches!(
            outcome.controls[0].1,
            FilterControl::MultiSelect { .. }
        ));
        assert_eq!(outcome.table.row_count(), 3);
    }

    #[test]
    fn test_classify_threshold_boundary() {
        let nine: BTreeSet<CellValue> = (0..9).map(int).collect();
        assert_eq!(classify(&nine, false), ColumnKind::Categorical);

        let ten: BTreeSet<CellValue> = (0..10).map(int).collect();
        assert_eq!(classify(&ten, false), ColumnKind::Numeric);
    }

    #[test]
    fn test_classify_tag_overrides_cardinality() {
        let many: BTreeSet<CellValue> = (0..50).map(int).collect();
        assert_eq!(classify(&many, true), ColumnKind::Categorical);
    }

    #[test]
    fn test_classify_nulls_do_not_count_toward_threshold() {
        let mut nine: BTreeSet<CellValue> = (0..9).map(int).collect();
        nine.insert(CellValue::Null);
        assert_eq!(classify(&nine, false), ColumnKind::Categorical);
    }

    #[test]
    fn test_text_search_is_case_insensitive_and_unanchored() {
        let table = sample_table();
        let mut spec = enabled_spec(&["note"]);
        spec.predicates
            .insert("note".into(), ColumnPredicate::Contains("ALP".into()));

        let outcome = filter_table(&table, &spec);
        assert_eq!(outcome.table.row_count(), 1);
        let idx = outcome.table.column_index("note").unwrap();
        assert_eq!(outcome.table.rows[0][idx], cat("Alpha"));

        // Unanchored single letter matches across casing.
        assert!(text_matches("A", "Alpha"));
        assert!(text_matches("A", "gamma"));
    }

    #[test]
    fn test_text_search_accepts_regex() {
        assert!(text_matches("^al", "Alpha"));
        assert!(!text_matches("^al", "gamma"));
    }

    #[test]
    fn test_invalid_regex_degrades_to_substring() {
        assert!(text_matches("(", "x(y"));
        assert!(!text_matches("(", "xy"));
    }

    #[test]
    fn test_empty_pattern_filters_nothing() {
        let table = sample_table();
        let mut spec = enabled_spec(&["note"]);
        spec.predicates
            .insert("note".into(), ColumnPredicate::Contains(String::new()));
        let outcome = filter_table(&table, &spec);
        assert_eq!(outcome.table.row_count(), 12);
    }

    #[test]
    fn test_activation_order_commutes() {
        let table = sample_table();

        let mut forward = enabled_spec(&["origin", "note"]);
        forward
            .predicates
            .insert("origin".into(), ColumnPredicate::AnyOf([cat("PTO")].into()));
        forward
            .predicates
            .insert("note".into(), ColumnPredicate::Contains("a".into()));

        let mut reverse = enabled_spec(&["note", "origin"]);
        reverse.predicates = forward.predicates.clone();

        let a = filter_table(&table, &forward);
        let b = filter_table(&table, &reverse);
        assert_eq!(a.table, b.table);
    }

    #[test]
    fn test_control_bounds_follow_earlier_predicates() {
        let table = sample_table();
        let mut spec = enabled_spec(&["origin", "note"]);
        spec.predicates
            .insert("origin".into(), ColumnPredicate::AnyOf([cat("PTO")].into()));

        let outcome = filter_table(&table, &spec);
        // note choices narrow to the rows surviving the origin filter.
        match &outcome.controls[1].1 {
            FilterControl::MultiSelect { choices } => {
                assert_eq!(
                    choices.clone(),
                    vec![cat("Alpha"), cat("delta"), cat("eta"), cat("kappa")]
                );
            }
            other => panic!("expected MultiSelect, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_activated_column_is_skipped() {
        let table = sample_table();
        let outcome = filter_table(&table, &enabled_spec(&["missing"]));
        assert_eq!(outcome.table.row_count(), 12);
        assert!(outcome.controls.is_empty());
    }

    #[test]
    fn test_empty_table_is_a_noop() {
        let outcome = filter_table(&Table::default(), &enabled_spec(&["anything"]));
        assert_eq!(outcome.table.row_count(), 0);
        assert_eq!(outcome.table.column_count(), 0);
    }

    #[test]
    fn test_null_choice_can_be_deselected() {
        let mut rows: Vec<Vec<CellValue>> = (0..4).map(|i| vec![cat(["a", "b"][i % 2])]).collect();
        rows.push(vec![CellValue::Null]);
        let table = Table::new(vec![ColumnMeta::new("c")], rows);

        let mut spec = enabled_spec(&["c"]);
        spec.predicates.insert(
            "c".into(),
            ColumnPredicate::AnyOf([cat("a"), cat("b")].into()),
        );
        let outcome = filter_table(&table, &spec);
        assert_eq!(outcome.table.row_count(), 4);
    }

    // -- temporal coercion --

    fn date_table(values: &[&str]) -> Table {
        // Empty strings stand in for the loader's null cells.
        let rows = values
            .iter()
            .map(|v| {
                let cell = if v.is_empty() { CellValue::Null } else { cat(v) };
                vec![cell]
            })
            .collect();
        Table::new(vec![ColumnMeta::new("decided")], rows)
    }

    #[test]
    fn test_coercion_converts_uniform_date_column() {
        let mut table = date_table(&["2020-01-05", "2021-07-09", ""]);
        coerce_temporal_columns(&mut table);
        assert_eq!(
            table.rows[0][0],
            CellValue::DateTime(date("2020-01-05").and_time(NaiveTime::MIN))
        );
        assert_eq!(table.rows[2][0], CellValue::Null);
    }

    #[test]
    fn test_coercion_strips_offsets_to_wall_clock() {
        let mut table = date_table(&["2021-01-02T03:04:05+02:00"]);
        coerce_temporal_columns(&mut table);
        let expected = date("2021-01-02").and_hms_opt(3, 4, 5).unwrap();
        assert_eq!(table.rows[0][0], CellValue::DateTime(expected));
    }

    #[test]
    fn test_coercion_leaves_mixed_columns_alone() {
        let mut table = date_table(&["2020-01-05", "not a date"]);
        let before = table.clone();
        coerce_temporal_columns(&mut table);
        assert_eq!(table, before);
    }

    #[test]
    fn test_coercion_skips_categorical_tagged_columns() {
        let mut table = date_table(&["2020-01-05"]);
        table.columns[0].categorical = true;
        let before = table.clone();
        coerce_temporal_columns(&mut table);
        assert_eq!(table, before);
    }

    #[test]
    fn test_try_parse_temporal_formats() {
        assert!(try_parse_temporal("2020-01-05").is_some());
        assert!(try_parse_temporal("01/05/2020").is_some());
        assert!(try_parse_temporal("2020-01-05 13:45:00").is_some());
        assert!(try_parse_temporal("January 5, 2020").is_some());
        assert!(try_parse_temporal("").is_none());
        assert!(try_parse_temporal("garbage").is_none());
        assert!(try_parse_temporal("12345").is_none());
    }

    #[test]
    fn test_date_range_filters_on_dates() {
        // 12 distinct dates so the column classifies temporal.
        let values: Vec<String> = (1..=12).map(|d| format!("2020-03-{d:02}")).collect();
        let refs: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
        let table = date_table(&refs);

        let mut spec = enabled_spec(&["decided"]);
        spec.predicates.insert(
            "decided".into(),
            ColumnPredicate::DateRange {
                start: date("2020-03-03"),
                end: date("2020-03-05"),
            },
        );

        let outcome = filter_table(&table, &spec);
        assert_eq!(outcome.table.row_count(), 3);
        assert!(matches!(
            outcome.controls[0].1,
            FilterControl::DatePickers { .. }
        ));
    }

    #[test]
    fn test_range_slider_step_is_a_hundredth_of_span() {
        let table = sample_table();
        let outcome = filter_table(&table, &enabled_spec(&["score"]));
        match outcome.controls[0].1 {
            FilterControl::RangeSlider { min, max, step } => {
                assert_eq!(min, 1.0);
                assert_eq!(max, 12.0);
                assert!((step - 0.11).abs() < 1e-9);
            }
            ref other => panic!("expected RangeSlider, got {other:?}"),
        }
    }

    #[test]
    fn test_stale_predicate_kind_falls_back_to_default() {
        // A numeric input left over on a column that now classifies
        // categorical must not drop rows.
        let table = sample_table();
        let mut spec = enabled_spec(&["origin"]);
        spec.predicates.insert(
            "origin".into(),
            ColumnPredicate::NumericRange { min: 0.0, max: 1.0 },
        );
        let outcome = filter_table(&table, &spec);
        assert_eq!(outcome.table.row_count(), 12);
    }
}
