use std::collections::BTreeSet;

use crate::config::DatasetSource;
use crate::data::cache::TableCache;
use crate::data::filter::{filter_table, ColumnPredicate, FilterControl, FilterSpec};
use crate::data::loader;
use crate::data::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Per-dataset UI state: column selection, filter inputs, and the result
/// of the latest filter pass.
#[derive(Debug, Default)]
pub struct ViewState {
    /// The "Select Variables" toggle.
    pub choose_columns: bool,
    /// Columns kept when `choose_columns` is on. Starts empty, like the
    /// untouched multiselect it mirrors.
    pub selected_columns: BTreeSet<String>,
    /// Filter inputs consumed by the filter engine.
    pub spec: FilterSpec,
    /// Output of the latest filter pass (None until the dataset loads).
    pub filtered: Option<Table>,
    /// Control descriptors from the latest pass, one per active column.
    pub controls: Vec<(String, FilterControl)>,
    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
    /// Set after a failed load so the app doesn't refetch every frame.
    pub load_failed: bool,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub datasets: Vec<DatasetSource>,
    /// Loaded tables, keyed by source URL; lives for the process.
    pub cache: TableCache,
    pub views: Vec<ViewState>,
    /// Index of the dataset tab in view.
    pub active: usize,
    /// Landing-page toggle; picking a dataset tab clears it.
    pub show_home: bool,
}

impl AppState {
    pub fn new(datasets: Vec<DatasetSource>) -> Self {
        let views = datasets.iter().map(|_| ViewState::default()).collect();
        AppState {
            datasets,
            cache: TableCache::default(),
            views,
            active: 0,
            show_home: true,
        }
    }

    pub fn active_source(&self) -> &DatasetSource {
        &self.datasets[self.active]
    }

    pub fn active_view(&self) -> &ViewState {
        &self.views[self.active]
    }

    pub fn active_view_mut(&mut self) -> &mut ViewState {
        &mut self.views[self.active]
    }

    /// The cached table for the active dataset, if it has loaded.
    pub fn loaded_table(&self) -> Option<&Table> {
        self.cache.get(&self.datasets[self.active].url)
    }

    /// Fetch the active dataset on first access. Failures set a status
    /// message and are not retried until [`AppState::retry_load`].
    pub fn ensure_loaded(&mut self) {
        let source = self.datasets[self.active].clone();
        if self.cache.contains(&source.url) || self.views[self.active].load_failed {
            return;
        }

        let loaded = self
            .cache
            .get_or_load(&source.url, || Ok(loader::load_dataset(&source)?))
            .map(|t| (t.row_count(), t.column_count()));

        let view = &mut self.views[self.active];
        match loaded {
            Ok((rows, cols)) => {
                log::info!("loaded {}: {rows} rows, {cols} columns", source.name);
                view.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load {}: {e:#}", source.name);
                view.status_message = Some(format!("Error: {e:#}"));
                view.load_failed = true;
            }
        }
    }

    /// Clear a failed-load marker so the next frame fetches again.
    pub fn retry_load(&mut self) {
        let view = self.active_view_mut();
        view.load_failed = false;
        view.status_message = None;
    }

    /// Recompute the filtered table and control descriptors for the
    /// active dataset. Runs once per interaction frame.
    pub fn refilter(&mut self) {
        let url = self.datasets[self.active].url.clone();
        let Some(table) = self.cache.get(&url) else {
            let view = &mut self.views[self.active];
            view.filtered = None;
            view.controls.clear();
            return;
        };

        let view = &mut self.views[self.active];
        let base = if view.choose_columns {
            table.select_columns(&view.selected_columns)
        } else {
            table.clone()
        };

        let outcome = filter_table(&base, &view.spec);
        view.controls = outcome.controls;
        view.filtered = Some(outcome.table);
    }

    // -- categorical selection helpers used by the filter panel --

    /// Toggle one value in a column's multiselect. A missing or
    /// kind-mismatched predicate is seeded with every choice selected
    /// before toggling.
    pub fn toggle_choice(&mut self, column: &str, value: &CellValue, all_choices: &[CellValue]) {
        let view = &mut self.views[self.active];
        let entry = view
            .spec
            .predicates
            .entry(column.to_string())
            .or_insert_with(|| ColumnPredicate::AnyOf(all_choices.iter().cloned().collect()));
        if !matches!(entry, ColumnPredicate::AnyOf(_)) {
            *entry = ColumnPredicate::AnyOf(all_choices.iter().cloned().collect());
        }
        if let ColumnPredicate::AnyOf(selected) = entry {
            if !selected.remove(value) {
                selected.insert(value.clone());
            }
        }
    }

    /// Select every value in a column's multiselect.
    pub fn select_all_choices(&mut self, column: &str, all_choices: &[CellValue]) {
        self.active_view_mut().spec.predicates.insert(
            column.to_string(),
            ColumnPredicate::AnyOf(all_choices.iter().cloned().collect()),
        );
    }

    /// Deselect every value in a column's multiselect; the filter then
    /// matches no rows.
    pub fn select_none_choices(&mut self, column: &str) {
        self.active_view_mut()
            .spec
            .predicates
            .insert(column.to_string(), ColumnPredicate::AnyOf(BTreeSet::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnMeta;
    use std::collections::BTreeMap;

    fn fake_source(name: &str, url: &str) -> DatasetSource {
        DatasetSource {
            name: name.to_string(),
            title: name.to_string(),
            blurb: String::new(),
            url: url.to_string(),
            codebook_url: None,
            delimiter: ',',
            download_filename: format!("{name}.csv"),
            type_hints: BTreeMap::new(),
        }
    }

    fn seed_table(state: &mut AppState, url: &str, table: Table) {
        state
            .cache
            .get_or_load(url, || Ok(table))
            .expect("seeding the cache cannot fail");
    }

    fn small_table() -> Table {
        Table::new(
            vec![ColumnMeta::new("origin"), ColumnMeta::new("year")],
            vec![
                vec![
                    CellValue::String("PTO".into()),
                    CellValue::Integer(2004),
                ],
                vec![
                    CellValue::String("DCT".into()),
                    CellValue::Integer(2011),
                ],
            ],
        )
    }

    #[test]
    fn test_refilter_without_loaded_table_clears_results() {
        let mut state = AppState::new(vec![fake_source("d", "mem://d")]);
        state.refilter();
        assert!(state.active_view().filtered.is_none());
    }

    #[test]
    fn test_refilter_identity_when_filtering_disabled() {
        let mut state = AppState::new(vec![fake_source("d", "mem://d")]);
        seed_table(&mut state, "mem://d", small_table());

        state.refilter();
        let filtered = state.active_view().filtered.as_ref().unwrap();
        assert_eq!(filtered, &small_table());
    }

    #[test]
    fn test_column_selection_projects_before_filtering() {
        let mut state = AppState::new(vec![fake_source("d", "mem://d")]);
        seed_table(&mut state, "mem://d", small_table());

        {
            let view = state.active_view_mut();
            view.choose_columns = true;
            view.selected_columns.insert("year".to_string());
        }
        state.refilter();

        let filtered = state.active_view().filtered.as_ref().unwrap();
        let names: Vec<&str> = filtered.column_names().collect();
        assert_eq!(names, vec!["year"]);
    }

    #[test]
    fn test_enabling_column_choice_with_nothing_selected_empties_table() {
        let mut state = AppState::new(vec![fake_source("d", "mem://d")]);
        seed_table(&mut state, "mem://d", small_table());

        state.active_view_mut().choose_columns = true;
        state.refilter();

        let filtered = state.active_view().filtered.as_ref().unwrap();
        assert_eq!(filtered.column_count(), 0);
    }

    #[test]
    fn test_toggle_choice_seeds_full_selection_then_removes() {
        let mut state = AppState::new(vec![fake_source("d", "mem://d")]);
        seed_table(&mut state, "mem://d", small_table());

        let choices = vec![
            CellValue::String("DCT".into()),
            CellValue::String("PTO".into()),
        ];
        state.toggle_choice("origin", &CellValue::String("PTO".into()), &choices);

        let view = state.active_view_mut();
        view.spec.enabled = true;
        view.spec.toggle_column("origin");
        state.refilter();

        let filtered = state.active_view().filtered.as_ref().unwrap();
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.rows[0][0], CellValue::String("DCT".into()));
    }

    #[test]
    fn test_views_are_independent_per_dataset() {
        let mut state = AppState::new(vec![
            fake_source("a", "mem://a"),
            fake_source("b", "mem://b"),
        ]);
        state.active_view_mut().spec.enabled = true;
        state.active = 1;
        assert!(!state.active_view().spec.enabled);
    }
}
