use std::collections::BTreeSet;

use chrono::NaiveDate;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::filter::{ColumnPredicate, FilterControl};
use crate::data::model::CellValue;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – column selection and filter widgets
// ---------------------------------------------------------------------------

/// Render the left control panel and recompute the filtered table.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    if state.loaded_table().is_none() {
        if state.active_view().load_failed {
            ui.label("Dataset failed to load.");
        } else {
            ui.label("Loading dataset…");
        }
        return;
    }

    // Clone what we need so we can mutate state inside the loops.
    let all_columns: Vec<String> = state
        .loaded_table()
        .map(|t| t.column_names().map(str::to_string).collect())
        .unwrap_or_default();
    let controls = state.active_view().controls.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            column_selection(ui, state, &all_columns);
            ui.separator();
            filter_activation(ui, state, &all_columns);

            // ---- Per-column filter widgets (collapsible) ----
            for (col, control) in &controls {
                let header_label = match control {
                    FilterControl::MultiSelect { choices } => {
                        let n_selected = selected_choices(state, col, choices).len();
                        format!("{col}  ({n_selected}/{})", choices.len())
                    }
                    _ => col.clone(),
                };

                egui::CollapsingHeader::new(RichText::new(header_label).strong())
                    .id_salt(col)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| match control {
                        FilterControl::MultiSelect { choices } => {
                            multiselect_widget(ui, state, col, choices);
                        }
                        FilterControl::RangeSlider { min, max, step } => {
                            range_widget(ui, state, col, *min, *max, *step);
                        }
                        FilterControl::DatePickers { earliest, latest } => {
                            date_widget(ui, state, col, *earliest, *latest);
                        }
                        FilterControl::TextSearch => {
                            text_widget(ui, state, col);
                        }
                    });
            }
        });

    // Recompute the filtered table after any widget changes.
    state.refilter();
}

/// "Select Variables" toggle plus the column multiselect.
fn column_selection(ui: &mut Ui, state: &mut AppState, all_columns: &[String]) {
    let view = state.active_view_mut();
    ui.checkbox(&mut view.choose_columns, "Select Variables");
    if !view.choose_columns {
        return;
    }
    egui::CollapsingHeader::new("Select Columns")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for col in all_columns {
                let mut checked = view.selected_columns.contains(col);
                if ui.checkbox(&mut checked, col).changed() {
                    if checked {
                        view.selected_columns.insert(col.clone());
                    } else {
                        view.selected_columns.remove(col);
                    }
                }
            }
        });
}

/// "Filter Data" toggle plus the choose-which-columns-to-filter list.
fn filter_activation(ui: &mut Ui, state: &mut AppState, all_columns: &[String]) {
    let view = state.active_view_mut();
    ui.checkbox(&mut view.spec.enabled, "Filter Data");
    if !view.spec.enabled {
        return;
    }

    let filterable: Vec<String> = if view.choose_columns {
        all_columns
            .iter()
            .filter(|c| view.selected_columns.contains(*c))
            .cloned()
            .collect()
    } else {
        all_columns.to_vec()
    };

    egui::CollapsingHeader::new("Filter dataframe on")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for col in &filterable {
                let mut active = view.spec.is_active(col);
                if ui.checkbox(&mut active, col).changed() {
                    view.spec.toggle_column(col);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Per-kind filter widgets
// ---------------------------------------------------------------------------

fn multiselect_widget(ui: &mut Ui, state: &mut AppState, col: &str, choices: &[CellValue]) {
    // Select all / none buttons
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_choices(col, choices);
        }
        if ui.small_button("None").clicked() {
            state.select_none_choices(col);
        }
    });

    let selected = selected_choices(state, col, choices);
    for val in choices {
        let mut checked = selected.contains(val);
        if ui.checkbox(&mut checked, choice_label(val)).changed() {
            state.toggle_choice(col, val, choices);
        }
    }
}

fn range_widget(ui: &mut Ui, state: &mut AppState, col: &str, min: f64, max: f64, step: f64) {
    let (mut lo, mut hi) = match state.active_view().spec.predicates.get(col) {
        Some(ColumnPredicate::NumericRange { min: a, max: b }) => (*a, *b),
        _ => (min, max),
    };

    let lo_response = ui.add(egui::Slider::new(&mut lo, min..=max).step_by(step).text("min"));
    let hi_response = ui.add(egui::Slider::new(&mut hi, min..=max).step_by(step).text("max"));

    if lo_response.changed() || hi_response.changed() {
        // Keep the range well-formed when one handle crosses the other.
        if lo_response.changed() {
            hi = hi.max(lo);
        } else {
            lo = lo.min(hi);
        }
        state.active_view_mut().spec.predicates.insert(
            col.to_string(),
            ColumnPredicate::NumericRange { min: lo, max: hi },
        );
    }
}

fn date_widget(ui: &mut Ui, state: &mut AppState, col: &str, earliest: NaiveDate, latest: NaiveDate) {
    let (mut start, mut end) = match state.active_view().spec.predicates.get(col) {
        Some(ColumnPredicate::DateRange { start, end }) => (*start, *end),
        _ => (earliest, latest),
    };

    let mut changed = false;
    let start_salt = format!("{col}_start");
    let end_salt = format!("{col}_end");
    ui.horizontal(|ui: &mut Ui| {
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt(&start_salt))
            .changed();
        ui.label("to");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt(&end_salt))
            .changed();
    });

    if changed {
        if end < start {
            end = start;
        }
        state
            .active_view_mut()
            .spec
            .predicates
            .insert(col.to_string(), ColumnPredicate::DateRange { start, end });
    }
}

fn text_widget(ui: &mut Ui, state: &mut AppState, col: &str) {
    let mut pattern = match state.active_view().spec.predicates.get(col) {
        Some(ColumnPredicate::Contains(p)) => p.clone(),
        _ => String::new(),
    };

    let response = ui.add(
        egui::TextEdit::singleline(&mut pattern)
            .hint_text(format!("Substring or regex in {col}")),
    );
    if response.changed() {
        state
            .active_view_mut()
            .spec
            .predicates
            .insert(col.to_string(), ColumnPredicate::Contains(pattern));
    }
}

// -- helpers --

/// The currently selected multiselect values; an untouched column has
/// everything selected.
fn selected_choices(state: &AppState, col: &str, choices: &[CellValue]) -> BTreeSet<CellValue> {
    match state.active_view().spec.predicates.get(col) {
        Some(ColumnPredicate::AnyOf(selected)) => selected.clone(),
        _ => choices.iter().cloned().collect(),
    }
}

fn choice_label(value: &CellValue) -> String {
    if value.is_null() {
        "(blank)".to_string()
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: home and dataset tabs, row counts, status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("The Federal Circuit Database Project");
        ui.separator();

        if ui.selectable_label(state.show_home, "Home").clicked() {
            state.show_home = true;
        }
        for i in 0..state.datasets.len() {
            let name = state.datasets[i].name.clone();
            let selected = !state.show_home && state.active == i;
            if ui.selectable_label(selected, name).clicked() {
                state.active = i;
                state.show_home = false;
            }
        }

        if state.show_home {
            return;
        }
        ui.separator();

        if let Some(table) = state.loaded_table() {
            let total = table.row_count();
            let visible = state
                .active_view()
                .filtered
                .as_ref()
                .map(|t| t.row_count())
                .unwrap_or(total);
            ui.label(format!("{total} rows loaded, {visible} visible"));
        }

        if state.active_view().load_failed && ui.small_button("Retry").clicked() {
            state.retry_load();
        }

        if let Some(msg) = &state.active_view().status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
