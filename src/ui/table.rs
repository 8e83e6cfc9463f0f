use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::{DatasetSource, DISPLAY_ROW_CAP};
use crate::data::export;
use crate::data::model::Table;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – dataset header, table view, download
// ---------------------------------------------------------------------------

/// Render the active dataset: heading, blurb, the filtered table, and the
/// download action.
pub fn data_panel(ui: &mut Ui, state: &mut AppState) {
    let source = state.active_source().clone();

    ui.heading(&source.title);
    ui.label(&source.blurb);
    if let Some(url) = &source.codebook_url {
        ui.hyperlink_to(
            "The current codebook for this dataset may be downloaded here.",
            url,
        );
    }
    ui.separator();

    let view = state.active_view();
    let Some(filtered) = view.filtered.as_ref() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            if view.load_failed {
                ui.heading("Dataset failed to load. Use Retry in the top bar.");
            } else {
                ui.heading("Loading dataset…");
            }
        });
        return;
    };

    let total = filtered.row_count();
    let shown = total.min(DISPLAY_ROW_CAP);
    if total > shown {
        ui.label(format!(
            "{total} rows × {} columns after filtering (showing first {shown})",
            filtered.column_count()
        ));
    } else {
        ui.label(format!(
            "{total} rows × {} columns after filtering",
            filtered.column_count()
        ));
    }

    render_table(ui, filtered, shown);
    ui.add_space(8.0);

    let mut status_update = None;
    if ui.button("Download Dataset").clicked() {
        match save_filtered_csv(&source, filtered) {
            Ok(Some(path)) => {
                log::info!("saved {} rows to {}", total, path.display());
                status_update = Some(format!("Saved to {}", path.display()));
            }
            Ok(None) => {} // dialog dismissed
            Err(e) => {
                log::error!("download failed: {e:#}");
                status_update = Some(format!("Error: {e:#}"));
            }
        }
    }
    ui.label("Note: Download will reflect any filtering performed on the data");

    if status_update.is_some() {
        state.active_view_mut().status_message = status_update;
    }
}

fn render_table(ui: &mut Ui, table: &Table, shown: usize) {
    if table.column_count() == 0 {
        ui.label("No columns selected.");
        return;
    }

    let table_height = (ui.available_height() - 70.0).max(120.0);
    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(80.0).clip(true), table.column_count())
            .max_scroll_height(table_height)
            .header(20.0, |mut header| {
                for name in table.column_names() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, shown, |mut row| {
                    let cells = &table.rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

/// Ask for a destination (pre-filled with the dataset's fixed filename)
/// and write the filtered table as CSV. `None` means the user cancelled.
fn save_filtered_csv(source: &DatasetSource, table: &Table) -> Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Download Dataset")
        .set_file_name(&source.download_filename)
        .save_file()
    else {
        return Ok(None);
    };

    let bytes = export::table_to_csv(table)?;
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(Some(path))
}
