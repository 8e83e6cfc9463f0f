use eframe::egui::Ui;

use crate::config::{CAFC_WEBSITE, DATAVERSE_URL};

// ---------------------------------------------------------------------------
// Home page – project description
// ---------------------------------------------------------------------------

/// Render the landing page: what the project is, where the archived
/// datasets live, and the affiliation disclaimer.
pub fn home_panel(ui: &mut Ui) {
    ui.heading("The Federal Circuit Database Project");
    ui.add_space(8.0);

    ui.label(
        "The Federal Circuit Database Project is a database created to provide a central \
         repository for researchers of the United States Court of Appeals for the Federal \
         Circuit. The Compendium includes all opinions, orders, and summary affirmances that \
         were released on the Federal Circuit's website, essentially all opinions since 2004 \
         and all summary affirmances since 2007, along with numerous orders and other \
         documents. Additional documents have been added from collections conducted on PACER. \
         Fields are coded in a standardized format to allow future researchers to avoid \
         recollecting fundamental fields such as case names or opinion dates. The database \
         also has the capacity for expansion, and new information about the decisions can \
         easily be added.",
    );
    ui.add_space(4.0);
    ui.hyperlink_to(
        "Copies of the individual datasets are archived at the Harvard Dataverse.",
        DATAVERSE_URL,
    );

    ui.add_space(8.0);
    ui.label("Access the document and docket datasets by using the tabs above.");

    ui.add_space(8.0);
    ui.label(
        "Note that the Federal Circuit Dataset Project is not affiliated with the United \
         States Court of Appeals for the Federal Circuit.",
    );
    ui.hyperlink_to("The court's website may be accessed here.", CAFC_WEBSITE);
}
