use crate::cli::ui;
use crate::core::rate::{RateOrigin, RateTable};
use comfy_table::Cell;

/// One line describing where the table came from.
pub fn describe_origin(table: &RateTable) -> String {
    match table.origin() {
        RateOrigin::Live => {
            let info = table.info();
            match (&info.number, info.effective_date) {
                (Some(no), Some(date)) => format!("NBP table {no}, effective {date}"),
                (None, Some(date)) => format!("NBP table effective {date}"),
                (Some(no), None) => format!("NBP table {no}"),
                (None, None) => "NBP live rates".to_string(),
            }
        }
        RateOrigin::Cache => "Offline: using cached NBP rates".to_string(),
    }
}

/// Renders every rate, base currency first.
pub fn display_as_table(table: &RateTable) -> String {
    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Mid ({})", table.base().code)),
    ]);

    for label in table.labels() {
        if let Some(entry) = table.find_by_label(&label) {
            out.add_row(vec![
                Cell::new(&entry.code),
                Cell::new(&entry.currency),
                ui::rate_cell(entry.mid),
            ]);
        }
    }

    format!(
        "{}\n{}\n{out}",
        ui::style_text("Exchange rates", ui::StyleType::Title),
        ui::style_text(&describe_origin(table), ui::StyleType::Subtle),
    )
}
