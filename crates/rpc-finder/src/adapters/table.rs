//! Console table rendering.

use comfy_table::presets::ASCII_FULL;
use comfy_table::{ContentArrangement, Table};

use crate::domain::{ValidatorRecord, COLUMNS};

/// Grid table of `records` in the fixed column order.
pub fn render_table(records: &[ValidatorRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(COLUMNS);

    for record in records {
        table.add_row(record.row().cells());
    }

    table.to_string()
}
