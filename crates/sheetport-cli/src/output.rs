//! Terminal rendering of tables

use comfy_table::{Cell, ContentArrangement, Table as TerminalTable, presets::UTF8_FULL};
use sheetport_core::Table;

/// Render `table` as a bordered grid.
///
/// The first column holds row ids; each header shows the column name with its
/// id underneath, since edits address columns and rows by id.
pub fn render_table(table: &Table) -> String {
    let mut grid = TerminalTable::new();
    grid.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("row id")];
    header.extend(table.columns().iter().map(|column| {
        Cell::new(format!(
            "{}\n{} ({})",
            column.name, column.id, column.column_type
        ))
    }));
    grid.set_header(header);

    for row in table.rows() {
        let mut cells = vec![Cell::new(&row.id)];
        cells.extend(table.columns().iter().map(|column| {
            Cell::new(
                row.value(&column.id)
                    .map(|value| value.to_display_string())
                    .unwrap_or_default(),
            )
        }));
        grid.add_row(cells);
    }

    grid.to_string()
}
