//! Terminal tables for the `icons` and `actions` commands.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use inspector_core::{ActionBinding, ActionIcon};
use inspector_model::{IconIndex, IconSource};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn icon_table(icons: &IconIndex) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Entity"),
        header_cell("Icon"),
    ]);
    apply_table_style(&mut table);
    for binding in icons.iter() {
        table.add_row(vec![
            Cell::new(binding.category),
            Cell::new(&binding.key),
            icon_cell(&binding.source),
        ]);
    }
    table
}

pub fn action_table(actions: &[&ActionBinding]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Action"),
        header_cell("Icon"),
        header_cell("On select"),
    ]);
    apply_table_style(&mut table);
    for binding in actions {
        table.add_row(vec![
            Cell::new(binding.label()),
            action_icon_cell(binding.icon.as_ref()),
            if binding.on_select {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("-")
            },
        ]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn icon_cell(source: &IconSource) -> Cell {
    match source {
        IconSource::Embedded(_) => Cell::new(source.describe()).fg(Color::Magenta),
        IconSource::Named(_) | IconSource::Asset(_) => Cell::new(source.describe()),
    }
}

fn action_icon_cell(icon: Option<&ActionIcon>) -> Cell {
    match icon {
        Some(ActionIcon::Asset { src, width, height }) => {
            Cell::new(format!("{src} ({width}x{height})"))
        }
        Some(ActionIcon::Named(name)) => Cell::new(format!("named:{name}")),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
