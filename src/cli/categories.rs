use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::render::{icon_path, REMOVE_ICON_PATH};
use crate::settings::Settings;

pub fn run(settings: &Settings) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Glyph", "Icon"]);
    for cat in &settings.categories {
        table.add_row(vec![
            Cell::new(&cat.id),
            Cell::new(&cat.name),
            Cell::new(&cat.glyph),
            Cell::new(icon_path(&cat.id)),
        ]);
    }
    println!("Categories\n{table}");
    println!("Remove control: {REMOVE_ICON_PATH}");
    Ok(())
}
