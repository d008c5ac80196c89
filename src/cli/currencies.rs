use super::ui;
use crate::core::currency::{BASE_CURRENCY, CurrencyCatalog};
use anyhow::Result;
use comfy_table::Cell;

pub fn run(as_json: bool) -> Result<()> {
    let catalog = CurrencyCatalog::default();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Currency")]);
    for symbol in &catalog.symbols {
        let cell = if symbol == BASE_CURRENCY {
            Cell::new(format!("{symbol} (default)"))
        } else {
            Cell::new(symbol)
        };
        table.add_row(vec![cell]);
    }
    println!("{table}");
    Ok(())
}
