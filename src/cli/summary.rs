use super::ui;
use crate::core::analytics::format_amount;
use crate::core::currency::parse_target_currency;
use crate::core::stats::{Stats, build_stats};
use crate::core::{Converter, Expense, Investment};
use crate::store::{LedgerStore, RecordStore};
use anyhow::Result;
use comfy_table::Cell;
use std::collections::BTreeMap;

fn breakdown_table(label: &str, breakdown: &BTreeMap<String, f64>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell(label), ui::header_cell("Amount")]);
    for (name, amount) in breakdown {
        table.add_row(vec![Cell::new(name), ui::amount_cell(*amount)]);
    }
    table.to_string()
}

impl Stats {
    pub fn display_as_table(&self) -> String {
        let mut output = format!(
            "{}\n\n",
            ui::style_text("Expenses", ui::StyleType::Title)
        );
        output.push_str(&breakdown_table("Category", &self.category_breakdown));
        output.push_str(&format!(
            "\n{} records, total {}\n\n",
            self.expense_count,
            ui::style_text(
                &format_amount(self.total_expenses),
                ui::StyleType::Total
            )
        ));

        output.push_str(&format!(
            "{}\n\n",
            ui::style_text("Investments", ui::StyleType::Title)
        ));
        output.push_str(&breakdown_table("Type", &self.investment_types));
        output.push_str(&format!(
            "\n{} records, total {}\n",
            self.investment_count,
            ui::style_text(
                &format_amount(self.total_investments),
                ui::StyleType::Total
            )
        ));

        if let Some(currency) = &self.converted_currency {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Ledger"),
                ui::header_cell(&format!("Total ({currency})")),
            ]);
            table.add_row(vec![
                Cell::new("Expenses"),
                ui::converted_cell(self.total_expenses_converted),
            ]);
            table.add_row(vec![
                Cell::new("Investments"),
                ui::converted_cell(self.total_investments_converted),
            ]);
            output.push('\n');
            output.push_str(&table.to_string());

            if let Some(degraded) = self.degraded_conversions.filter(|d| *d > 0) {
                output.push_str(&format!(
                    "\n{}",
                    ui::style_text(
                        &format!(
                            "{degraded} records could not be converted and are counted unconverted"
                        ),
                        ui::StyleType::Subtle
                    )
                ));
            }
            output.push('\n');
        }

        if let Some(error) = &self.conversion_error {
            output.push_str(&format!(
                "\n{}\n",
                ui::style_text(error, ui::StyleType::Error)
            ));
        }

        output
    }
}

/// Rate lookups a stats run will make: none unless the target is a usable code.
fn planned_conversions(records: usize, target_currency: Option<&str>) -> u64 {
    match target_currency.filter(|t| !t.trim().is_empty()) {
        Some(target) if parse_target_currency(target).is_ok() => records as u64,
        _ => 0,
    }
}

pub async fn run(
    store: &dyn RecordStore,
    converter: &dyn Converter,
    target_currency: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let expenses = store.load::<Expense>()?;
    let investments = store.load::<Investment>()?;

    let pb = ui::conversion_progress(planned_conversions(
        expenses.len() + investments.len(),
        target_currency,
    ));

    let stats = build_stats(&expenses, &investments, target_currency, converter, &|| {
        pb.inc(1)
    })
    .await;
    pb.finish_and_clear();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", stats.display_as_table());
    }
    Ok(())
}
