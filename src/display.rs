use std::io::Write;

use anyhow::Result;
use chrono::Local;
use rusty_money::iso::Currency;
use scale_core::{ConversionResult, Good, Measure, Mode, Transaction};
use tabwriter::TabWriter;
use ulid::Ulid;

/// Renders values with two decimals and the configured currency symbol.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    currency: &'static Currency,
}

impl Formatter {
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }

    pub fn money(&self, value: f64) -> String {
        if self.currency.symbol_first {
            format!("{} {:.2}", self.currency.symbol, value)
        } else {
            format!("{:.2} {}", value, self.currency.symbol)
        }
    }

    pub fn amount(&self, value: f64, measure: Measure) -> String {
        match measure {
            Measure::Currency => self.money(value),
            Measure::Gram | Measure::Milliliter => format!("{:.2} {}", value, measure),
        }
    }

    pub fn result(&self, result: Option<&ConversionResult>) -> String {
        match result {
            Some(r) => self.amount(r.value, r.output_unit),
            None => "0.00".to_string(),
        }
    }

    pub fn unit_price(&self, good: &Good) -> String {
        format!("{}/{}", self.money(good.price_per_unit), good.unit)
    }

    /// What the user is asked to type for `good` in `mode`.
    pub fn input_label(&self, good: &Good, mode: Mode) -> String {
        match mode {
            Mode::PriceToQuantity => format!("amount ({})", self.currency.symbol),
            Mode::QuantityToPrice => format!("weight ({})", good.unit.sub_unit()),
        }
    }
}

pub fn print_catalog<T: Write>(
    wr: T,
    fmt: &Formatter,
    goods: &[Good],
    active: Option<Ulid>,
) -> Result<()> {
    let mut tw = TabWriter::new(wr);
    writeln!(tw, "\t#\tGood\tPrice\tColor")?;

    for (i, good) in goods.iter().enumerate() {
        let marker = if Some(good.id) == active { "*" } else { "" };
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}",
            marker,
            i + 1,
            good.name,
            fmt.unit_price(good),
            good.color,
        )?;
    }

    tw.flush()?;

    Ok(())
}

pub fn print_history<T: Write>(wr: T, fmt: &Formatter, txs: &[Transaction]) -> Result<()> {
    let mut tw = TabWriter::new(wr);
    writeln!(tw, "Time\tGood\tInput\tResult")?;

    for tx in txs {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}",
            tx.timestamp.with_timezone(&Local).format("%H:%M:%S"),
            tx.good_name,
            fmt.amount(tx.input_value, tx.input_unit),
            fmt.amount(tx.result_value, tx.result_unit),
        )?;
    }

    tw.flush()?;

    Ok(())
}
