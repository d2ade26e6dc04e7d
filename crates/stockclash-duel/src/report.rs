//! Terminal rendering

use crate::duel::TaleOfTheTape;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use stockclash_market::StockSummary;

pub const TITLE: &str = "StockClash: AI Financial Duel";
pub const SUBTITLE: &str = "Compare two stocks and let Gemini AI declare the winner.";
pub const TAPE_HEADING: &str = "The Tale of the Tape";
pub const VERDICT_HEADING: &str = "Gemini's Verdict";

const SUMMARY_COLUMN_WIDTH: u16 = 60;

/// Title banner
pub fn header() -> String {
    format!("{TITLE}\n{SUBTITLE}\n")
}

/// Side-by-side metric panels.
///
/// Always shows name, price and P/E ratio; `details` adds market cap, revenue
/// growth, 52-week high and the business summary.
pub fn tale_of_the_tape(tape: &TaleOfTheTape, details: bool) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(""),
            Cell::new(&tape.first.name)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(&tape.second.name)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

    let mut row = |label: &str, render: fn(&StockSummary) -> String| {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(render(&tape.first)),
            Cell::new(render(&tape.second)),
        ]);
    };

    row("Price", |s| format_price(s.price));
    row("P/E Ratio", |s| s.pe_ratio.to_string());
    if details {
        row("Market Cap", |s| s.market_cap.to_string());
        row("Revenue Growth", |s| s.revenue_growth.to_string());
        row("52W High", |s| format_price(s.fifty_two_week_high));
        row("Summary", |s| s.summary_text.clone());

        for index in 1..=2 {
            if let Some(column) = table.column_mut(index) {
                column.set_constraint(ColumnConstraint::UpperBoundary(Width::Fixed(
                    SUMMARY_COLUMN_WIDTH,
                )));
            }
        }
    }

    format!("{TAPE_HEADING}\n{table}\n")
}

/// The model's text, untouched, under its heading
pub fn verdict(text: &str) -> String {
    format!("{VERDICT_HEADING}\n\n{text}\n")
}

fn format_price(price: f64) -> String {
    format!("${price}")
}
