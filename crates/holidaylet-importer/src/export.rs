//! Corrected spreadsheet writer.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use holidaylet_booking::ReconciledRow;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column header of the corrected spreadsheet.
pub const EXPORT_HEADER: [&str; 26] = [
    "booking_ref",
    "property",
    "first_name",
    "last_name",
    "email",
    "mobile",
    "notes",
    "booking_date",
    "source",
    "arrival_date",
    "departure_date",
    "number_of_people",
    "gross",
    "net",
    "is_discount",
    "commission",
    "due_date",
    "is_commission",
    "greeting",
    "laundry",
    "cleaning",
    "consumables",
    "booking_fee",
    "house_owner_fee",
    "total_fees",
    "owner_income",
];

/// One output record, every field already rendered as text.
#[derive(Serialize)]
struct ExportRecord<'a> {
    booking_ref: &'a str,
    property: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    mobile: &'a str,
    notes: &'a str,
    booking_date: String,
    source: &'static str,
    arrival_date: String,
    departure_date: String,
    number_of_people: u32,
    gross: String,
    net: String,
    is_discount: &'static str,
    commission: String,
    due_date: String,
    is_commission: &'static str,
    greeting: String,
    laundry: String,
    cleaning: String,
    consumables: String,
    booking_fee: String,
    house_owner_fee: String,
    total_fees: String,
    owner_income: String,
}

impl<'a> ExportRecord<'a> {
    fn new(row: &'a ReconciledRow) -> Self {
        Self {
            booking_ref: &row.booking_ref,
            property: &row.property,
            first_name: &row.first_name,
            last_name: &row.last_name,
            email: &row.email,
            mobile: &row.mobile,
            notes: &row.notes,
            booking_date: format_date(row.booking_date),
            source: row.source.label(),
            arrival_date: format_date(row.arrival),
            departure_date: format_date(row.departure),
            number_of_people: row.party_size,
            gross: format_money(row.gross),
            net: format_money(row.net),
            is_discount: format_bool(row.is_discount),
            commission: format_rate(row.commission),
            due_date: format_date(row.due_date),
            is_commission: format_bool(row.is_commission),
            greeting: format_money(row.greeting),
            laundry: format_money(row.laundry),
            cleaning: format_money(row.cleaning),
            consumables: format_money(row.consumables),
            booking_fee: format_money(row.booking_fee),
            house_owner_fee: format_money(row.house_owner_fee),
            total_fees: format_money(row.total_fees),
            owner_income: format_money(row.owner_income),
        }
    }
}

/// Write the header and one record per row.
pub fn write_rows<W: Write>(writer: W, rows: &[ReconciledRow]) -> Result<()> {
    let mut wrt = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wrt.write_record(EXPORT_HEADER)?;
    for row in rows {
        wrt.serialize(ExportRecord::new(row))
            .with_context(|| format!("Failed to write row {}", row.booking_ref))?;
    }
    wrt.flush()?;
    Ok(())
}

/// Write the corrected spreadsheet to a file.
pub fn write_rows_to_file(path: &Path, rows: &[ReconciledRow]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    write_rows(BufWriter::new(file), rows)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_money(amount: Decimal) -> String {
    format_fixed(amount, 2)
}

fn format_rate(rate: Decimal) -> String {
    format_fixed(rate, 3)
}

fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

const fn format_bool(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}
