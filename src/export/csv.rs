//! CSV export of the expense ledger.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};

use crate::domain::Expense;
use crate::errors::LedgerError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column headers for the given language tag.
pub fn header(language: &str) -> [&'static str; 4] {
    if language == "tr" {
        ["Başlık", "Tutar", "Kategori", "Tarih"]
    } else {
        ["Title", "Amount", "Category", "Date"]
    }
}

/// Writes one quoted row per expense after the header. Category cells use
/// the localized label so the file matches what the user sees.
pub fn write_csv<W: Write>(
    expenses: &[Expense],
    language: &str,
    out: W,
) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);
    writer.write_record(header(language))?;
    for expense in expenses {
        writer.write_record([
            expense.title.as_str(),
            &expense.amount.to_string(),
            expense.category.label(language),
            &expense.date.format(DATE_FORMAT).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Convenience wrapper producing the CSV document as a string.
pub fn csv_string(expenses: &[Expense], language: &str) -> Result<String, LedgerError> {
    let mut buffer = Vec::new();
    write_csv(expenses, language, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|err| LedgerError::StorageError(format!("CSV output was not UTF-8: {err}")))
}
