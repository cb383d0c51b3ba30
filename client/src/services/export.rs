//! CSV export of the session's record list.
//!
//! FORMAT
//! ======
//! UTF-8, comma separated, header then one row per record, rows joined with
//! `\n` and no trailing newline. Values are written verbatim unless they
//! contain a comma, quote, or line break; those are quoted RFC 4180 style
//! with inner quotes doubled.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::borrow::Cow;

use super::PanelError;
use crate::net::export::FileExport;
use crate::state::records::{RecordCollection, RecordField};
use crate::state::session::SessionState;

pub const CSV_FILE_NAME: &str = "registro_mensajeria.csv";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// `ID,Type,Priority,Destination,Courier,Date,Time,Notes`
#[must_use]
pub fn csv_header() -> String {
    RecordField::ALL.map(RecordField::label).join(",")
}

fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render the whole collection. Pure; equal input gives equal bytes.
#[must_use]
pub fn render_csv(records: &RecordCollection) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(csv_header());
    for record in records {
        let row: Vec<Cow<'_, str>> = record.values().map(escape_field).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Render the list and hand it to the file exporter. Administrators only.
///
/// Returns the number of bytes handed over.
///
/// # Errors
///
/// `PanelError::ExportForbidden` when no admin session is active.
pub fn export_csv(
    exporter: &dyn FileExport,
    session: &SessionState,
    records: &RecordCollection,
) -> Result<usize, PanelError> {
    if !session.role().is_some_and(|role| role.can_export()) {
        log::warn!("export refused for role {:?}", session.role());
        return Err(PanelError::ExportForbidden);
    }
    let csv = render_csv(records);
    exporter.download(csv.as_bytes(), CSV_MIME_TYPE, CSV_FILE_NAME);
    log::info!("exported {} records", records.len());
    Ok(csv.len())
}
