use crate::domain::PropertyRecord;
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx_response;
use crate::storage::COLUMNS;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

pub const EXPORT_FILENAME: &str = "properties.xlsx";

fn xlsx_err(what: &str) -> impl Fn(XlsxError) -> ServerError + '_ {
    move |e| ServerError::Xlsx(format!("Failed to write {what}: {e}"))
}

fn write_row(sheet: &mut Worksheet, r: u32, p: &PropertyRecord) -> Result<(), ServerError> {
    sheet
        .write_string(r, 0, &p.address)
        .map_err(xlsx_err("address"))?;
    sheet
        .write_number(r, 1, p.size_sq_m)
        .map_err(xlsx_err("size"))?;
    sheet
        .write_number(r, 2, p.bedrooms as f64)
        .map_err(xlsx_err("bedrooms"))?;
    sheet
        .write_number(r, 3, p.bathrooms as f64)
        .map_err(xlsx_err("bathrooms"))?;
    sheet
        .write_number(r, 4, p.rent_price)
        .map_err(xlsx_err("rent price"))?;
    sheet
        .write_string(r, 5, &p.notes)
        .map_err(xlsx_err("notes"))?;
    sheet
        .write_number(r, 6, p.quality as f64)
        .map_err(xlsx_err("quality"))?;
    sheet
        .write_string(r, 7, p.visit_date.format("%Y-%m-%d").to_string())
        .map_err(xlsx_err("visit date"))?;
    sheet
        .write_number(r, 8, p.latitude)
        .map_err(xlsx_err("latitude"))?;
    sheet
        .write_number(r, 9, p.longitude)
        .map_err(xlsx_err("longitude"))?;
    sheet
        .write_string(r, 10, &p.source_url)
        .map_err(xlsx_err("source URL"))?;
    sheet
        .write_string(r, 11, &p.id)
        .map_err(xlsx_err("id"))?;
    Ok(())
}

/// Workbook bytes with one sheet: the canonical header row, then one row per
/// record in stored order.
pub fn properties_workbook(records: &[PropertyRecord]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in COLUMNS.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .map_err(xlsx_err(header))?;
    }

    for (i, record) in records.iter().enumerate() {
        write_row(sheet, (i + 1) as u32, record)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::Xlsx(format!("Failed to save workbook: {e}")))
}

pub fn export_properties_xlsx(records: &[PropertyRecord]) -> ResultResp {
    let buffer = properties_workbook(records)?;
    tracing::info!(rows = records.len(), bytes = buffer.len(), "Exported workbook");
    xlsx_response(buffer, EXPORT_FILENAME)
}
