//! Tabular input/output: the article manifest and the results table.
//!
//! Tables are read from `.xlsx` workbooks (first worksheet, via `calamine`)
//! or `.csv` files and held as strings. They are written back in the format
//! of the destination path: `.xlsx` through `rust_xlsxwriter`, `.csv`
//! through `csv`.

use crate::config::has_extension;
use crate::error::SinkError;
use crate::models::ManifestEntry;
use calamine::{Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub const URL_ID_COLUMN: &str = "URL_ID";
pub const URL_COLUMN: &str = "URL";

/// A header row plus data rows, every row as wide as the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    path: PathBuf,
    /// Worksheet name when read from a workbook; kept on rewrite.
    sheet: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(path: impl Into<PathBuf>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width.max(row.len()), String::new());
                row
            })
            .collect();
        Self {
            path: path.into(),
            sheet: None,
            headers,
            rows,
        }
    }

    /// Read a table, choosing the format from the file extension.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self, SinkError> {
        let table = if has_extension(path, "xlsx") || has_extension(path, "xlsm") {
            Self::read_xlsx(path)?
        } else if has_extension(path, "csv") {
            Self::read_csv(path)?
        } else {
            return Err(SinkError::UnsupportedFormat(path.to_path_buf()));
        };
        info!(rows = table.len(), columns = table.headers.len(), "Loaded table");
        Ok(table)
    }

    fn read_csv(path: &Path) -> Result<Self, SinkError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(SinkError::NoHeader(path.to_path_buf()));
        }
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self::new(path, headers, rows))
    }

    fn read_xlsx(path: &Path) -> Result<Self, SinkError> {
        let mut excel: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| SinkError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let worksheets = excel.worksheets();
        let Some((name, range)) = worksheets.into_iter().next() else {
            return Err(SinkError::NoWorksheet(path.to_path_buf()));
        };

        let mut cells = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect::<Vec<_>>());
        let headers = cells.next().ok_or_else(|| SinkError::NoHeader(path.to_path_buf()))?;
        let mut table = Self::new(path, headers, cells.collect());
        table.sheet = Some(name);
        Ok(table)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column whose header equals `name` (surrounding whitespace ignored).
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, SinkError> {
        self.column(name).ok_or_else(|| SinkError::MissingColumn {
            path: self.path.clone(),
            column: name.to_string(),
        })
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set(&mut self, row: usize, column: usize, value: String) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = value;
        }
    }

    /// Rewrite the whole table, choosing the format from the file extension.
    pub fn write(&self, path: &Path) -> Result<(), SinkError> {
        if has_extension(path, "xlsx") {
            self.write_xlsx(path)
        } else if has_extension(path, "csv") {
            self.write_csv(path)
        } else {
            Err(SinkError::UnsupportedFormat(path.to_path_buf()))
        }
    }

    /// Rewrite the whole table as a single-sheet workbook.
    ///
    /// Cells holding a plain decimal number are written as numeric cells so
    /// spreadsheet tools can compute with the metrics; everything else, e.g.
    /// an id like `0001`, stays text.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn write_xlsx(&self, path: &Path) -> Result<(), SinkError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        if let Some(name) = &self.sheet {
            worksheet.set_name(name)?;
        }
        for (row, cells) in std::iter::once(&self.headers).chain(&self.rows).enumerate() {
            for (col, value) in cells.iter().enumerate() {
                write_cell(worksheet, row as RowNum, col as ColNum, value)?;
            }
        }
        workbook.save(path)?;
        info!(rows = self.rows.len(), "Wrote workbook");
        Ok(())
    }

    /// Rewrite the whole table as CSV.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn write_csv(&self, path: &Path) -> Result<(), SinkError> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        info!(rows = self.rows.len(), "Wrote table");
        Ok(())
    }
}

fn write_cell(worksheet: &mut Worksheet, row: RowNum, col: ColNum, value: &str) -> Result<(), XlsxError> {
    if value.is_empty() {
        return Ok(());
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number.to_string() == value => {
            worksheet.write_number(row, col, number)?;
        }
        _ => {
            worksheet.write_string(row, col, value)?;
        }
    }
    Ok(())
}

/// Articles listed in a manifest table (`URL_ID`, `URL`).
///
/// Rows without an identifier are skipped with a warning.
pub fn manifest_entries(table: &Table) -> Result<Vec<ManifestEntry>, SinkError> {
    let id_col = table.require_column(URL_ID_COLUMN)?;
    let url_col = table.require_column(URL_COLUMN)?;

    let mut entries = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let url_id = table.cell(row, id_col).trim();
        if url_id.is_empty() {
            warn!(row = row + 2, path = %table.path().display(), "Manifest row without URL_ID; skipping");
            continue;
        }
        entries.push(ManifestEntry {
            url_id: url_id.to_string(),
            url: table.cell(row, url_col).trim().to_string(),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_read_csv_pads_short_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Input.csv");
        fs::write(&path, "URL_ID,URL\n a1 , https://example.com/1 \na2\n").unwrap();

        let table = Table::read(&path).unwrap();

        assert_eq!(table.headers(), &strings(&["URL_ID", "URL"])[..]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), "a1");
        assert_eq!(table.cell(0, 1), "https://example.com/1");
        assert_eq!(table.cell(1, 1), "");
    }

    #[test]
    fn test_manifest_entries_skip_missing_ids() {
        let table = Table::new(
            "Input.csv",
            strings(&["URL_ID", "URL"]),
            vec![
                strings(&["a1", "https://example.com/1"]),
                strings(&["", "https://example.com/2"]),
                strings(&["a3", "https://example.com/3"]),
            ],
        );

        let entries = manifest_entries(&table).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url_id, "a1");
        assert_eq!(entries[1].url, "https://example.com/3");
    }

    #[test]
    fn test_manifest_requires_url_column() {
        let table = Table::new("Input.csv", strings(&["URL_ID", "LINK"]), vec![]);
        let err = manifest_entries(&table).unwrap_err();
        assert!(matches!(err, SinkError::MissingColumn { column, .. } if column == "URL"));
    }

    #[test]
    fn test_write_csv_round_trips_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let mut table = Table::new(&path, strings(&["URL_ID", "FOG INDEX"]), vec![strings(&["a1", ""])]);
        table.set(0, 1, "1.2".to_string());
        table.set(5, 1, "ignored".to_string());

        table.write_csv(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "URL_ID,FOG INDEX\na1,1.2\n");
        assert_eq!(Table::read(&path).unwrap().cell(0, 1), "1.2");
    }

    #[test]
    fn test_write_xlsx_round_trips_cells_and_sheet_name() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("Output.xlsx");
        let mut table = Table::new(
            &template,
            strings(&["URL_ID", "WORD COUNT", "FOG INDEX"]),
            vec![strings(&["0001", "", ""]), strings(&["a2", "", ""])],
        );
        table.sheet = Some("Results".to_string());
        table.set(0, 1, "42".to_string());
        table.set(0, 2, "0.333332888889037".to_string());

        table.write(&template).unwrap();
        let reread = Table::read(&template).unwrap();

        assert_eq!(reread.sheet.as_deref(), Some("Results"));
        assert_eq!(reread.headers(), table.headers());
        assert_eq!(reread.cell(0, 0), "0001");
        assert_eq!(reread.cell(0, 1), "42");
        assert_eq!(reread.cell(0, 2), "0.333332888889037");
        assert_eq!(reread.cell(1, 1), "");
    }

    #[test]
    fn test_write_dispatches_on_extension() {
        let dir = TempDir::new().unwrap();
        let table = Table::new("in.csv", strings(&["URL_ID"]), vec![strings(&["a1"])]);

        table.write(&dir.path().join("out.csv")).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("out.csv")).unwrap(), "URL_ID\na1\n");

        let err = table.write(&dir.path().join("out.ods")).unwrap_err();
        assert!(matches!(err, SinkError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Table::read(Path::new("manifest.json")).unwrap_err();
        assert!(matches!(err, SinkError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_workbook() {
        let err = Table::read(Path::new("/no/such/Input.xlsx")).unwrap_err();
        assert!(matches!(err, SinkError::Workbook { .. }));
    }
}
