//! Staff directory parsing: first `<table>` on the page, one record per row.

use std::fmt;

use scraper::{ElementRef, Html};

use crate::{error::SiteError, html::css};

/// One table row flattened to `cell | cell | ...`.
///
/// Column meaning varies between pages, so cells are kept as plain text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaffRecord {
    pub cells: Vec<String>,
}

impl fmt::Display for StaffRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cells.join(" | "))
    }
}

/// Ordered staff records scraped from the directory page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaffDirectory {
    pub records: Vec<StaffRecord>,
}

impl StaffDirectory {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Newline-joined record lines, the form fed to the model.
    pub fn to_text(&self) -> String {
        self.records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse the first table of `html` into a [`StaffDirectory`].
///
/// Rows with fewer than two `td` cells (headers, spacers) or with only blank
/// cells are skipped.
///
/// # Errors
/// - [`SiteError::NoTable`] if there is no table
/// - [`SiteError::NoRecords`] if no row qualifies
pub fn parse_staff_table(html: &str, url: &str) -> Result<StaffDirectory, SiteError> {
    let document = Html::parse_document(html);
    let table_sel = css("table")?;
    let row_sel = css("tr")?;
    let cell_sel = css("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| SiteError::NoTable {
            url: url.to_string(),
        })?;

    let records: Vec<StaffRecord> = table
        .select(&row_sel)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&cell_sel).map(stripped_text).collect();
            let has_text = cells.iter().any(|c| !c.is_empty());
            (cells.len() >= 2 && has_text).then_some(StaffRecord { cells })
        })
        .collect();

    let directory = StaffDirectory { records };
    if directory.is_empty() {
        return Err(SiteError::NoRecords {
            url: url.to_string(),
        });
    }
    Ok(directory)
}

/// Text of a cell with every text node trimmed and concatenated.
fn stripped_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
