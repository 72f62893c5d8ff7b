use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::{PipelineError, Result};

// PFR ships secondary tables inside an HTML comment; these are the exact
// delimiters it uses.
const WRAPPED_TABLE_START: &str = "<!--\n\n<div class=\"table_container\"";
const TABLE_START: &str = "<div class=\"table_container\"";
const WRAPPED_TABLE_END: &str = "</table>\n\n\n</div>\n-->";
const TABLE_END: &str = "</table>\n\n\n</div>\n";

const SKIPPED_ROW_CLASSES: &[&str] = &["thead", "divider"];

static TBODY: Lazy<Selector> = Lazy::new(|| selector("tbody"));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static CELL: Lazy<Selector> = Lazy::new(|| selector("th, td"));

fn selector(raw: &str) -> Selector {
    Selector::parse(raw).expect("static selector is valid")
}

/// Strip the comment wrapping around PFR tables so they parse as markup.
pub fn unbreak_html(html: &str) -> String {
    html.replace(WRAPPED_TABLE_START, TABLE_START)
        .replace(WRAPPED_TABLE_END, TABLE_END)
}

/// Unbreak and parse a raw page in one step.
pub fn parse_page(html: &str) -> Html {
    Html::parse_document(&unbreak_html(html))
}

/// Rows of trimmed cell text. Column meaning is positional; headers are not
/// interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fails on the first row whose width is not `width`.
    pub fn check_width(&self, width: usize) -> Result<()> {
        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(PipelineError::SchemaMismatch {
                    expected: width,
                    found: row.len(),
                    row: idx,
                });
            }
        }
        Ok(())
    }

    /// Impose a positional schema of `R::WIDTH` columns on every row.
    pub fn into_records<R: FromRow>(self) -> Result<Vec<R>> {
        self.check_width(R::WIDTH)?;
        Ok(self.rows.into_iter().map(R::from_row).collect())
    }
}

/// A record built from exactly `WIDTH` positional cells.
pub trait FromRow: Sized {
    const WIDTH: usize;

    /// Callers guarantee `cells.len() == WIDTH`.
    fn from_row(cells: Vec<String>) -> Self;
}

pub fn extract_table(document: &Html, element_id: &str) -> Result<Table> {
    let by_id = Selector::parse(&format!("#{element_id}"))
        .map_err(|_| PipelineError::missing_element(element_id))?;
    let element = document
        .select(&by_id)
        .next()
        .ok_or_else(|| PipelineError::missing_element(element_id))?;
    let body = element
        .select(&TBODY)
        .next()
        .ok_or_else(|| PipelineError::missing_element(element_id))?;

    let rows = body
        .select(&ROW)
        .filter(|row| !is_skipped_row(row))
        .map(|row| {
            row.select(&CELL)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(Table { rows })
}

fn is_skipped_row(row: &ElementRef<'_>) -> bool {
    row.value()
        .classes()
        .any(|class| SKIPPED_ROW_CLASSES.contains(&class))
}
