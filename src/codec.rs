// File: ./src/codec.rs
//! Delimited-text exchange for events.
//!
//! Export writes a BOM-prefixed, comma-separated table (one row per event,
//! sorted by date) that spreadsheet tools open with the right encoding.
//! Import goes the other way but stops at raw rows and unresolved
//! [`NewEvent`]s; nothing here touches the store.
use crate::model::date::format_short;
use crate::model::event::OTHER_DEPARTMENT;
use crate::model::resolver::resolve_import_date;
use crate::model::week::label_for_date;
use crate::model::{DepartmentFilter, Event, NewEvent, SemesterConfig};
use anyhow::Result;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};

pub const BOM: &str = "\u{feff}";

pub const EXPORT_HEADER: [&str; 7] = [
    "Week",
    "Date",
    "Content",
    "Department",
    "Section",
    "Notes",
    "Sign-off",
];

/// Column order of an incoming file, decided from its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportLayout {
    /// `date, content, department, section`
    Simple,
    /// A file produced by [`export_csv`]; the leading week column is ignored.
    Exported,
}

impl ImportLayout {
    fn offset(self) -> usize {
        match self {
            Self::Simple => 0,
            Self::Exported => 1,
        }
    }

    fn detect(header: &[String]) -> Self {
        let is = |i: usize, name: &str| {
            header
                .get(i)
                .is_some_and(|c| c.trim().eq_ignore_ascii_case(name))
        };
        if is(0, EXPORT_HEADER[0]) && is(1, EXPORT_HEADER[1]) {
            Self::Exported
        } else {
            Self::Simple
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub layout: ImportLayout,
    /// Data rows, header excluded.
    pub rows: Vec<Vec<String>>,
}

/// Result of mapping parsed rows to events.
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub events: Vec<NewEvent>,
    pub skipped: usize,
}

fn single_line(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Serializes the events visible under `filter`, ascending by date.
pub fn export_csv(
    events: &[Event],
    filter: &DepartmentFilter,
    config: &SemesterConfig,
    weekday_names: &[String; 7],
) -> Result<String> {
    let mut selected: Vec<&Event> = events.iter().filter(|e| filter.matches(e)).collect();
    selected.sort_by_key(|e| e.date);

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADER)?;
    for event in &selected {
        wtr.write_record([
            single_line(&label_for_date(event.date, config)).as_str(),
            format_short(event.date, weekday_names).as_str(),
            event.content.as_str(),
            event.department.as_str(),
            event.section.as_str(),
            "",
            "",
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| anyhow::anyhow!("CSV buffer error: {}", e))?;
    log::debug!("Exported {} of {} events ({})", selected.len(), events.len(), filter);
    Ok(format!("{}{}", BOM, String::from_utf8(bytes)?))
}

fn record_to_vec(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

/// Splits one record into fields.
///
/// Commas inside quotes are literal, `""` inside quotes is one quote and
/// unquoted fields are kept verbatim. A quoted field may span line breaks.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    match rdr.read_record(&mut record) {
        Ok(true) => record_to_vec(&record),
        _ => Vec::new(),
    }
}

/// Parses a whole file: strips the BOM, reads the header to pick the layout
/// and returns the remaining non-blank rows. CRLF and LF both work.
pub fn parse_file(text: &str) -> ParsedFile {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = rdr.records();
    let layout = match records.next() {
        Some(Ok(header)) => ImportLayout::detect(&record_to_vec(&header)),
        _ => ImportLayout::Simple,
    };

    let mut rows = Vec::new();
    for (i, record) in records.enumerate() {
        match record {
            Ok(r) if r.iter().all(|f| f.trim().is_empty()) => {}
            Ok(r) => rows.push(record_to_vec(&r)),
            Err(e) => log::warn!("Skipping unreadable CSV record {}: {}", i + 2, e),
        }
    }
    ParsedFile { layout, rows }
}

/// Maps one row to an event, resolving its date inside the configured range.
///
/// `None` when the date cannot be resolved or the content is blank.
pub fn row_to_event(row: &[String], layout: ImportLayout, config: &SemesterConfig) -> Option<NewEvent> {
    let col = |i: usize| row.get(layout.offset() + i).map(|s| s.trim()).unwrap_or("");

    let date = resolve_import_date(col(0), config.range_start, config.range_end)?;
    let content = col(1);
    if content.is_empty() {
        return None;
    }
    let department = match col(2) {
        "" => OTHER_DEPARTMENT,
        d => d,
    };
    Some(NewEvent {
        date,
        department: department.to_string(),
        section: col(3).to_string(),
        content: content.to_string(),
    })
}

/// Maps every row; unusable rows are counted, never fatal.
pub fn import_rows(parsed: &ParsedFile, config: &SemesterConfig) -> ImportBatch {
    let mut batch = ImportBatch::default();
    for (i, row) in parsed.rows.iter().enumerate() {
        match row_to_event(row, parsed.layout, config) {
            Some(event) => batch.events.push(event),
            None => {
                log::debug!("Import row {} skipped: {:?}", i + 1, row);
                batch.skipped += 1;
            }
        }
    }
    batch
}
