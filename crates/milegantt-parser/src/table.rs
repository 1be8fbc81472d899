//! Header resolution and row decoding

use csv::{ReaderBuilder, StringRecord, Trim};
use milegantt_core::{ColumnHeaders, Milestone, MilestoneTable};
use std::io::Read;

use crate::{parse_compact_date, LoadError};

const MILESTONE_NAMES: &[&str] = &["milestone", "name", "task", "关键里程碑", "里程碑"];
const START_NAMES: &[&str] = &["start", "start date", "begin", "开始时间", "开始日期"];
const END_NAMES: &[&str] = &["end", "end date", "finish", "结束时间", "结束日期"];
const OWNER_NAMES: &[&str] = &["owner", "responsible", "assignee", "负责人"];
const MODULE_NAMES: &[&str] = &["module", "group", "phase", "模块"];

/// Source column index of each field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ColumnMap {
    milestone: usize,
    start: usize,
    end: usize,
    owner: usize,
    module: usize,
}

impl ColumnMap {
    const POSITIONAL: Self = Self {
        milestone: 0,
        start: 1,
        end: 2,
        owner: 3,
        module: 4,
    };

    /// Locate columns by name, falling back to positional order when no
    /// header is recognized at all
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let keys: Vec<String> = headers.iter().map(header_key).collect();
        let find = |names: &[&str]| keys.iter().position(|k| names.contains(&k.as_str()));

        let found = [
            find(MILESTONE_NAMES),
            find(START_NAMES),
            find(END_NAMES),
            find(OWNER_NAMES),
            find(MODULE_NAMES),
        ];

        if found.iter().all(Option::is_none) {
            if headers.len() < 5 {
                let missing = ["milestone", "start", "end", "owner", "module"][headers.len()];
                return Err(LoadError::MissingColumn(missing.to_string()));
            }
            return Ok(Self::POSITIONAL);
        }

        let require = |index: Option<usize>, name: &str| {
            index.ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            milestone: require(found[0], "milestone")?,
            start: require(found[1], "start")?,
            end: require(found[2], "end")?,
            owner: require(found[3], "owner")?,
            module: require(found[4], "module")?,
        })
    }

    fn labels(&self, headers: &StringRecord) -> ColumnHeaders {
        let label = |i: usize| clean_header(headers.get(i).unwrap_or_default());
        ColumnHeaders {
            milestone: label(self.milestone),
            start: label(self.start),
            end: label(self.end),
            owner: label(self.owner),
            module: label(self.module),
        }
    }
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// Comparison key: trimmed, lowercased, `-`/`_` read as spaces
fn header_key(raw: &str) -> String {
    clean_header(raw)
        .to_lowercase()
        .replace(['-', '_'], " ")
}

pub(crate) fn read_table<R: Read>(reader: R) -> Result<MilestoneTable, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut table = MilestoneTable::default();
    table.headers = columns.labels(&headers);

    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        let row = decode_row(&record, &columns, &table.headers, line)?;
        table.push(row);
    }

    Ok(table)
}

fn decode_row(
    record: &StringRecord,
    columns: &ColumnMap,
    headers: &ColumnHeaders,
    line: u64,
) -> Result<Milestone, LoadError> {
    let field = |i: usize| record.get(i).unwrap_or_default().trim();

    let date = |i: usize, column: &str| {
        parse_compact_date(field(i)).map_err(|err| LoadError::InvalidDate {
            line,
            column: column.to_string(),
            value: err.value,
        })
    };

    let start = date(columns.start, headers.start.as_str())?;
    let end = date(columns.end, headers.end.as_str())?.ok_or(LoadError::MissingEndDate { line })?;

    Ok(Milestone {
        name: field(columns.milestone).to_string(),
        start,
        end,
        owner: field(columns.owner).to_string(),
        module: field(columns.module).to_string(),
    })
}
