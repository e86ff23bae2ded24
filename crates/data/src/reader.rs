//! Minimal RFC-4180 record splitter.

use crate::loader::LoadError;

/// One physical CSV record. `line` is the 1-based line it starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CsvRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Splits `input` into records. Quoted fields may contain commas, doubled
/// quotes and line breaks. Blank lines are skipped.
pub(crate) fn split_records(input: &str) -> Result<Vec<CsvRecord>, LoadError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut record_start = 1usize;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                other => field.push(other),
            }
            continue;
        }

        match ch {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                finish_record(&mut records, &mut fields, &mut field, record_start);
                line += 1;
                record_start = line;
            }
            other => field.push(other),
        }
    }

    if in_quotes {
        return Err(LoadError::Malformed {
            row: record_start,
            reason: "unterminated quoted field".to_string(),
        });
    }
    finish_record(&mut records, &mut fields, &mut field, record_start);

    Ok(records)
}

fn finish_record(
    records: &mut Vec<CsvRecord>,
    fields: &mut Vec<String>,
    field: &mut String,
    line: usize,
) {
    fields.push(std::mem::take(field));
    let fields = std::mem::take(fields);
    if fields.len() == 1 && fields[0].trim().is_empty() {
        return;
    }
    records.push(CsvRecord { line, fields });
}
