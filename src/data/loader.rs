use std::collections::HashSet;

use csv::{ByteRecord, QuoteStyle, StringRecord};

use super::error::LoadError;
use super::model::{CellValue, ColumnType, Dataset};

/// Tokens read as a missing value, whatever the column type.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#NA", "<NA>", "N/A", "NA", "NULL", "NaN", "-NaN", "None", "n/a", "nan",
    "-nan", "null",
];

const TRUE_TOKENS: &[&str] = &["True", "TRUE", "true"];
const FALSE_TOKENS: &[&str] = &["False", "FALSE", "false"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse comma-separated UTF-8 text into a [`Dataset`].
///
/// The first record is the header. Column types are inferred per column
/// from the non-missing cells: all integers → `Integer`, else all numbers →
/// `Float`, else all boolean tokens → `Bool`, otherwise `String`.
///
/// Shape rules:
/// * blank header names become `Unnamed: {index}`, repeated names get a
///   `.1`, `.2`, … suffix
/// * rows shorter than the header are padded with nulls
/// * rows longer than the header are an error
pub fn parse_csv(bytes: &[u8]) -> Result<Dataset, LoadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();
    let header = loop {
        match records.next() {
            Some(result) => {
                let record = result.map_err(read_error)?;
                if !is_blank_line(&record, bytes) {
                    break record;
                }
            }
            None => return Err(LoadError::Empty),
        }
    };
    let columns = unique_column_names(&header);
    let width = columns.len();

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for result in records {
        let record = result.map_err(read_error)?;
        if is_blank_line(&record, bytes) {
            continue;
        }
        if record.len() > width {
            return Err(LoadError::TooManyFields {
                line: record.position().map_or(0, |p| p.line()),
                expected: width,
                found: record.len(),
            });
        }

        let mut cells: Vec<Option<String>> = record
            .iter()
            .map(|field| (!is_missing(field)).then(|| field.to_string()))
            .collect();
        cells.resize(width, None);
        raw_rows.push(cells);
    }

    let types: Vec<ColumnType> = (0..width)
        .map(|col| infer_column_type(raw_rows.iter().filter_map(|r| r[col].as_deref())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .zip(&types)
                .map(|(cell, ty)| match cell {
                    Some(text) => coerce(text, *ty),
                    None => CellValue::Null,
                })
                .collect()
        })
        .collect();

    Dataset::new(columns, rows)
}

/// Render a dataset back to CSV text: header, then one line per row, each
/// cell in its canonical string form (nulls as empty fields).
///
/// For any dataset produced by [`parse_csv`], parsing the output yields an
/// equal dataset.
pub fn serialize(dataset: &Dataset) -> Result<Vec<u8>, csv::Error> {
    let mut records = Vec::with_capacity(dataset.row_count() + 1);
    records.push(ByteRecord::from(dataset.columns().to_vec()));
    for cells in dataset.rows() {
        let mut record = ByteRecord::with_capacity(64, cells.len());
        for cell in cells {
            record.push_field(cell.to_string().as_bytes());
        }
        records.push(record);
    }

    // Unquoted, a lone whitespace field reads back as a blank line.
    let mut out = Vec::new();
    for group in records.chunk_by(|a, b| is_bare_whitespace(a) == is_bare_whitespace(b)) {
        let style = if is_bare_whitespace(&group[0]) {
            QuoteStyle::Always
        } else {
            QuoteStyle::Necessary
        };
        write_records(&mut out, style, group)?;
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_error(err: csv::Error) -> LoadError {
    if let csv::ErrorKind::Utf8 { pos, .. } = err.kind() {
        return LoadError::Encoding {
            line: pos.as_ref().map_or(0, |p| p.line()),
        };
    }
    LoadError::Malformed(err)
}

fn write_records(out: &mut Vec<u8>, style: QuoteStyle, records: &[ByteRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(style)
        .from_writer(out);
    for record in records {
        writer.write_byte_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// A single non-empty field made only of ASCII whitespace.
fn is_bare_whitespace(record: &ByteRecord) -> bool {
    record.len() == 1 && !record[0].is_empty() && record[0].iter().all(u8::is_ascii_whitespace)
}

/// A line holding nothing but unquoted whitespace. `input` is the text the
/// record was read from; a quoted field such as `" "` is a value, not a
/// blank line.
fn is_blank_line(record: &StringRecord, input: &[u8]) -> bool {
    if record.len() != 1 || !record[0].bytes().all(|b| b.is_ascii_whitespace()) {
        return false;
    }
    let start = record.position().map_or(0, |p| p.byte() as usize);
    input.get(start) != Some(&b'"')
}

/// Missing-value test applied to every raw field. Any spelling of NaN
/// counts, so a parsed table never holds a NaN float.
fn is_missing(field: &str) -> bool {
    if NA_TOKENS.contains(&field) {
        return true;
    }
    let trimmed = field.trim();
    trimmed
        .strip_prefix(&['+', '-'][..])
        .unwrap_or(trimmed)
        .eq_ignore_ascii_case("nan")
}

fn unique_column_names(header: &StringRecord) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(header.len());
    header
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let base = if field.trim().is_empty() {
                format!("Unnamed: {idx}")
            } else {
                field.to_string()
            };
            let mut name = base.clone();
            let mut suffix = 0;
            while taken.contains(&name) {
                suffix += 1;
                name = format!("{base}.{suffix}");
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> ColumnType {
    if cells.clone().next().is_none() {
        return ColumnType::String;
    }
    if cells.clone().all(|c| c.trim().parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if cells.clone().all(|c| c.trim().parse::<f64>().is_ok()) {
        ColumnType::Float
    } else if cells.clone().all(|c| parse_bool(c.trim()).is_some()) {
        ColumnType::Bool
    } else {
        ColumnType::String
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if TRUE_TOKENS.contains(&s) {
        Some(true)
    } else if FALSE_TOKENS.contains(&s) {
        Some(false)
    } else {
        None
    }
}

/// Convert one raw field into a cell of the column's inferred type.
fn coerce(text: String, ty: ColumnType) -> CellValue {
    let trimmed = text.trim();
    let typed = match ty {
        ColumnType::Integer => trimmed.parse().ok().map(CellValue::Integer),
        ColumnType::Float => trimmed.parse().ok().map(CellValue::Float),
        ColumnType::Bool => parse_bool(trimmed).map(CellValue::Bool),
        ColumnType::String => None,
    };
    typed.unwrap_or(CellValue::String(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn parses_header_and_typed_rows() {
        let ds = parse_csv(b"name,age,score,active\nAlice,30,1.5,True\nBob,25,2,false\n").unwrap();
        assert_eq!(ds.columns(), &["name", "age", "score", "active"]);
        assert_eq!(
            ds.column_types(),
            &[
                ColumnType::String,
                ColumnType::Integer,
                ColumnType::Float,
                ColumnType::Bool
            ]
        );
        assert_eq!(
            ds.rows()[1],
            vec![
                s("Bob"),
                CellValue::Integer(25),
                CellValue::Float(2.0),
                CellValue::Bool(false)
            ]
        );
    }

    #[test]
    fn missing_tokens_become_null() {
        let ds = parse_csv(b"a,b\n1,NA\n,x\nnan,null\n").unwrap();
        assert_eq!(ds.column_types(), &[ColumnType::Integer, ColumnType::String]);
        assert_eq!(ds.rows()[0], vec![CellValue::Integer(1), CellValue::Null]);
        assert_eq!(ds.rows()[1], vec![CellValue::Null, s("x")]);
        assert_eq!(ds.rows()[2], vec![CellValue::Null, CellValue::Null]);
    }

    #[test]
    fn mixed_columns_stay_strings() {
        let ds = parse_csv(b"code\n5\nA7\n").unwrap();
        assert_eq!(ds.column_types(), &[ColumnType::String]);
        assert_eq!(ds.rows()[0], vec![s("5")]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse_csv(b""), Err(LoadError::Empty)));
        assert!(matches!(parse_csv(b"  \n\t\n"), Err(LoadError::Empty)));
        assert!(matches!(parse_csv(UTF8_BOM), Err(LoadError::Empty)));
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let err = parse_csv(b"a,b\n1,\xff\xfe\n").unwrap_err();
        assert!(matches!(err, LoadError::Encoding { line: 2 }), "{err:?}");
    }

    #[test]
    fn long_rows_are_rejected() {
        let err = parse_csv(b"a,b\n1,2\n1,2,3\n").unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::TooManyFields {
                    line: 3,
                    expected: 2,
                    found: 3
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = parse_csv(b"a,b,c\n1,2\n").unwrap();
        assert_eq!(
            ds.rows()[0],
            vec![CellValue::Integer(1), CellValue::Integer(2), CellValue::Null]
        );
    }

    #[test]
    fn header_only_is_an_empty_table() {
        let ds = parse_csv(b"a,b\n").unwrap();
        assert_eq!(ds.column_count(), 2);
        assert!(ds.is_empty());
    }

    #[test]
    fn header_names_are_made_unique() {
        let ds = parse_csv(b"a,,a,a.1\n1,2,3,4\n").unwrap();
        assert_eq!(ds.columns(), &["a", "Unnamed: 1", "a.1", "a.1.1"]);
    }

    #[test]
    fn bom_and_blank_lines_are_ignored() {
        let ds = parse_csv(b"\xEF\xBB\xBFname\nAlice\n\n   \nBob\n").unwrap();
        assert_eq!(ds.columns(), &["name"]);
        assert_eq!(ds.rows(), &[vec![s("Alice")], vec![s("Bob")]]);
    }

    #[test]
    fn every_nan_spelling_is_missing() {
        let ds = parse_csv(b"x\n1.5\nNAN\nNan\n+nan\n -NaN \n").unwrap();
        assert_eq!(ds.column_types(), &[ColumnType::Float]);
        assert_eq!(ds.rows()[0], vec![CellValue::Float(1.5)]);
        assert!(ds.rows()[1..].iter().all(|r| r[0].is_null()));
        assert_eq!(ds, parse_csv(b"x\n1.5\nNAN\nNan\n+nan\n -NaN \n").unwrap());
    }

    #[test]
    fn blank_lines_before_header_are_skipped() {
        let ds = parse_csv(b"   \n\t\nname,age\nAlice,30\n").unwrap();
        assert_eq!(ds.columns(), &["name", "age"]);
        assert_eq!(ds.rows(), &[vec![s("Alice"), CellValue::Integer(30)]]);
    }

    #[test]
    fn quoted_whitespace_is_a_value() {
        let ds = parse_csv(b"name\n\" \"\nBob\n").unwrap();
        assert_eq!(ds.rows(), &[vec![s(" ")], vec![s("Bob")]]);

        let out = serialize(&ds).unwrap();
        assert_eq!(out, b"name\n\" \"\nBob\n");
        assert_eq!(parse_csv(&out).unwrap(), ds);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let ds = parse_csv(b"city,n\n\"Paris, FR\",1\n").unwrap();
        assert_eq!(ds.cell(0, "city"), Some(&s("Paris, FR")));
    }

    #[test]
    fn serialize_writes_canonical_cells() {
        let ds = parse_csv(b"name,age,score,ok\nAlice,30,2,TRUE\n\"Smith, J\",,0.25,false\n").unwrap();
        let out = String::from_utf8(serialize(&ds).unwrap()).unwrap();
        assert_eq!(
            out,
            "name,age,score,ok\nAlice,30,2.0,True\n\"Smith, J\",,0.25,False\n"
        );
    }

    #[test]
    fn serialize_then_parse_is_identity() {
        let inputs: &[&[u8]] = &[
            b"name,age\nAlice,30\nBob,25\nAlice,40\n",
            b"x,y,z\n1.5,True,hello\n-3,False,\"a \"\"quoted\"\" word\"\n",
            b"id,note\n1,\n2,NA\n,text\n",
            b"only\n\n1\n",
            b"a,b\n",
            b"x\n1.5\nNAN\n",
            b"name\n\" \"\nBob\n\"\t\"\n",
        ];
        for input in inputs {
            let ds = parse_csv(input).unwrap();
            let again = parse_csv(&serialize(&ds).unwrap()).unwrap();
            assert_eq!(again, ds, "input: {}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn single_column_nulls_survive_round_trip() {
        let ds = Dataset::new(
            vec!["v".into()],
            vec![vec![s("a")], vec![CellValue::Null], vec![s("b")]],
        )
        .unwrap();
        let again = parse_csv(&serialize(&ds).unwrap()).unwrap();
        assert_eq!(again, ds);
    }
}
