//! Minimal single-sheet OOXML workbook.
//!
//! The workbook is a zip of five fixed parts plus one worksheet. Text cells
//! are inline strings, so no shared-string table is needed. Scores that parse
//! as numbers are written as numeric cells; anything else stays text.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{header, ExportError, RecordSink};
use crate::pipeline::structuring::{Periods, Record, Score};

pub const SHEET_NAME: &str = "Scores";

const CONTENT_TYPES_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_RELS_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// Spreadsheet output (`.xlsx`), one sheet, right-to-left view.
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for XlsxSink {
    fn format(&self) -> &'static str {
        "xlsx"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, records: &[Record], periods: &Periods) -> Result<(), ExportError> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        write_xlsx(&mut writer, records, periods)?;
        writer.flush()?;
        Ok(())
    }
}

/// Package the records as a workbook into `writer`.
pub fn write_xlsx<W: Write + Seek>(
    writer: W,
    records: &[Record],
    periods: &Periods,
) -> Result<(), ExportError> {
    let mut zip = ZipWriter::new(writer);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", deflated)?;
    zip.write_all(CONTENT_TYPES_XML)?;

    zip.start_file("_rels/.rels", deflated)?;
    zip.write_all(ROOT_RELS_XML)?;

    zip.start_file("xl/workbook.xml", deflated)?;
    zip.write_all(workbook_xml().as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", deflated)?;
    zip.write_all(WORKBOOK_RELS_XML)?;

    zip.start_file("xl/worksheets/sheet1.xml", deflated)?;
    zip.write_all(sheet_xml(records, periods).as_bytes())?;

    zip.finish()?;
    Ok(())
}

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
        SHEET_NAME
    )
}

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Empty,
}

impl<'a> Cell<'a> {
    fn score(score: Option<&'a Score>) -> Self {
        match score {
            Some(score) => score.value().map_or(Cell::Text(score.as_str()), Cell::Number),
            None => Cell::Empty,
        }
    }

    fn optional(text: Option<&'a str>) -> Self {
        text.map_or(Cell::Empty, Cell::Text)
    }
}

fn sheet_xml(records: &[Record], periods: &Periods) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetViews><sheetView rightToLeft="1" workbookViewId="0"/></sheetViews>
<sheetData>"#,
    );

    let columns = header(periods);
    let header_cells: Vec<Cell> = columns.iter().map(|c| Cell::Text(c)).collect();
    push_row(&mut xml, 1, &header_cells);

    for (index, record) in records.iter().enumerate() {
        let mut cells = vec![
            Cell::optional(record.category.as_deref()),
            Cell::optional(record.institution.as_deref()),
            Cell::optional(record.sub_unit.as_deref()),
            Cell::Text(&record.label),
        ];
        cells.extend(record.scores.iter().map(Cell::score));
        push_row(&mut xml, index + 2, &cells);
    }

    xml.push_str("</sheetData>\n</worksheet>");
    xml
}

fn push_row(xml: &mut String, row: usize, cells: &[Cell]) {
    xml.push_str(&format!("<row r=\"{row}\">"));
    for (col, cell) in cells.iter().enumerate() {
        let reference = format!("{}{row}", column_letter(col));
        match cell {
            Cell::Text(text) => {
                xml.push_str(&format!("<c r=\"{reference}\" t=\"inlineStr\">"));
                xml.push_str("<is><t xml:space=\"preserve\">");
                xml.push_str(&escape(xml_safe(text).as_str()));
                xml.push_str("</t></is></c>");
            }
            Cell::Number(value) => {
                xml.push_str(&format!("<c r=\"{reference}\"><v>{value}</v></c>"))
            }
            Cell::Empty => {}
        }
    }
    xml.push_str("</row>");
}

/// Column letter for a zero-based index. Rows never exceed 26 columns.
fn column_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Drop characters XML 1.0 cannot carry, even escaped.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || c >= ' ')
        .filter(|&c| !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use calamine::{open_workbook, Data, Range, Reader, Xlsx};
    use zip::ZipArchive;

    use super::*;
    use crate::pipeline::structuring::{HeadingContext, ScoreTriple};

    fn record(label: &str, scores: &[&str]) -> Record {
        let context = HeadingContext {
            institution: Some("\u{062C}\u{0627}\u{0645}\u{0639}\u{0629}".into()),
            ..HeadingContext::default()
        };
        Record::new(
            &context,
            label,
            ScoreTriple::from_scores(scores.iter().map(|s| Score::new(*s))),
        )
    }

    fn render(records: &[Record]) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        write_xlsx(&mut out, records, &Periods::default()).unwrap();
        out.into_inner()
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut text = String::new();
        part.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn package_has_all_parts() {
        let bytes = render(&[]);
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/_rels/workbook.xml.rels",
                "xl/workbook.xml",
                "xl/worksheets/sheet1.xml",
            ]
        );
    }

    #[test]
    fn workbook_names_the_sheet() {
        let bytes = render(&[]);
        assert!(read_part(&bytes, "xl/workbook.xml").contains(r#"<sheet name="Scores""#));
    }

    fn open(bytes: Vec<u8>) -> Range<Data> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
        workbook.worksheet_range(SHEET_NAME).unwrap()
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn sheet_is_right_to_left() {
        let sheet = read_part(&render(&[]), "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<sheetView rightToLeft="1""#));
    }

    #[test]
    fn header_row_reads_back() {
        let range = open(render(&[]));
        assert_eq!(range.height(), 1);

        let header: Vec<Data> = range.rows().next().unwrap().to_vec();
        assert_eq!(
            header,
            ["Category", "Institution", "SubUnit", "Label", "2022", "2023", "2024"]
                .map(text)
                .to_vec()
        );
    }

    #[test]
    fn scores_read_back_as_numbers_and_gaps_as_empty() {
        let range = open(render(&[record("PA", &["12.5", "11.25"])]));

        assert_eq!(range.height(), 2);
        assert!(matches!(range.get_value((1, 0)), None | Some(Data::Empty)));
        assert_eq!(
            range.get_value((1, 1)),
            Some(&text("\u{062C}\u{0627}\u{0645}\u{0639}\u{0629}"))
        );
        assert_eq!(range.get_value((1, 3)), Some(&text("PA")));
        assert_eq!(range.get_value((1, 4)), Some(&Data::Float(12.5)));
        assert_eq!(range.get_value((1, 5)), Some(&Data::Float(11.25)));
        assert!(matches!(range.get_value((1, 6)), None | Some(Data::Empty)));
    }

    #[test]
    fn unparsable_score_stays_text() {
        let range = open(render(&[record("PA", &["n/a"])]));
        assert_eq!(range.get_value((1, 4)), Some(&text("n/a")));
    }

    #[test]
    fn markup_in_labels_survives_escaping() {
        let bytes = render(&[record("A & B <x>", &["1.0"])]);
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("A &amp; B &lt;x&gt;"));

        let range = open(bytes);
        assert_eq!(range.get_value((1, 3)), Some(&text("A & B <x>")));
    }

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(xml_safe("a\u{0001}b\tc"), "ab\tc");
    }

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(0), 'A');
        assert_eq!(column_letter(6), 'G');
    }

    #[test]
    fn sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.xlsx");
        let sink = XlsxSink::new(&path);

        sink.write(&[record("PA", &["9.0"])], &Periods::default()).unwrap();
        assert_eq!(sink.format(), "xlsx");

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.get_value((1, 4)), Some(&Data::Float(9.0)));
    }
}
