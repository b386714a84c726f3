use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::algorithm::MAX_AGE_IN_DAYS;

use super::{Gender, GrowthError, Kind, LmsRow, ReferenceTable};

/// Extensions tried, in order, when resolving a table inside a directory.
pub const TABLE_EXTENSIONS: [&str; 4] = ["json", "txt", "tsv", "csv"];

pub trait TableSource {
    fn load(&self, kind: Kind, gender: Gender) -> Result<ReferenceTable, GrowthError>;
}

/// Tables kept in memory, mostly for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<(Kind, Gender), ReferenceTable>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, kind: Kind, gender: Gender, table: ReferenceTable) -> Self {
        self.insert(kind, gender, table);
        self
    }

    pub fn insert(&mut self, kind: Kind, gender: Gender, table: ReferenceTable) {
        self.tables.insert((kind, gender), table);
    }
}

impl TableSource for MemorySource {
    fn load(&self, kind: Kind, gender: Gender) -> Result<ReferenceTable, GrowthError> {
        self.tables.get(&(kind, gender)).cloned().ok_or_else(|| {
            GrowthError::table(
                table_stem(kind, gender),
                "no such table registered in memory",
            )
        })
    }
}

/// Reads WHO expanded tables from a directory, one file per kind and gender.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    range: RangeInclusive<u32>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            range: 0..=MAX_AGE_IN_DAYS,
        }
    }

    /// Days every loaded table has to cover.
    pub fn with_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.range = range;
        self
    }

    pub fn resolve(&self, kind: Kind, gender: Gender) -> Result<PathBuf, GrowthError> {
        let stem = table_stem(kind, gender);

        TABLE_EXTENSIONS
            .iter()
            .map(|extension| self.root.join(format!("{}.{}", stem, extension)))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                GrowthError::table(
                    self.root.join(&stem),
                    format!(
                        "no table file found, expected one of: {}",
                        TABLE_EXTENSIONS.join(", ")
                    ),
                )
            })
    }
}

impl TableSource for DirectorySource {
    fn load(&self, kind: Kind, gender: Gender) -> Result<ReferenceTable, GrowthError> {
        let path = self.resolve(kind, gender)?;
        debug!("Loading {} table for {} from {}", kind, gender, path.display());

        let content = fs::read_to_string(&path).map_err(|error| GrowthError::table(&path, error))?;
        let table = match path.extension().and_then(|extension| extension.to_str()) {
            Some("json") => parse_json(&path, &content)?,
            _ => parse_delimited(&path, &content)?,
        };

        if let Some(day) = table.missing_day(self.range.clone()) {
            return Err(GrowthError::table(
                &path,
                format!(
                    "table must cover days {}..={}, day {} is missing",
                    self.range.start(),
                    self.range.end(),
                    day
                ),
            ));
        }

        info!(
            "Loaded {} rows of {} table for {} from {}",
            table.len(),
            kind,
            gender,
            path.display()
        );
        Ok(table)
    }
}

pub fn table_stem(kind: Kind, gender: Gender) -> String {
    format!(
        "{}-{}-zscore-expanded-tables",
        kind.indicator(),
        gender.plural()
    )
}

fn parse_json(path: &Path, content: &str) -> Result<ReferenceTable, GrowthError> {
    let rows: Vec<LmsRow> =
        serde_json::from_str(content).map_err(|error| GrowthError::table(path, error))?;

    collect_rows(path, rows.into_iter().map(Ok::<LmsRow, std::convert::Infallible>))
}

/// Tab or comma separated text with a header naming the `Day`, `L`, `M` and
/// `S` columns, as exported from the WHO spreadsheets.
fn parse_delimited(path: &Path, content: &str) -> Result<ReferenceTable, GrowthError> {
    // @NOTE: spreadsheet "CSV UTF-8" exports start with a byte order mark
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let header = content.lines().find(|line| !line.trim().is_empty());
    let delimiter = match header {
        Some(line) if line.contains('\t') => b'\t',
        _ => b',',
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    collect_rows(path, reader.deserialize::<LmsRow>())
}

fn collect_rows<I, E>(path: &Path, rows: I) -> Result<ReferenceTable, GrowthError>
where
    I: IntoIterator<Item = Result<LmsRow, E>>,
    E: Display,
{
    let mut table = ReferenceTable::new();

    for row in rows {
        let row = row.map_err(|error| GrowthError::table(path, error))?;

        if table.insert(row.day, row.lms()).is_some() {
            return Err(GrowthError::table(
                path,
                format!("day {} appears more than once", row.day),
            ));
        }
    }

    if table.is_empty() {
        return Err(GrowthError::table(path, "table has no rows"));
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Lms;

    #[test]
    fn test_table_stem() {
        assert_eq!(
            table_stem(Kind::Weight, Gender::Girl),
            "wfa-girls-zscore-expanded-tables"
        );
        assert_eq!(
            table_stem(Kind::HeadCircumference, Gender::Boy),
            "hcfa-boys-zscore-expanded-tables"
        );
    }

    #[test]
    fn test_parse_delimited_tab() {
        let content = "Day\tL\tM\tS\tSD0\n0\t0.3809\t3.2322\t0.14171\t3.2322\n1\t0.3259\t3.1957\t0.14578\t3.1957\n";
        let table = parse_delimited(Path::new("wfa.txt"), content).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1), Some(&Lms::new(0.3259, 3.1957, 0.14578)));
    }

    #[test]
    fn test_parse_delimited_comma_reordered() {
        let content = "\"M\",\"S\",\"Day\",\"L\"\n\n49.1477,0.0379,0,1\n49.3166,0.03783,1,1\n";
        let table = parse_delimited(Path::new("lhfa.csv"), content).unwrap();

        assert_eq!(table.get(0), Some(&Lms::new(1.0, 49.1477, 0.0379)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_delimited_spreadsheet_export() {
        let content = "\u{feff}Day,L,M,S\r\n0,1,49.1477,0.0379\r\n";
        let table = parse_delimited(Path::new("lhfa.csv"), content).unwrap();
        assert_eq!(table.get(0), Some(&Lms::new(1.0, 49.1477, 0.0379)));

        let content = "Day,Note,L,M,S\n0,\"birth, term\",1,49.1477,0.0379\n1,,1,49.3166,0.03783\n";
        let table = parse_delimited(Path::new("lhfa.csv"), content).unwrap();
        assert_eq!(table.get(0), Some(&Lms::new(1.0, 49.1477, 0.0379)));
        assert_eq!(table.get(1), Some(&Lms::new(1.0, 49.3166, 0.03783)));
    }

    #[test]
    fn test_parse_delimited_rejects_bad_input() {
        let missing = parse_delimited(Path::new("a.csv"), "Day,L,M\n0,1,2\n").unwrap_err();
        assert!(missing.to_string().contains("missing field `S`"));

        let invalid = parse_delimited(Path::new("a.csv"), "Day,L,M,S\n0,x,2,3\n").unwrap_err();
        assert!(matches!(invalid, GrowthError::Table { .. }));
        assert!(invalid.to_string().contains("invalid float literal"));

        let duplicate =
            parse_delimited(Path::new("a.csv"), "Day,L,M,S\n0,1,2,3\n0,1,2,3\n").unwrap_err();
        assert!(duplicate.to_string().contains("day 0 appears more than once"));

        assert!(parse_delimited(Path::new("a.csv"), "\n\n").is_err());
    }

    #[test]
    fn test_parse_json() {
        let content = r#"[{"Day": 0, "L": 1, "M": 34.4618, "S": 0.03686}]"#;
        let table = parse_json(Path::new("hcfa.json"), content).unwrap();
        assert_eq!(table.get(0), Some(&Lms::new(1.0, 34.4618, 0.03686)));

        assert!(parse_json(Path::new("hcfa.json"), "[]").is_err());
    }

    #[test]
    fn test_memory_source() {
        let table: ReferenceTable = vec![(0, Lms::new(1.0, 34.4618, 0.03686))]
            .into_iter()
            .collect();
        let source =
            MemorySource::new().with_table(Kind::HeadCircumference, Gender::Boy, table.clone());

        assert_eq!(
            source.load(Kind::HeadCircumference, Gender::Boy).unwrap(),
            table
        );
        assert!(source.load(Kind::HeadCircumference, Gender::Girl).is_err());
    }
}
