use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShopError};

/// A rectangular grid of cell strings. Short rows read as blank cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cell text, or `""` when the row or column is out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One titled tab of a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub title: String,
    pub table: Table,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub name: String,
    pub tabs: Vec<Tab>,
}

impl Workbook {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tabs: Vec::new(),
        }
    }

    pub fn with_tab(mut self, title: &str, table: Table) -> Self {
        self.tabs.push(Tab {
            title: title.to_string(),
            table,
        });
        self
    }

    /// First tab whose title matches case-insensitively.
    pub fn tab(&self, title: &str) -> Option<&Table> {
        let wanted = title.to_lowercase();
        self.tabs
            .iter()
            .find(|t| t.title.to_lowercase() == wanted)
            .map(|t| &t.table)
    }
}

/// Something that can hand out workbooks of raw string tables by name.
pub trait TableSource {
    fn open(&self, workbook: &str) -> Result<Workbook>;
}

/// Workbooks stored as directories of CSV files: `<root>/<workbook>/<tab>.csv`.
#[derive(Debug, Clone)]
pub struct CsvSource {
    root: PathBuf,
}

impl CsvSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read_table(path: &Path) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|cell| String::from_utf8_lossy(cell).into_owned())
                    .collect::<Vec<String>>(),
            );
        }
        Ok(Table::from_rows(rows))
    }
}

impl TableSource for CsvSource {
    fn open(&self, workbook: &str) -> Result<Workbook> {
        let dir = self.root.join(workbook);
        if !dir.is_dir() {
            return Err(ShopError::SourceUnavailable {
                name: workbook.to_string(),
                reason: format!("{} is not a directory", dir.display()),
            });
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")))
            .collect();
        paths.sort();

        let mut book = Workbook::new(workbook);
        for path in paths {
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let table = Self::read_table(&path)?;
            book = book.with_tab(&title, table);
        }
        Ok(book)
    }
}

/// In-memory workbooks keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    workbooks: HashMap<String, Workbook>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, workbook: Workbook) {
        self.workbooks.insert(workbook.name.clone(), workbook);
    }

    pub fn with(mut self, workbook: Workbook) -> Self {
        self.insert(workbook);
        self
    }
}

impl TableSource for MemorySource {
    fn open(&self, workbook: &str) -> Result<Workbook> {
        self.workbooks
            .get(workbook)
            .cloned()
            .ok_or_else(|| ShopError::SourceUnavailable {
                name: workbook.to_string(),
                reason: "no such workbook".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cell_out_of_range_is_blank() {
        let table = Table::from_rows([vec!["a", "b"], vec!["c"]]);
        assert_eq!(table.cell(0, 1), "b");
        assert_eq!(table.cell(1, 1), "");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn test_csv_source_reads_tabs() {
        let dir = tempdir().unwrap();
        let book = dir.path().join("Food List");
        fs::create_dir(&book).unwrap();
        fs::write(book.join("Master.csv"), "Name,x\nRice,1\n").unwrap();
        fs::write(book.join("notes.txt"), "ignored").unwrap();
        fs::write(book.join("Recipes.csv"), "Name\nSoup,,,\n").unwrap();

        let workbook = CsvSource::new(dir.path()).open("Food List").unwrap();
        assert_eq!(workbook.tabs.len(), 2);
        let master = workbook.tab("master").unwrap();
        assert_eq!(master.cell(1, 0), "Rice");
        assert_eq!(workbook.tab("RECIPES").unwrap().cell(1, 0), "Soup");
    }

    #[test]
    fn test_csv_source_tolerates_invalid_utf8_cell() {
        let dir = tempdir().unwrap();
        let book = dir.path().join("Plan");
        fs::create_dir(&book).unwrap();
        fs::write(book.join("Sunday.csv"), b"Caf\xe9,1,servings\nEggs,2,servings\n").unwrap();

        let workbook = CsvSource::new(dir.path()).open("Plan").unwrap();
        let sunday = workbook.tab("Sunday").unwrap();
        assert!(sunday.cell(0, 0).starts_with("Caf"));
        assert_eq!(sunday.cell(0, 1), "1");
        assert_eq!(sunday.cell(1, 0), "Eggs");
    }

    #[test]
    fn test_csv_source_missing_workbook() {
        let dir = tempdir().unwrap();
        let result = CsvSource::new(dir.path()).open("Nope");
        assert!(matches!(result, Err(ShopError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with(Workbook::new("Plan"));
        assert!(source.open("Plan").is_ok());
        assert!(source.open("Other").is_err());
    }
}
