//! FILENAME: core/persistence/src/category_rules.rs
//! PURPOSE: Reads category label tables from `code:label` rule files.
//! CONTEXT: One rule per line. A `title:` line names the layer; blank lines
//! and lines starting with `#` are ignored. A repeated code keeps the last label.

use std::fs;
use std::path::Path;
use log::warn;
use raster::CategoryTable;
use crate::error::PersistenceError;

pub fn load_category_rules(path: &Path) -> Result<CategoryTable, PersistenceError> {
    if !path.exists() {
        return Err(PersistenceError::NotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    parse_category_rules(&text)
}

pub fn parse_category_rules(text: &str) -> Result<CategoryTable, PersistenceError> {
    let mut table = CategoryTable::new();

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, label)) = line.split_once(':') else {
            return Err(PersistenceError::format(number, "expected 'code:label'"));
        };
        let key = key.trim();
        let label = label.trim();

        if key.eq_ignore_ascii_case("title") {
            table.title = Some(label.to_string());
            continue;
        }

        let code: i64 = key.parse().map_err(|_| {
            PersistenceError::format(number, format!("'{}' is not an integer category", key))
        })?;
        if let Some(previous) = table.insert(code, label) {
            warn!(
                "category {} redefined on line {} ('{}' replaces '{}')",
                code, number, label, previous
            );
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_title_labels_and_comments() {
        let table = parse_category_rules(
            "# land use classes\ntitle: Land use 2024\n1:forest\n2: pasture \n\n3:urban: dense\n",
        )
        .unwrap();
        assert_eq!(table.title.as_deref(), Some("Land use 2024"));
        assert_eq!(table.len(), 3);
        assert_eq!(table.label(2), Some("pasture"));
        assert_eq!(table.label(3), Some("urban: dense"));
    }

    #[test]
    fn empty_labels_are_allowed() {
        let table = parse_category_rules("7:\n").unwrap();
        assert_eq!(table.label(7), Some(""));
    }

    #[test]
    fn last_duplicate_wins() {
        let table = parse_category_rules("1:a\n1:b\n").unwrap();
        assert_eq!(table.label(1), Some("b"));
    }

    #[test]
    fn bad_codes_report_their_line() {
        match parse_category_rules("1:a\nx:b\n") {
            Err(PersistenceError::InvalidFormat { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(parse_category_rules("no separator\n").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title: Soils").unwrap();
        writeln!(file, "10:loam").unwrap();
        let table = load_category_rules(file.path()).unwrap();
        assert_eq!(table.title.as_deref(), Some("Soils"));
        assert_eq!(table.label(10), Some("loam"));
    }
}
