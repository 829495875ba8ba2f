use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

use super::records::{flatten, ExportRecord};
use crate::roster::Roster;

/// Column header of the exported file
pub const CSV_HEADER: [&str; 4] = ["Team", "Member", "Skill", "Competency Level"];

/// Default file name used when no export path is configured
pub const DEFAULT_EXPORT_FILE: &str = "team_data.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No data to export.")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write rows as CSV, header first
pub fn write_csv<W: Write>(records: &[ExportRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read rows from CSV produced by [`write_csv`]
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ExportRecord>, ExportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records = csv_reader
        .deserialize()
        .collect::<Result<Vec<ExportRecord>, csv::Error>>()?;
    Ok(records)
}

/// Render the whole roster as CSV text
pub fn export_to_string(roster: &Roster) -> Result<String, ExportError> {
    let records = flatten(roster);
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut buffer = Vec::new();
    write_csv(&records, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Export the roster to `path` atomically. Returns the number of rows written.
///
/// Fails with [`ExportError::Empty`] before touching the filesystem when no
/// competency has been recorded.
pub fn export_to_path(roster: &Roster, path: &Path) -> Result<usize> {
    let records = flatten(roster);
    if records.is_empty() {
        return Err(ExportError::Empty.into());
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open export file at {}", path.display()))?;
    write_csv(&records, &mut file).context("Failed to write CSV export")?;
    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    tracing::info!(rows = records.len(), path = %path.display(), "export written");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::regroup;
    use crate::roster::{CompetencyLevel, SkillCategories};

    fn scored_roster() -> Roster {
        let mut roster = Roster::new();
        roster.add_team("Alpha", &SkillCategories::defaults()).unwrap();
        roster.add_members("Alpha", "Ana, Ben").unwrap();
        roster
            .set_competency("Alpha", "Ana", "Python", CompetencyLevel::new(7).unwrap())
            .unwrap();
        roster
            .set_competency("Alpha", "Ben", "Monitoring and Tracking", CompetencyLevel::new(3).unwrap())
            .unwrap();
        roster
    }

    #[test]
    fn test_export_to_string_format() {
        let csv = export_to_string(&scored_roster()).unwrap();
        assert_eq!(
            csv,
            "Team,Member,Skill,Competency Level\n\
             Alpha,Ana,Python,7\n\
             Alpha,Ben,Monitoring and Tracking,3\n"
        );
    }

    #[test]
    fn test_export_quotes_commas() {
        let mut roster = Roster::new();
        roster.add_team("R&D, West", &SkillCategories::defaults()).unwrap();
        roster.add_members("R&D, West", "Ana").unwrap();
        roster
            .set_competency("R&D, West", "Ana", "SQL", CompetencyLevel::new(1).unwrap())
            .unwrap();

        let csv = export_to_string(&roster).unwrap();
        assert!(csv.contains("\"R&D, West\",Ana,SQL,1"));
    }

    #[test]
    fn test_export_empty_roster() {
        let roster = Roster::new();
        assert!(matches!(export_to_string(&roster), Err(ExportError::Empty)));
    }

    #[test]
    fn test_export_to_path_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("team_data.csv");

        let err = export_to_path(&Roster::new(), &path).unwrap_err();
        assert!(matches!(err.downcast_ref::<ExportError>(), Some(ExportError::Empty)));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("team_data.csv");
        let roster = scored_roster();

        let rows = export_to_path(&roster, &path).unwrap();
        assert_eq!(rows, 2);

        let file = std::fs::File::open(&path).unwrap();
        let records = read_csv(file).unwrap();
        assert_eq!(regroup(&records), roster.score_index());
    }

    #[test]
    fn test_read_csv_rejects_out_of_range_level() {
        let data = "Team,Member,Skill,Competency Level\nAlpha,Ana,SQL,11\n";
        assert!(read_csv(data.as_bytes()).is_err());
    }
}
