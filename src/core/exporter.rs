use crate::domain::model::PlayerRecord;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScrapeError};

pub const DEFAULT_REPORT_FILENAME: &str = "PlayerStats.csv";

pub const REPORT_HEADER: [&str; 8] = [
    "Name",
    "Number",
    "Ranking",
    "Position",
    "Games Played",
    "Goals",
    "Penalty Mins",
    "Photo",
];

pub fn render_csv(records: &[PlayerRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REPORT_HEADER)?;
    for record in records {
        writer.write_record(record.report_row())?;
    }
    writer
        .into_inner()
        .map_err(|e| ScrapeError::IoError(e.into_error()))
}

pub struct ReportExporter {
    filename: String,
}

impl ReportExporter {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub async fn export<S: Storage>(&self, storage: &S, records: &[PlayerRecord]) -> Result<()> {
        let data = render_csv(records)?;
        tracing::debug!(
            "Writing {} ({} rows, {} bytes)",
            self.filename,
            records.len(),
            data.len()
        );
        storage.write_file(&self.filename, &data).await
    }
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemoryStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MemoryStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn record(i: usize) -> PlayerRecord {
        PlayerRecord {
            name: format!("Player {}", i),
            position: "F".to_string(),
            number: format!("{}", 10 + i),
            rank: format!("{}", i),
            games_played: "30".to_string(),
            goals: format!("{}", i * 2),
            penalty_minutes: "4".to_string(),
            photo_path: format!("player_photos/p-{}.jpg", i),
        }
    }

    #[test]
    fn test_render_has_header_plus_one_line_per_record() {
        let records: Vec<_> = (1..=3).map(record).collect();
        let csv = String::from_utf8(render_csv(&records).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Name,Number,Ranking,Position,Games Played,Goals,Penalty Mins,Photo"
        );
    }

    #[test]
    fn test_columns_follow_header_mapping() {
        let records = vec![record(2)];
        let bytes = render_csv(&records).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());

        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();
        let column = |name: &str| {
            let i = headers.iter().position(|h| h == name).unwrap();
            row.get(i).unwrap().to_string()
        };

        assert_eq!(column("Name"), "Player 2");
        assert_eq!(column("Number"), "12");
        assert_eq!(column("Ranking"), "2");
        assert_eq!(column("Position"), "F");
        assert_eq!(column("Games Played"), "30");
        assert_eq!(column("Goals"), "4");
        assert_eq!(column("Penalty Mins"), "4");
        assert_eq!(column("Photo"), "player_photos/p-2.jpg");
    }

    #[test]
    fn test_values_with_commas_are_quoted() {
        let mut r = record(1);
        r.penalty_minutes = "1,024".to_string();
        let bytes = render_csv(&[r]).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[6], "1,024");
    }

    #[test]
    fn test_export_writes_named_file() {
        let storage = MemoryStorage::default();
        let exporter = ReportExporter::default();

        tokio_test::block_on(exporter.export(&storage, &[record(1)])).unwrap();

        let files = storage.files.lock().unwrap();
        let data = files.get("PlayerStats.csv").unwrap();
        assert_eq!(String::from_utf8_lossy(data).lines().count(), 2);
    }
}
