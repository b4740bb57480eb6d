use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::info;

use crate::error::Result;
use crate::models::VideoRecord;

/// Artifact file name for a harvest date, e.g. `YT_data_2025-06-01.json`.
pub fn artifact_path(output_dir: &Path, date: NaiveDate) -> PathBuf {
    output_dir.join(format!("YT_data_{date}.json"))
}

/// Write all records for today's run. Two runs on the same calendar day
/// overwrite the same artifact.
pub fn save_records(output_dir: &Path, records: &[VideoRecord]) -> Result<PathBuf> {
    write_records(output_dir, Local::now().date_naive(), records)
}

/// Serialize the records as one pretty-printed JSON array and write it in a
/// single write-then-close. Non-ASCII text is kept verbatim.
pub fn write_records(
    output_dir: &Path,
    date: NaiveDate,
    records: &[VideoRecord],
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let path = artifact_path(output_dir, date);
    info!("Saving {} videos to {}", records.len(), path.display());

    let mut body = serde_json::to_vec_pretty(records).map_err(io::Error::other)?;
    body.push(b'\n');
    fs::write(&path, body)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn record(video_id: &str, title: &str, comment_count: Option<&str>) -> VideoRecord {
        VideoRecord {
            video_id: video_id.to_string(),
            title: title.to_string(),
            published_at: "2025-06-01T14:00:00Z".to_string(),
            duration: "PT5M30S".to_string(),
            view_count: Some("1234".to_string()),
            like_count: Some("56".to_string()),
            comment_count: comment_count.map(String::from),
        }
    }

    #[test]
    fn artifact_name_embeds_the_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let path = artifact_path(Path::new("./data"), date);
        assert_eq!(path, Path::new("./data/YT_data_2025-03-14.json"));
    }

    #[test]
    fn written_records_read_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let records = vec![
            record("v1", "Plain title", Some("7")),
            record("v2", "Überraschung — 日本語タイトル", None),
        ];

        let path = write_records(dir.path(), date, &records).unwrap();
        let body = fs::read_to_string(&path).unwrap();

        let parsed: Vec<VideoRecord> = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, records);

        // Non-ASCII stays verbatim, not \u-escaped.
        assert!(body.contains("日本語タイトル"));
    }

    #[test]
    fn disabled_statistic_is_written_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        let path = write_records(dir.path(), date, &[record("v1", "t", None)]).unwrap();
        let body = fs::read_to_string(&path).unwrap();

        let parsed: Value = serde_json::from_str(&body).unwrap();
        let first = parsed.as_array().unwrap()[0].as_object().unwrap();
        assert!(first.contains_key("commentCount"));
        assert!(first["commentCount"].is_null());
    }

    #[test]
    fn same_day_rerun_overwrites_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        write_records(dir.path(), date, &[record("v1", "first run", None)]).unwrap();
        let path = write_records(dir.path(), date, &[record("v2", "second run", None)]).unwrap();

        let parsed: Vec<VideoRecord> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].video_id, "v2");
    }

    #[test]
    fn empty_catalog_still_produces_an_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        let path = write_records(dir.path().join("nested").as_path(), date, &[]).unwrap();
        let parsed: Vec<VideoRecord> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }
}
