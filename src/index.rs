//! Index serialization (`spec.md` §6). An external collaborator to the core
//! engine, consuming the records it produces; generalized from
//! `examples/original_source/a.py`'s `_write_indexes`.

use std::fs;
use std::path::Path;

use crate::error::{CarveError, Result};
use crate::record::CarveRecord;

pub fn write_json(out_dir: &Path, records: &[CarveRecord]) -> Result<()> {
    let path = out_dir.join("index.json");
    let payload = serde_json::to_string_pretty(records)
        .map_err(|source| CarveError::Serialize { path: path.clone(), source })?;
    fs::write(&path, payload).map_err(|source| CarveError::IoWrite { path, source })
}

pub fn write_csv(out_dir: &Path, records: &[CarveRecord]) -> Result<()> {
    let path = out_dir.join("index.csv");
    let mut out = String::from("fmt,start,end,size,validated,out_path,embedded_parent,notes\n");
    for r in records {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            r.format,
            r.start,
            r.end,
            r.size,
            r.validated as u8,
            r.out_path,
            r.embedded_parent.as_deref().unwrap_or(""),
            r.notes.as_deref().unwrap_or(""),
        ));
    }
    fs::write(&path, out).map_err(|source| CarveError::IoWrite { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CarveRecord {
        CarveRecord {
            format: "jpeg".to_string(),
            start: 0,
            end: 106,
            size: 106,
            out_path: "carved/jpeg_000000000000.jpg".to_string(),
            validated: true,
            embedded_parent: None,
            notes: None,
        }
    }

    #[test]
    fn csv_has_expected_header_and_empty_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), &[sample()]).unwrap();
        let content = fs::read_to_string(dir.path().join("index.csv")).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "fmt,start,end,size,validated,out_path,embedded_parent,notes"
        );
        assert_eq!(
            lines.next().unwrap(),
            "jpeg,0,106,106,1,carved/jpeg_000000000000.jpg,,"
        );
    }

    #[test]
    fn json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), &[sample()]).unwrap();
        let content = fs::read_to_string(dir.path().join("index.json")).unwrap();
        let parsed: Vec<CarveRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].format, "jpeg");
        assert!(parsed[0].embedded_parent.is_none());
    }

    #[test]
    fn json_preserves_null_for_absent_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), &[sample()]).unwrap();
        let content = fs::read_to_string(dir.path().join("index.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let obj = &value[0];
        assert_eq!(obj.get("embedded_parent"), Some(&serde_json::Value::Null));
        assert_eq!(obj.get("notes"), Some(&serde_json::Value::Null));
    }
}
