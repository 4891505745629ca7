use csv_lens_common::Result;
use serde::Serialize;
use std::path::Path;

/// Writes any profile bundle as pretty-printed JSON.
pub fn export_json<T: Serialize>(output_path: &Path, doc: &T) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, doc)
        .map_err(|e| csv_lens_common::CsvLensError::Other(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_csv_bytes;
    use crate::profile::DatasetProfile;

    #[test]
    fn writes_readable_json() {
        let table = load_csv_bytes(b"a\n1\n2\n").unwrap();
        let profile = DatasetProfile::from_table(&table);
        let tmp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        export_json(tmp.path(), &profile).unwrap();
        let text = std::fs::read_to_string(tmp.path()).unwrap();
        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back["n_rows"], 2);
    }
}
