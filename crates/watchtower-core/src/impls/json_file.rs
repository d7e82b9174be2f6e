//! JSON ファイルの読み書き（store と tree writer で共有）

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::WatchtowerError;

/// `value` を 2 スペースインデントで書き出す
///
/// 親ディレクトリは必要なら作成する。一時ファイルに書いてから rename するので、
/// 途中で落ちても既存ファイルは壊れない。
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), WatchtowerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| WatchtowerError::io(parent, e))?;
    }
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| WatchtowerError::json(path, e))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|e| WatchtowerError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| WatchtowerError::io(path, e))?;
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, WatchtowerError> {
    let bytes = fs::read(path).map_err(|e| WatchtowerError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| WatchtowerError::json(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pretty_json_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.json");

        write_json(&path, &serde_json::json!({ "k": [1] })).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"k\": [\n    1\n  ]\n}");
        assert!(!path.with_extension("json.tmp").exists());

        let back: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(back, serde_json::json!({ "k": [1] }));
    }

    #[test]
    fn read_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = read_json::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, WatchtowerError::Io { path: p, .. } if p == path));
    }
}
