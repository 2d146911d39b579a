use crate::error::{AppError, AppResult, FileError};
use crate::models::options::CompareOptions;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载比对选项
pub async fn load_compare_options(toml_file_path: &Path) -> AppResult<CompareOptions> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(toml_file_path.display().to_string(), e))?;

    let options: CompareOptions = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
        path: toml_file_path.display().to_string(),
        source: e,
    })?;

    tracing::info!(
        "已加载比对选项: {} (模式: {})",
        toml_file_path.display(),
        options.mode
    );

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::options::CompareMode;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_compare_options_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
mode = "legacy_html"
includeFormatting = false
ocr = true
shingle_size = 5
jaccard_threshold = 0.8
"#
        )
        .unwrap();

        let options = load_compare_options(file.path()).await.unwrap();
        assert_eq!(options.mode, CompareMode::LegacyHtml);
        assert!(!options.include_formatting);
        assert!(options.ocr);
        assert_eq!(options.shingle_size, Some(5));
        assert_eq!(options.jaccard_threshold, Some(0.8));
        assert_eq!(options.min_move_span_tokens, None);
    }

    #[tokio::test]
    async fn test_missing_fields_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ocr = true").unwrap();

        let options = load_compare_options(file.path()).await.unwrap();
        assert_eq!(options.mode, CompareMode::DocxOoxml);
        assert!(options.include_formatting);
    }

    #[tokio::test]
    async fn test_invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = [").unwrap();

        let err = load_compare_options(file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::File(FileError::TomlParseFailed { .. })
        ));
    }
}
