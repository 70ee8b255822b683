use crate::error::{AppError, AppResult, FileError};
use crate::models::exam::{ExamConfig, ExamDefinition};
use std::path::Path;
use tokio::fs;

/// 从 TOML 字符串解析考试配置
pub fn parse_exam_config(content: &str, origin: &str) -> AppResult<ExamConfig> {
    let definition: ExamDefinition =
        toml::from_str(content).map_err(|source| FileError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })?;

    Ok(ExamConfig::resolve(&definition.subjects)?)
}

/// 从 TOML 文件加载考试配置
pub async fn load_exam_config(toml_file_path: &Path) -> AppResult<ExamConfig> {
    let origin = toml_file_path.display().to_string();

    if !fs::try_exists(toml_file_path).await.unwrap_or(false) {
        return Err(FileError::NotFound { path: origin }.into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&origin, e))?;

    let config = parse_exam_config(&content, &origin)?;
    tracing::info!(
        "成功加载考试配置 {}: {} 个科目, 共 {} 题",
        origin,
        config.len(),
        config.total_questions()
    );

    Ok(config)
}

/// 加载考试配置；文件不存在时回退到内置 ICFES 结构
///
/// 文件存在但内容无效时仍然返回错误。
pub async fn load_exam_config_or_default(toml_file_path: &Path) -> AppResult<ExamConfig> {
    match load_exam_config(toml_file_path).await {
        Err(AppError::File(FileError::NotFound { path })) => {
            tracing::warn!("⚠️ 考试配置文件不存在: {}，使用内置结构", path);
            Ok(ExamConfig::resolve(&ExamConfig::icfes_entries())?)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_parse_reports_config_errors() {
        let err = parse_exam_config(
            r#"
            [[subjects]]
            name = "M"
            questions = 0
            "#,
            "inline",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            AppError::Config(ConfigError::EmptySubject { .. })
        ));
    }

    #[test]
    fn test_parse_reports_toml_errors_with_origin() {
        let err = parse_exam_config("subjects = 3", "exam.toml").unwrap_err();
        match err {
            AppError::File(FileError::TomlParseFailed { path, .. }) => {
                assert_eq!(path, "exam.toml")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_existing_file_does_not_fall_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("exam.toml");
        std::fs::write(&path, "[[subjects]]\nname = \"M\"\nquestions = 0\n").unwrap();

        let err = load_exam_config_or_default(&path).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::EmptySubject { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_preset() {
        let config = load_exam_config_or_default(Path::new("does/not/exist.toml"))
            .await
            .unwrap();
        assert_eq!(config.len(), 4);
        assert_eq!(config.total_questions(), 110);
    }
}
