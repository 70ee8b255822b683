//! JSON 导出服务 - 业务能力层
//!
//! 只负责"把导出文档写到磁盘"，不关心文档如何生成

use crate::error::{AppError, AppResult, FileError};
use crate::services::export_service::ExportDocument;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// JSON 导出服务
///
/// 职责：
/// - 把导出文档写入输出目录
/// - 目录不存在时自动创建
/// - 同名文件直接覆盖
/// - 文件名含路径分隔符时拒绝写入
pub struct JsonExporter {
    output_dir: PathBuf,
}

impl JsonExporter {
    /// 使用指定输出目录创建
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 写入导出文档
    ///
    /// # 返回
    /// 写入的文件路径
    pub async fn save(&self, document: &ExportDocument) -> AppResult<PathBuf> {
        let file_name = document.file_name();
        // 只写入 output_dir 本身
        if file_name.contains(['/', '\\']) {
            return Err(FileError::InvalidFileName { name: file_name }.into());
        }

        let json = document.to_json()?;
        let path = self.output_dir.join(&file_name);

        debug!("写入导出文件: {} ({} 字节)", path.display(), json.len());

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        fs::write(&path, json)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        info!(
            "💾 已导出: {} (已答 {}/{})",
            path.display(),
            document.statistics.answered,
            document.statistics.total_questions
        );

        Ok(path)
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new("output")
    }
}
