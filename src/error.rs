use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 操作参数不在考试配置范围内
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 考试配置无效
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 导出文档编码/解析失败
    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
    /// 终端命令无法解析
    #[error("命令错误: {0}")]
    Command(String),
}

/// 校验错误
///
/// 所有变更操作在失败时都不会修改状态
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("未知科目: {subject}")]
    UnknownSubject { subject: String },
    #[error("题号 {question} 不在科目 {subject} 的范围 {start}-{end} 内")]
    QuestionOutOfRange {
        subject: String,
        question: u32,
        start: u32,
        end: u32,
    },
    #[error("选项 {option} 不属于科目 {subject} 的选项集 {allowed:?}")]
    InvalidOption {
        subject: String,
        option: char,
        allowed: Vec<char>,
    },
}

/// 考试配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("考试配置中没有任何科目")]
    EmptyExam,
    #[error("科目名称重复: {name}")]
    DuplicateSubject { name: String },
    #[error("科目 {name} 的题目数量必须大于 0")]
    EmptySubject { name: String },
    #[error("科目 {name} 的题号范围无效: {start}-{end}")]
    InvalidRange { name: String, start: u32, end: u32 },
    #[error("科目 {name} 的题号超出可表示范围")]
    RangeOverflow { name: String },
    #[error("科目 {name} 的选项集为空")]
    EmptyOptionSet { name: String },
    #[error("科目 {name} 的选项重复: {option}")]
    DuplicateOption { name: String, option: char },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("导出文件名无效: {name}")]
    InvalidFileName { name: String },
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建未知科目错误
    pub fn unknown_subject(subject: impl Into<String>) -> Self {
        AppError::Validation(ValidationError::UnknownSubject {
            subject: subject.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建命令解析错误
    pub fn command(message: impl Into<String>) -> Self {
        AppError::Command(message.into())
    }

    /// 是否为校验错误
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
