//! # Answer Sheet
//!
//! 模拟考试的电子答题卡：按科目选择选项、跟踪进度、导出 JSON
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 考试结构（科目、题号范围、选项集）及 TOML 加载
//! - `ExamConfig::resolve` - 用游标把科目条目解析为绝对题号范围
//!
//! ### ② 状态层（State）
//! - `state/` - 单个会话独占的 `AnswerSheet`
//! - 变更：作答、清空科目、清空全部、切换科目、设置姓名
//! - 查询与统计：每次读取时重新计算
//!
//! ### ③ 业务能力层（Services）
//! - `ExportDocument` - 生成导出文档（纯函数）
//! - `JsonExporter` - 把文档写入输出目录
//!
//! ### ④ 视图层（App）
//! - `view_models` - 只读渲染模型
//! - `app` - 终端会话，读命令 → 改状态 → 重绘
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod view_models;

// 重新导出常用类型
pub use app::{App, Command};
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, FileError, ValidationError};
pub use models::{ExamConfig, QuestionRange, SubjectEntry, SubjectSpec};
pub use services::{ExportDocument, JsonExporter};
pub use state::{AnswerSheet, SheetStats, SubjectStats};
pub use view_models::SheetView;
