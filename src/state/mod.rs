//! 答题卡会话状态
//!
//! 每个会话独占一个 [`AnswerSheet`]，没有全局单例。
//! 变更操作见 `actions`，只读查询见 `queries`，统计见 `statistics`。

mod actions;
mod queries;
mod statistics;

pub use statistics::{SheetStats, SubjectStats};

use crate::models::ExamConfig;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 单个科目的作答映射：题号 -> 选项
pub type AnswerMap = BTreeMap<u32, char>;

/// 答题卡状态
#[derive(Debug, Clone)]
pub struct AnswerSheet {
    config: Arc<ExamConfig>,
    student_name: String,
    /// 当前科目在配置中的下标
    current: usize,
    /// 与 `config.subjects()` 一一对应；空映射表示全部未作答
    answers: Vec<AnswerMap>,
}

impl AnswerSheet {
    /// 创建新会话，当前科目默认为第一个科目
    pub fn new(config: Arc<ExamConfig>) -> Self {
        let answers = vec![AnswerMap::new(); config.len()];
        Self {
            config,
            student_name: String::new(),
            current: 0,
            answers,
        }
    }
}
