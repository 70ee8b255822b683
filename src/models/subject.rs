use serde::{Deserialize, Serialize};
use std::fmt;

/// 默认选项集
pub const DEFAULT_OPTIONS: [char; 4] = ['A', 'B', 'C', 'D'];

/// 题号范围（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionRange {
    pub start: u32,
    pub end: u32,
}

impl QuestionRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// 题目数量
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, question: u32) -> bool {
        (self.start..=self.end).contains(&question)
    }

    /// 按顺序遍历题号
    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl fmt::Display for QuestionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// 科目定义
///
/// 加载后不可变。`range` 已经是解析后的绝对题号范围。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSpec {
    /// 科目名称（唯一）
    pub name: String,
    /// 可选答案标签，有序
    pub options: Vec<char>,
    /// 解析后的题号范围
    pub range: QuestionRange,
    /// 是否从 1 重新编号
    pub restarts_numbering: bool,
}

impl SubjectSpec {
    /// 题目数量
    pub fn question_count(&self) -> usize {
        self.range.len()
    }

    pub fn has_option(&self, option: char) -> bool {
        self.options.contains(&option)
    }
}

impl fmt::Display for SubjectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.range)
    }
}
