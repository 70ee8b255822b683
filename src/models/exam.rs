//! 考试结构配置
//!
//! 把有序的科目条目解析为带绝对题号范围的 [`SubjectSpec`] 序列。

use super::subject::{QuestionRange, SubjectSpec, DEFAULT_OPTIONS};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn default_options() -> Vec<char> {
    DEFAULT_OPTIONS.to_vec()
}

/// 配置文件中的单个科目条目
///
/// 两种写法可以混用：显式题号范围，或者题目数量（由游标推导范围）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectEntry {
    /// 显式范围
    Ranged {
        name: String,
        start: u32,
        end: u32,
        #[serde(default = "default_options")]
        options: Vec<char>,
    },
    /// 按数量推导范围
    Counted {
        name: String,
        questions: u32,
        #[serde(default)]
        restarts_numbering: bool,
        #[serde(default = "default_options")]
        options: Vec<char>,
    },
}

impl SubjectEntry {
    /// 使用默认选项集的计数条目
    pub fn counted(name: impl Into<String>, questions: u32, restarts_numbering: bool) -> Self {
        SubjectEntry::Counted {
            name: name.into(),
            questions,
            restarts_numbering,
            options: default_options(),
        }
    }

    /// 使用默认选项集的范围条目
    pub fn ranged(name: impl Into<String>, start: u32, end: u32) -> Self {
        SubjectEntry::Ranged {
            name: name.into(),
            start,
            end,
            options: default_options(),
        }
    }

    /// 替换选项集
    pub fn with_options(mut self, labels: impl IntoIterator<Item = char>) -> Self {
        let labels: Vec<char> = labels.into_iter().collect();
        match &mut self {
            SubjectEntry::Ranged { options, .. } | SubjectEntry::Counted { options, .. } => {
                *options = labels;
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            SubjectEntry::Ranged { name, .. } | SubjectEntry::Counted { name, .. } => name,
        }
    }

    fn options(&self) -> &[char] {
        match self {
            SubjectEntry::Ranged { options, .. } | SubjectEntry::Counted { options, .. } => options,
        }
    }
}

/// 配置文件根结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamDefinition {
    pub subjects: Vec<SubjectEntry>,
}

/// 整场考试的科目配置，按顺序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamConfig {
    subjects: Vec<SubjectSpec>,
}

impl ExamConfig {
    /// 解析科目条目
    ///
    /// 游标从 1 开始。重新编号的科目使用 `1..=n` 且不推进游标；
    /// 其他计数科目占用 `cursor..=cursor+n-1` 并推进游标；
    /// 显式范围科目把游标推到 `end + 1`（若更大）。
    pub fn resolve(entries: &[SubjectEntry]) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyExam);
        }

        let mut cursor = 1u32;
        let mut seen = HashSet::new();
        let mut subjects = Vec::with_capacity(entries.len());

        for entry in entries {
            let name = entry.name().to_string();
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateSubject { name });
            }

            let options = validate_options(&name, entry.options())?;

            let (range, restarts_numbering) = match entry {
                SubjectEntry::Counted {
                    questions,
                    restarts_numbering,
                    ..
                } => {
                    if *questions == 0 {
                        return Err(ConfigError::EmptySubject { name });
                    }
                    if *restarts_numbering {
                        (QuestionRange::new(1, *questions), true)
                    } else {
                        let Some(next) = cursor.checked_add(*questions) else {
                            return Err(ConfigError::RangeOverflow { name });
                        };
                        let range = QuestionRange::new(cursor, next - 1);
                        cursor = next;
                        (range, false)
                    }
                }
                SubjectEntry::Ranged { start, end, .. } => {
                    if *start == 0 || start > end {
                        return Err(ConfigError::InvalidRange {
                            name,
                            start: *start,
                            end: *end,
                        });
                    }
                    let Some(next) = end.checked_add(1) else {
                        return Err(ConfigError::RangeOverflow { name });
                    };
                    cursor = cursor.max(next);
                    (QuestionRange::new(*start, *end), false)
                }
            };

            subjects.push(SubjectSpec {
                name,
                options,
                range,
                restarts_numbering,
            });
        }

        Ok(Self { subjects })
    }

    /// 内置的 ICFES 模拟考结构
    pub fn icfes_entries() -> Vec<SubjectEntry> {
        vec![
            SubjectEntry::counted("Matemáticas 1", 26, false),
            SubjectEntry::counted("Lectura crítica", 38, false),
            SubjectEntry::counted("Sociales y ciudadanas 1", 26, false),
            // 重新从 1 开始编号
            SubjectEntry::counted("Ciencias naturales 1", 20, true),
        ]
    }

    pub fn subjects(&self) -> &[SubjectSpec] {
        &self.subjects
    }

    /// 第一个科目（resolve 保证非空）
    pub fn first(&self) -> &SubjectSpec {
        &self.subjects[0]
    }

    pub fn get(&self, name: &str) -> Option<&SubjectSpec> {
        self.subjects.iter().find(|s| s.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.subjects.iter().position(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// 总题数：各科目自身题数之和（重新编号的科目题号可以与其他科目重叠）
    pub fn total_questions(&self) -> usize {
        self.subjects.iter().map(SubjectSpec::question_count).sum()
    }
}

fn validate_options(name: &str, options: &[char]) -> Result<Vec<char>, ConfigError> {
    if options.is_empty() {
        return Err(ConfigError::EmptyOptionSet {
            name: name.to_string(),
        });
    }
    let mut seen = HashSet::new();
    for &option in options {
        if !seen.insert(option) {
            return Err(ConfigError::DuplicateOption {
                name: name.to_string(),
                option,
            });
        }
    }
    Ok(options.to_vec())
}
