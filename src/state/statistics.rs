//! 作答统计
//!
//! 纯函数，每次读取时重新计算，不做缓存。

use super::{AnswerMap, AnswerSheet};
use crate::error::AppResult;
use crate::models::{QuestionRange, SubjectSpec};

/// 单科统计
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStats {
    pub name: String,
    pub range: QuestionRange,
    pub question_count: usize,
    pub answered: usize,
    pub unanswered: usize,
    /// 按选项集顺序的计数，未出现的选项为 0
    pub option_tally: Vec<(char, usize)>,
}

impl SubjectStats {
    fn compute(spec: &SubjectSpec, answers: &AnswerMap) -> Self {
        let question_count = spec.question_count();
        let answered = answers.len();
        let option_tally = spec
            .options
            .iter()
            .map(|&option| {
                let count = answers.values().filter(|&&chosen| chosen == option).count();
                (option, count)
            })
            .collect();

        Self {
            name: spec.name.clone(),
            range: spec.range,
            question_count,
            answered,
            unanswered: question_count - answered,
            option_tally,
        }
    }

    /// 某选项的计数
    pub fn tally(&self, option: char) -> usize {
        self.option_tally
            .iter()
            .find(|(label, _)| *label == option)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// 全部作答完成
    pub fn is_complete(&self) -> bool {
        self.answered == self.question_count
    }
}

/// 全局统计
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStats {
    pub total_questions: usize,
    pub total_answered: usize,
    pub total_unanswered: usize,
    /// 0.0 ~ 1.0；总题数为 0 时为 0
    pub progress_fraction: f64,
    /// 按配置顺序
    pub subjects: Vec<SubjectStats>,
}

impl AnswerSheet {
    /// 单科统计
    pub fn subject_stats(&self, subject: &str) -> AppResult<SubjectStats> {
        let index = self.subject_index(subject)?;
        Ok(SubjectStats::compute(
            &self.config.subjects()[index],
            &self.answers[index],
        ))
    }

    /// 全局统计
    pub fn stats(&self) -> SheetStats {
        let subjects: Vec<SubjectStats> = self
            .answers()
            .map(|(spec, answers)| SubjectStats::compute(spec, answers))
            .collect();

        let total_questions: usize = subjects.iter().map(|s| s.question_count).sum();
        let total_answered: usize = subjects.iter().map(|s| s.answered).sum();
        let progress_fraction = if total_questions == 0 {
            0.0
        } else {
            total_answered as f64 / total_questions as f64
        };

        SheetStats {
            total_questions,
            total_answered,
            total_unanswered: total_questions - total_answered,
            progress_fraction,
            subjects,
        }
    }
}
