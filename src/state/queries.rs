use super::{AnswerMap, AnswerSheet};
use crate::error::{AppResult, ValidationError};
use crate::models::{ExamConfig, SubjectSpec};

impl AnswerSheet {
    pub fn config(&self) -> &ExamConfig {
        &self.config
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    /// 当前科目
    pub fn current_subject(&self) -> &SubjectSpec {
        &self.config.subjects()[self.current]
    }

    /// 某题当前的选项，未作答返回 `None`
    pub fn answer(&self, subject: &str, question: u32) -> AppResult<Option<char>> {
        let index = self.subject_index(subject)?;
        Ok(self.answers[index].get(&question).copied())
    }

    /// 某科目的作答映射
    pub fn subject_answers(&self, subject: &str) -> AppResult<&AnswerMap> {
        let index = self.subject_index(subject)?;
        Ok(&self.answers[index])
    }

    /// 按配置顺序遍历 (科目, 作答映射)
    pub fn answers(&self) -> impl Iterator<Item = (&SubjectSpec, &AnswerMap)> {
        self.config.subjects().iter().zip(self.answers.iter())
    }

    pub(super) fn subject_index(&self, subject: &str) -> Result<usize, ValidationError> {
        self.config
            .index_of(subject)
            .ok_or_else(|| ValidationError::UnknownSubject {
                subject: subject.to_string(),
            })
    }
}
