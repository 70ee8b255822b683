use super::AnswerSheet;
use crate::error::{AppResult, ValidationError};
use tracing::{debug, info};

impl AnswerSheet {
    /// 设置某科目某题的答案
    ///
    /// 科目、题号和选项都必须属于配置；失败时状态不变。
    /// 重复设置相同的值没有可观察的效果。
    pub fn set_answer(&mut self, subject: &str, question: u32, option: char) -> AppResult<()> {
        let index = self.subject_index(subject)?;
        let spec = &self.config.subjects()[index];

        if !spec.range.contains(question) {
            return Err(ValidationError::QuestionOutOfRange {
                subject: spec.name.clone(),
                question,
                start: spec.range.start,
                end: spec.range.end,
            }
            .into());
        }
        if !spec.has_option(option) {
            return Err(ValidationError::InvalidOption {
                subject: spec.name.clone(),
                option,
                allowed: spec.options.clone(),
            }
            .into());
        }

        debug!("作答: {} 第 {} 题 -> {}", subject, question, option);
        self.answers[index].insert(question, option);
        Ok(())
    }

    /// 在当前科目上作答
    pub fn select_answer(&mut self, question: u32, option: char) -> AppResult<()> {
        let subject = self.current_subject().name.clone();
        self.set_answer(&subject, question, option)
    }

    /// 清空某科目的全部作答
    pub fn clear_subject(&mut self, subject: &str) -> AppResult<()> {
        let index = self.subject_index(subject)?;
        info!("🗑️ 清空科目: {}", subject);
        self.answers[index].clear();
        Ok(())
    }

    /// 清空所有科目
    pub fn clear_all(&mut self) {
        info!("🗑️ 清空全部作答");
        self.answers.iter_mut().for_each(|answers| answers.clear());
    }

    /// 切换当前科目，不影响作答
    pub fn set_current_subject(&mut self, subject: &str) -> AppResult<()> {
        self.current = self.subject_index(subject)?;
        info!("📚 切换科目: {}", subject);
        Ok(())
    }

    /// 设置学生姓名，允许为空
    pub fn set_student_name(&mut self, name: impl Into<String>) {
        self.student_name = name.into();
    }
}
