//! 视图只读模型
//!
//! 渲染层只读取这些结构，所有修改都经由 AnswerSheet。

use crate::state::{AnswerSheet, SubjectStats};

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionRow {
    pub number: u32,
    pub selected: Option<char>, // None = 未作答
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubjectPanel {
    pub name: String,
    pub range_label: String,
    pub options: Vec<char>,
    pub rows: Vec<QuestionRow>,
    pub answered: usize,
    pub total: usize,
    pub option_tally: Vec<(char, usize)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SidebarEntry {
    pub name: String,
    pub range: String,
    pub answered: usize,
    pub total: usize,
    pub active: bool,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SheetView {
    pub student_name: String,
    pub current: SubjectPanel,
    pub sidebar: Vec<SidebarEntry>,
    pub total_answered: usize,
    pub total_questions: usize,
    pub progress: f64,
}

impl SidebarEntry {
    pub fn label(&self) -> String {
        let marker = if self.completed { "✅" } else { "📝" };
        format!("{} {} ({}/{})", marker, self.name, self.answered, self.total)
    }
}

impl SubjectPanel {
    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.answered, self.total)
    }
}

impl SheetView {
    pub fn build(sheet: &AnswerSheet) -> Self {
        let stats = sheet.stats();
        let current_spec = sheet.current_subject();

        let sidebar = stats
            .subjects
            .iter()
            .map(|s| SidebarEntry {
                name: s.name.clone(),
                range: s.range.to_string(),
                answered: s.answered,
                total: s.question_count,
                active: s.name == current_spec.name,
                completed: s.is_complete(),
            })
            .collect();

        let current_stats: Option<&SubjectStats> =
            stats.subjects.iter().find(|s| s.name == current_spec.name);
        let answers = sheet.answers().find(|(spec, _)| spec.name == current_spec.name);

        let rows = current_spec
            .range
            .iter()
            .map(|number| QuestionRow {
                number,
                selected: answers.and_then(|(_, a)| a.get(&number).copied()),
            })
            .collect();

        let current = SubjectPanel {
            name: current_spec.name.clone(),
            range_label: format!("Preguntas {}", current_spec.range),
            options: current_spec.options.clone(),
            rows,
            answered: current_stats.map(|s| s.answered).unwrap_or(0),
            total: current_spec.question_count(),
            option_tally: current_stats
                .map(|s| s.option_tally.clone())
                .unwrap_or_default(),
        };

        Self {
            student_name: sheet.student_name().to_string(),
            current,
            sidebar,
            total_answered: stats.total_answered,
            total_questions: stats.total_questions,
            progress: stats.progress_fraction,
        }
    }
}
