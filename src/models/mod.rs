pub mod exam;
pub mod loaders;
pub mod subject;

pub use exam::{ExamConfig, ExamDefinition, SubjectEntry};
pub use loaders::{load_exam_config, load_exam_config_or_default, parse_exam_config};
pub use subject::{QuestionRange, SubjectSpec, DEFAULT_OPTIONS};
