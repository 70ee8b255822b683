//! 导出文档构建 - 业务能力层
//!
//! 只负责从会话状态生成导出文档，不写文件，不修改状态。

use crate::error::AppResult;
use crate::state::AnswerSheet;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// 导出文件名前缀
pub const FILE_NAME_PREFIX: &str = "respuestas_";
/// 姓名为空时使用的占位
pub const FALLBACK_STUDENT: &str = "estudiante";

/// 导出文件名：`respuestas_<姓名>.json`
///
/// 不做任何清洗，也不处理重名。
pub fn export_file_name(student_name: &str) -> String {
    let student = if student_name.is_empty() {
        FALLBACK_STUDENT
    } else {
        student_name
    };
    format!("{}{}.json", FILE_NAME_PREFIX, student)
}

/// 按插入顺序序列化的科目映射
///
/// JSON 对象的键顺序与考试配置顺序一致。
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectMap<V>(pub Vec<(String, V)>);

impl<V> SubjectMap<V> {
    pub fn get(&self, subject: &str) -> Option<&V> {
        self.0.iter().find(|(name, _)| name == subject).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(name, v)| (name.as_str(), v))
    }
}

impl<V: Serialize> Serialize for SubjectMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for SubjectMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SubjectMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for SubjectMapVisitor<V> {
            type Value = SubjectMap<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map keyed by subject name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, V>()? {
                    entries.push((name, value));
                }
                Ok(SubjectMap(entries))
            }
        }

        deserializer.deserialize_map(SubjectMapVisitor(PhantomData))
    }
}

/// 学生信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentInfo {
    #[serde(rename = "nombre")]
    pub name: String,
}

/// 单科摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    /// `"<start>-<end>"`
    #[serde(rename = "rango", default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(rename = "respondidas")]
    pub answered: usize,
    #[serde(rename = "sin_responder")]
    pub unanswered: usize,
}

/// 导出统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportStatistics {
    #[serde(rename = "total_preguntas")]
    pub total_questions: usize,
    #[serde(rename = "preguntas_respondidas")]
    pub answered: usize,
    #[serde(rename = "preguntas_sin_responder")]
    pub unanswered: usize,
    #[serde(rename = "por_materia")]
    pub by_subject: SubjectMap<SubjectSummary>,
}

/// 导出文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(rename = "informacion_estudiante")]
    pub student: StudentInfo,
    /// 题号序列化为字符串键
    #[serde(rename = "respuestas")]
    pub answers: SubjectMap<BTreeMap<u32, char>>,
    #[serde(rename = "estadisticas")]
    pub statistics: ExportStatistics,
}

impl ExportDocument {
    /// 从当前会话构建导出文档
    pub fn build(sheet: &AnswerSheet) -> Self {
        let stats = sheet.stats();

        let answers = sheet
            .answers()
            .map(|(spec, answers)| (spec.name.clone(), answers.clone()))
            .collect();

        let by_subject = stats
            .subjects
            .iter()
            .map(|s| {
                (
                    s.name.clone(),
                    SubjectSummary {
                        range: Some(s.range.to_string()),
                        answered: s.answered,
                        unanswered: s.unanswered,
                    },
                )
            })
            .collect();

        Self {
            student: StudentInfo {
                name: sheet.student_name().to_string(),
            },
            answers: SubjectMap(answers),
            statistics: ExportStatistics {
                total_questions: stats.total_questions,
                answered: stats.total_answered,
                unanswered: stats.total_unanswered,
                by_subject: SubjectMap(by_subject),
            },
        }
    }

    /// 导出文件名
    pub fn file_name(&self) -> String {
        export_file_name(&self.student.name)
    }

    /// 4 空格缩进的 JSON，非 ASCII 字符不转义
    pub fn to_json(&self) -> AppResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        let json = String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)?;
        Ok(json)
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExamConfig, SubjectEntry};
    use serde_json::Value;
    use std::sync::Arc;

    fn create_test_sheet() -> AnswerSheet {
        let config = ExamConfig::resolve(&ExamConfig::icfes_entries()).unwrap();
        AnswerSheet::new(Arc::new(config))
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name("Ana"), "respuestas_Ana.json");
        assert_eq!(export_file_name(""), "respuestas_estudiante.json");
        assert_eq!(export_file_name("a/b c"), "respuestas_a/b c.json");
    }

    #[test]
    fn test_document_shape() {
        let mut sheet = create_test_sheet();
        sheet.set_student_name("Sofía");
        sheet.set_answer("Matemáticas 1", 3, 'B').unwrap();
        sheet.set_answer("Lectura crítica", 40, 'D').unwrap();
        sheet.set_answer("Ciencias naturales 1", 1, 'A').unwrap();

        let json = ExportDocument::build(&sheet).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let root = value.as_object().unwrap();
        let keys: Vec<&str> = root.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(value["informacion_estudiante"]["nombre"], "Sofía");
        assert_eq!(value["respuestas"]["Matemáticas 1"]["3"], "B");
        assert_eq!(value["respuestas"]["Lectura crítica"]["40"], "D");
        assert_eq!(value["respuestas"]["Sociales y ciudadanas 1"], serde_json::json!({}));

        let stats = &value["estadisticas"];
        assert_eq!(stats["total_preguntas"], 110);
        assert_eq!(stats["preguntas_respondidas"], 3);
        assert_eq!(stats["preguntas_sin_responder"], 107);
        assert_eq!(stats["por_materia"]["Lectura crítica"]["rango"], "27-64");
        assert_eq!(stats["por_materia"]["Lectura crítica"]["respondidas"], 1);
        assert_eq!(stats["por_materia"]["Lectura crítica"]["sin_responder"], 37);
        assert_eq!(stats["por_materia"]["Ciencias naturales 1"]["rango"], "1-20");
    }

    #[test]
    fn test_json_is_indented_and_unescaped() {
        let mut sheet = create_test_sheet();
        sheet.set_student_name("José");

        let json = ExportDocument::build(&sheet).to_json().unwrap();
        assert!(json.contains("\n    \"informacion_estudiante\": {"));
        assert!(json.contains("José"));
        assert!(json.contains("Matemáticas 1"));
    }

    #[test]
    fn test_subject_order_follows_config() {
        let config = ExamConfig::resolve(&[
            SubjectEntry::counted("Zoología", 2, false),
            SubjectEntry::counted("Álgebra", 2, false),
            SubjectEntry::counted("Biología", 2, false),
        ])
        .unwrap();
        let sheet = AnswerSheet::new(Arc::new(config));

        let json = ExportDocument::build(&sheet).to_json().unwrap();
        let z = json.find("Zoología").unwrap();
        let a = json.find("Álgebra").unwrap();
        let b = json.find("Biología").unwrap();
        assert!(z < a && a < b);

        let parsed = ExportDocument::from_json(&json).unwrap();
        let names: Vec<&str> = parsed.answers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zoología", "Álgebra", "Biología"]);
    }

    #[test]
    fn test_round_trip_preserves_answers() {
        let mut sheet = create_test_sheet();
        sheet.set_answer("Matemáticas 1", 26, 'C').unwrap();
        sheet.set_answer("Sociales y ciudadanas 1", 65, 'A').unwrap();
        sheet.set_answer("Ciencias naturales 1", 20, 'D').unwrap();

        let document = ExportDocument::build(&sheet);
        let parsed = ExportDocument::from_json(&document.to_json().unwrap()).unwrap();

        assert_eq!(parsed, document);
        for (spec, answers) in sheet.answers() {
            assert_eq!(parsed.answers.get(&spec.name), Some(answers));
        }
    }

    #[test]
    fn test_build_does_not_mutate_state() {
        let mut sheet = create_test_sheet();
        sheet.set_answer("Matemáticas 1", 1, 'A').unwrap();

        let _ = ExportDocument::build(&sheet);
        assert_eq!(sheet.answer("Matemáticas 1", 1).unwrap(), Some('A'));
        assert_eq!(sheet.stats().total_answered, 1);
    }

    #[test]
    fn test_summary_without_range_parses() {
        let summary: SubjectSummary =
            serde_json::from_str(r#"{"respondidas": 2, "sin_responder": 3}"#).unwrap();
        assert_eq!(summary.range, None);
        assert!(!serde_json::to_string(&summary).unwrap().contains("rango"));
    }
}
