//! 终端答题会话
//!
//! 扮演视图角色：读取一行命令 → 调用 AnswerSheet 的同步操作 → 重新渲染。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::load_exam_config_or_default;
use crate::services::{ExportDocument, JsonExporter};
use crate::state::AnswerSheet;
use crate::utils::logging;
use crate::view_models::SheetView;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

pub const HELP: &str = "\
Comandos:
  materia <nombre|número>   cambiar de materia
  <pregunta> <opción>       marcar respuesta (ej. 12 B)
  nombre <texto>            nombre del estudiante
  limpiar                   limpiar respuestas de esta materia
  limpiar todo              limpiar todas las respuestas
  resumen                   resumen de respuestas de esta materia
  exportar                  generar archivo JSON
  ayuda                     mostrar esta ayuda
  salir                     terminar";

/// 科目引用：名称或从 1 开始的序号
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectRef {
    Name(String),
    Position(usize),
}

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    SwitchSubject(SubjectRef),
    Answer { question: u32, option: char },
    SetName(String),
    ClearSubject,
    ClearAll,
    Summary,
    Export,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入
    pub fn parse(line: &str) -> AppResult<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Show);
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        if let Ok(question) = head.parse::<u32>() {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(option), None) => Ok(Command::Answer {
                    question,
                    option: option.to_ascii_uppercase(),
                }),
                _ => Err(AppError::command(format!("opción inválida: '{}'", rest))),
            };
        }

        match head.to_lowercase().as_str() {
            "materia" if rest.is_empty() => Err(AppError::command("falta la materia")),
            "materia" => Ok(Command::SwitchSubject(match rest.parse::<usize>() {
                Ok(position) => SubjectRef::Position(position),
                Err(_) => SubjectRef::Name(rest.to_string()),
            })),
            "nombre" => Ok(Command::SetName(rest.to_string())),
            "limpiar" => match rest.to_lowercase().as_str() {
                "" => Ok(Command::ClearSubject),
                "todo" => Ok(Command::ClearAll),
                other => Err(AppError::command(format!("no se puede limpiar '{}'", other))),
            },
            "resumen" => Ok(Command::Summary),
            "exportar" => Ok(Command::Export),
            "ayuda" => Ok(Command::Help),
            "salir" => Ok(Command::Quit),
            other => Err(AppError::command(format!("comando desconocido: '{}'", other))),
        }
    }
}

/// 命令处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 状态已变化或需要重绘
    Render,
    Text(String),
    Quit,
}

/// 应用主结构
pub struct App {
    sheet: AnswerSheet,
    exporter: JsonExporter,
}

impl App {
    /// 初始化应用：加载考试结构并创建会话
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let exam = load_exam_config_or_default(Path::new(&config.exam_config_path)).await?;
        logging::log_startup(&exam);

        Ok(Self {
            sheet: AnswerSheet::new(Arc::new(exam)),
            exporter: JsonExporter::new(&config.output_dir),
        })
    }

    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    /// 执行一条命令；失败时会话状态不变
    pub async fn handle(&mut self, command: Command) -> AppResult<Reply> {
        match command {
            Command::Show => Ok(Reply::Render),
            Command::SwitchSubject(subject) => {
                let name = self.resolve_subject(subject)?;
                self.sheet.set_current_subject(&name)?;
                Ok(Reply::Render)
            }
            Command::Answer { question, option } => {
                self.sheet.select_answer(question, option)?;
                Ok(Reply::Render)
            }
            Command::SetName(name) => {
                self.sheet.set_student_name(name);
                Ok(Reply::Render)
            }
            Command::ClearSubject => {
                let name = self.sheet.current_subject().name.clone();
                self.sheet.clear_subject(&name)?;
                Ok(Reply::Render)
            }
            Command::ClearAll => {
                self.sheet.clear_all();
                Ok(Reply::Render)
            }
            Command::Summary => Ok(Reply::Text(render_summary(&SheetView::build(&self.sheet)))),
            Command::Export => {
                let document = ExportDocument::build(&self.sheet);
                let path = self.exporter.save(&document).await?;
                Ok(Reply::Text(format!(
                    "✅ Archivo JSON generado correctamente: {}",
                    path.display()
                )))
            }
            Command::Help => Ok(Reply::Text(HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    /// 运行标准输入循环
    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("{}", render_sheet(&SheetView::build(&self.sheet)));
        println!("{}", HELP);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let reply = match Command::parse(&line) {
                Ok(command) => self.handle(command).await,
                Err(e) => Err(e),
            };

            match reply {
                Ok(Reply::Render) => println!("{}", render_sheet(&SheetView::build(&self.sheet))),
                Ok(Reply::Text(text)) => println!("{}", text),
                Ok(Reply::Quit) => break,
                Err(e) => {
                    warn!("⚠️ 操作被拒绝: {}", e);
                    println!("❌ {}", e);
                }
            }
        }

        logging::log_session_end(&self.sheet.stats());
        Ok(())
    }

    fn resolve_subject(&self, subject: SubjectRef) -> AppResult<String> {
        match subject {
            SubjectRef::Name(name) => Ok(name),
            SubjectRef::Position(position) => position
                .checked_sub(1)
                .and_then(|i| self.sheet.config().subjects().get(i))
                .map(|spec| spec.name.clone())
                .ok_or_else(|| AppError::unknown_subject(position.to_string())),
        }
    }
}

/// 渲染整张答题卡
pub fn render_sheet(view: &SheetView) -> String {
    let name = if view.student_name.is_empty() { "-" } else { &view.student_name };

    let mut lines = vec![
        "=".repeat(60),
        format!("HOJA DE RESPUESTAS | NOMBRE: {}", name),
        "=".repeat(60),
    ];
    for entry in &view.sidebar {
        let pointer = if entry.active { ">" } else { " " };
        lines.push(format!("{} {}  [{}]", pointer, entry.label(), entry.range));
    }
    lines.push(format!(
        "Progreso total: {}/{} ({:.0}%)",
        view.total_answered,
        view.total_questions,
        view.progress * 100.0
    ));
    lines.push("─".repeat(60));
    lines.push(format!("{} | {}", view.current.name, view.current.range_label));

    for row in &view.current.rows {
        let buttons: String = view
            .current
            .options
            .iter()
            .map(|&option| {
                if row.selected == Some(option) {
                    format!("[{}]", option)
                } else {
                    format!(" {} ", option)
                }
            })
            .collect();
        lines.push(format!("{:>4}  {}", row.number, buttons));
    }
    lines.push(format!("Preguntas respondidas: {}", view.current.counter_label()));
    lines.join("\n")
}

/// 渲染当前科目的选项统计
pub fn render_summary(view: &SheetView) -> String {
    std::iter::once(format!("📊 Resumen de Respuestas - {}", view.current.name))
        .chain(
            view.current
                .option_tally
                .iter()
                .map(|(option, count)| format!("  Opción {}: {}", option, count)),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("").unwrap(), Command::Show);
        assert_eq!(
            Command::parse("12 b").unwrap(),
            Command::Answer { question: 12, option: 'B' }
        );
        assert_eq!(
            Command::parse("materia Lectura crítica").unwrap(),
            Command::SwitchSubject(SubjectRef::Name("Lectura crítica".to_string()))
        );
        assert_eq!(
            Command::parse("materia 2").unwrap(),
            Command::SwitchSubject(SubjectRef::Position(2))
        );
        assert_eq!(
            Command::parse("nombre  Ana María ").unwrap(),
            Command::SetName("Ana María".to_string())
        );
        assert_eq!(Command::parse("nombre").unwrap(), Command::SetName(String::new()));
        assert_eq!(Command::parse("limpiar").unwrap(), Command::ClearSubject);
        assert_eq!(Command::parse("LIMPIAR TODO").unwrap(), Command::ClearAll);
        assert_eq!(Command::parse("resumen").unwrap(), Command::Summary);
        assert_eq!(Command::parse("exportar").unwrap(), Command::Export);
        assert_eq!(Command::parse("salir").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!(Command::parse("12"), Err(AppError::Command(_))));
        assert!(matches!(Command::parse("12 AB"), Err(AppError::Command(_))));
        assert!(matches!(Command::parse("materia"), Err(AppError::Command(_))));
        assert!(matches!(Command::parse("limpiar algo"), Err(AppError::Command(_))));
        assert!(matches!(Command::parse("bailar"), Err(AppError::Command(_))));
    }

    async fn create_test_app(output_dir: &Path) -> App {
        let config = Config {
            exam_config_path: "does/not/exist.toml".to_string(),
            output_dir: output_dir.display().to_string(),
            verbose_logging: false,
        };
        App::initialize(config).await.unwrap()
    }

    #[tokio::test]
    async fn test_handle_session_flow() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = create_test_app(tmp.path()).await;

        app.handle(Command::parse("nombre Ana").unwrap()).await.unwrap();
        app.handle(Command::parse("3 c").unwrap()).await.unwrap();
        app.handle(Command::parse("materia 4").unwrap()).await.unwrap();
        app.handle(Command::parse("1 a").unwrap()).await.unwrap();

        assert_eq!(app.sheet().current_subject().name, "Ciencias naturales 1");
        assert_eq!(app.sheet().answer("Matemáticas 1", 3).unwrap(), Some('C'));
        assert_eq!(app.sheet().answer("Ciencias naturales 1", 1).unwrap(), Some('A'));

        let reply = app.handle(Command::Export).await.unwrap();
        assert!(matches!(reply, Reply::Text(ref text) if text.contains("respuestas_Ana.json")));
        assert!(tmp.path().join("respuestas_Ana.json").exists());

        assert_eq!(app.handle(Command::Quit).await.unwrap(), Reply::Quit);
    }

    #[tokio::test]
    async fn test_rejected_commands_keep_state() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = create_test_app(tmp.path()).await;

        assert!(app.handle(Command::parse("materia 9").unwrap()).await.is_err());
        assert!(app.handle(Command::parse("materia 0").unwrap()).await.is_err());
        assert!(app.handle(Command::parse("27 A").unwrap()).await.is_err());
        assert!(app.handle(Command::parse("1 E").unwrap()).await.is_err());

        assert_eq!(app.sheet().current_subject().name, "Matemáticas 1");
        assert_eq!(app.sheet().stats().total_answered, 0);
    }

    #[tokio::test]
    async fn test_render_marks_selection_and_summary() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = create_test_app(tmp.path()).await;
        app.handle(Command::parse("2 D").unwrap()).await.unwrap();

        let rendered = render_sheet(&SheetView::build(app.sheet()));
        assert!(rendered.contains("   2   A  B  C [D]"));
        assert!(rendered.contains("> 📝 Matemáticas 1 (1/26)  [1-26]"));
        assert!(rendered.contains("Preguntas respondidas: 1/26"));

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3 + 4 + 3 + 26 + 1);
        assert_eq!(lines[3], "> 📝 Matemáticas 1 (1/26)  [1-26]");
        assert_eq!(lines.last(), Some(&"Preguntas respondidas: 1/26"));

        match app.handle(Command::Summary).await.unwrap() {
            Reply::Text(text) => {
                assert_eq!(text.lines().count(), 5);
                assert!(text.contains("\n  Opción D: 1"));
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }
}
