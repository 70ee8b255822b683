/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use crate::models::ExamConfig;
use crate::state::SheetStats;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 `info`，详细模式为 `debug`。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `exam`: 已解析的考试结构
pub fn log_startup(exam: &ExamConfig) {
    info!("{}", "=".repeat(60));
    info!("📝 答题卡启动 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("📚 科目数: {} | 总题数: {}", exam.len(), exam.total_questions());
    for subject in exam.subjects() {
        info!("   {} | 选项 {}", subject, subject.options.iter().collect::<String>());
    }
    info!("{}", "=".repeat(60));
}

/// 记录会话结束统计
pub fn log_session_end(stats: &SheetStats) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📊 会话结束: 已答 {}/{} ({:.0}%)",
        stats.total_answered,
        stats.total_questions,
        stats.progress_fraction * 100.0
    );
    info!("{}", "─".repeat(60));
}
