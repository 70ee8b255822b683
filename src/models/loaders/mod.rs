pub mod toml_loader;

pub use toml_loader::{load_exam_config, load_exam_config_or_default, parse_exam_config};
