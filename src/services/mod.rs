pub mod export_service;
pub mod json_exporter;

pub use export_service::{export_file_name, ExportDocument, SubjectMap, SubjectSummary};
pub use json_exporter::JsonExporter;
