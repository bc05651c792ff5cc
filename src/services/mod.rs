pub mod report_writer;
pub mod signals;

pub use report_writer::ReportWriter;
pub use signals::{run_scan, scan};
