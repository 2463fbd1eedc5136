pub mod export;
pub mod presenter;

pub use export::{export_file_name, export_json, write_export};
pub use presenter::{kpi_slots, render_report, KpiSlot, KPI_PLACEHOLDER};
