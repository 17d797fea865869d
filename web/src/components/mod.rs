pub mod export_button;
pub mod results_table;
pub mod status;

pub use export_button::ExportButton;
pub use results_table::ResultsTable;
pub use status::{ErrorView, LoadingView};
