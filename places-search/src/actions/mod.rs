pub mod csv_export;
pub mod nearby_search;
