pub mod points_json;
pub mod snapshot_csv;
