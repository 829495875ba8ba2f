pub mod csv_io;
pub mod records;

pub use csv_io::{
    export_to_path, export_to_string, read_csv, write_csv, ExportError, CSV_HEADER,
    DEFAULT_EXPORT_FILE,
};
pub use records::{flatten, regroup, ExportRecord};
