// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing with encoding detection, and BOM-prefixed output

mod csv_parser;
mod csv_writer;

pub use csv_parser::{decode_bytes, CsvParser, CsvTable};
pub use csv_writer::write_csv;
