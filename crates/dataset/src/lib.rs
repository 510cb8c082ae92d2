#![forbid(unsafe_code)]

pub mod error;
pub mod inspect;
pub mod record;
pub mod stats;

pub use error::{DatasetError, DatasetResult};
pub use inspect::{describe_record, find_points_field, FieldKind, FieldSummary};
pub use record::{extract_rows, read_records, read_records_from, record_label, Record};
pub use stats::{label_histogram, RowStats};
