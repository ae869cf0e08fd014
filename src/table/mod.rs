pub mod detect;
pub mod io;
pub mod model;

pub use detect::{bounce_email_column, detect_email_column, resolve_column, EMAIL_COLUMN_CANDIDATES};
pub use io::{read_table, write_table, TableFormat};
pub use model::Table;
