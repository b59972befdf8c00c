pub use error::{Error, Result};
pub use scan::{Counts, Scanner, Source, scan_bytes, scan_reader};

mod error;
mod scan;
