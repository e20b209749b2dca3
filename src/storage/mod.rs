//! Base table storage for quarry
//!
//! Each table is one delimited text file whose first record names the
//! columns. Storage only hands back raw string fields in file order;
//! typing and column qualification happen in the executor's data source.

mod errors;
mod reader;

pub use errors::{StorageError, StorageResult};
pub use reader::TableReader;
