//! Library descriptor loading: `.fd` files to an offset/name table.

pub mod load;
pub mod parse;
pub mod table;

pub use load::{LoadSummary, load_fd_dir};
pub use table::SymbolTable;
