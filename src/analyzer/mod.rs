//! Tag history analysis

pub mod tag_scanner;

pub use tag_scanner::{scan_tags, TagScan, TagScanner};
