pub mod aggregate;
pub mod budget;
pub mod entry_file;
pub mod normalize;
pub mod report;
