pub mod entry;
pub mod snapshot;

pub use entry::{Entry, Frequency, RawEntry};
pub use snapshot::{BudgetSnapshot, NewSnapshot};
