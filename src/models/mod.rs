mod category;
mod transaction;

pub use category::{normalize, Category};
pub use transaction::{Transaction, TransactionDraft};
