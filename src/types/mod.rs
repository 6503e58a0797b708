//! User-facing input and output types

pub mod intent;
pub mod result;

pub use intent::{SignAndSendParams, TransactionAction, TransactionIntent};
pub use result::ExecutionResult;
