//! Transaction recording.
//!
//! Recording happens in two steps:
//! - [`collect_transaction`] drives the operator prompt until details, gross
//!   total and rate are all valid, re-asking only the rejected field
//! - [`TransactionRecorder::record`] computes the VAT, ensures the current
//!   period, allocates the invoice number and appends exactly one row

pub mod input;
pub mod recording;

pub use input::{
    InputField, RetryPolicy, ScriptedPrompt, TransactionDraft, TransactionInput,
    TransactionPrompt, collect_transaction, complete_transaction,
};
pub use recording::TransactionRecorder;
