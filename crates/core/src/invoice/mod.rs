//! Invoice number allocation.

pub mod allocator;

pub use allocator::{InvoiceAllocator, parse_invoice_number, parse_manual_invoice};
