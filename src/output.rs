//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;
pub mod outcome;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
pub use outcome::{CheckStatus, ValidationOutcome, error_chain};
