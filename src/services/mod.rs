// Service exports
pub mod issue_store;

pub use issue_store::{IssueStore, StoreError};
