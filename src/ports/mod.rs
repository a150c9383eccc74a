//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the pipeline core and an
//! external system (issue tracker, test repository, language model).
//! Implementations live in `src/adapters/`.

pub mod llm;
pub mod repository;
pub mod tracker;

pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
pub use repository::{CaseStep, CaseUpload, FolderFuture, FolderId, TestRepository, UploadFuture};
pub use tracker::{TicketFuture, TicketSource};
