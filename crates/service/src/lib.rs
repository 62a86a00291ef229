//! Service layer holding the transcript store.
//! - Pure synchronous operations over the `models` types, no I/O.
//! - Provides clear error types; callers map them to protocol responses.

pub mod errors;
pub mod transcript;

pub use errors::StoreError;
pub use transcript::TranscriptStore;
