#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{
    InMemoryRepository, SessionHistoryRepository, SessionRecordRow, Storage, StorageError,
};
