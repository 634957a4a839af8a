#![forbid(unsafe_code)]

pub mod repository;
pub mod rest;
pub mod sqlite;

pub use repository::{AttemptRepository, NameMatch, Storage, StorageError};
