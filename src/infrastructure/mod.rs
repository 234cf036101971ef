pub mod document_store;

pub use document_store::{DocumentStore, MemoryStore, COLLECTION_EXAMS, COLLECTION_SUBMISSIONS};
