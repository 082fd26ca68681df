// Adapters layer: concrete listing sources and storage backends.

pub mod file;
pub mod http;
pub mod memory;
pub mod storage;

pub use file::JsonFileListingSource;
pub use http::HttpListingSource;
pub use memory::InMemoryListingSource;
pub use storage::LocalStorage;
