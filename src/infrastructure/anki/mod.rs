pub mod client;
pub mod error;
pub mod request_queue;

pub use client::{AnkiConnectClient, ANKI_CONNECT_VERSION, DEFAULT_ANKI_CONNECT_URL};
pub use error::AnkiError;
pub use request_queue::{RequestQueue, RetryPolicy};
