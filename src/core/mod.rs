//! File utilities used by the CLI.
//!
//! - `store`: token file location and persistence

pub mod store;

pub use store::{load_tokens, save_token_payload, token_file_path, try_read_to_string, write_string};
