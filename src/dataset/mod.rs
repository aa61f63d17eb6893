// Dataset — the static conference table and the CSV loader that reads it.

pub mod loader;
pub mod models;
