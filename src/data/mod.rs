mod loader;

pub use loader::{load_definition_from_json, sample_definition};
