pub mod file;
pub mod loader;

pub use file::{read_dataset, write_dataset, PickState};
pub use loader::load_items;
