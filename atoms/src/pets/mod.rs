pub mod model;

pub use model::{Pet, PET_COLUMNS};
