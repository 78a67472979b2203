pub mod catalog;
pub mod directory;
pub mod inventory;

pub use catalog::{CatalogError, MovieCatalog, MovieId};
pub use directory::{ShowingDirectory, ShowingHandle};
pub use inventory::ShowingInventory;
