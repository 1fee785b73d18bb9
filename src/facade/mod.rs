pub mod repository;

pub use repository::{PowerStatusRepository, PowerStatusStore};
