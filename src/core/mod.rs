pub mod error;
pub mod types;
pub mod xname;

pub use error::{Result, StoreError};
pub use types::{ManagementState, PowerState, PowerStatusCollection, PowerStatusRecord};
pub use xname::{ComponentType, is_valid_xname};
