pub mod activity;
pub mod catalog;
pub mod error;
pub mod store;

pub use activity::{Activity, Directory};
pub use catalog::Catalog;
pub use error::{ActivityError, Result};
pub use store::ActivityStore;
