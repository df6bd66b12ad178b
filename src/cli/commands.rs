pub mod initdb;
pub mod regenerate;
pub mod serve;

pub use initdb::{init_database, run_migrations};
pub use regenerate::regenerate;
pub use serve::serve;
