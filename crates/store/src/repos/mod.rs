//! Repository trait definitions, one per collection.

pub mod drivers;
pub mod sessions;
pub mod teams;

pub use drivers::DriverRepo;
pub use sessions::SessionRepo;
pub use teams::TeamRepo;
