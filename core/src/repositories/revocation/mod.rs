pub mod mock;
pub mod store;

pub use mock::MockRevocationStore;
pub use store::RevocationStore;
