pub mod mock;
pub mod store;

pub use mock::MockUserStore;
pub use store::UserStore;
