pub mod store;

pub use store::{MockSessionStore, SessionStore, StoreOp};
