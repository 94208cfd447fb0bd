pub mod document;
pub mod codec;
pub mod store;
