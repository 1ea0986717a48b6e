pub use async_trait::async_trait;

pub mod client;
pub mod definition;
pub mod discovery;
pub mod invoker;
pub mod local;
pub mod result;
