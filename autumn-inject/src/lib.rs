pub mod annotation;
pub mod argument;
pub mod bean;
pub mod method;
pub mod registry;
pub mod result;
pub mod return_type;
pub mod types;
pub mod value;
#[cfg(test)]
mod test;
