pub mod dialect;
pub mod value;
