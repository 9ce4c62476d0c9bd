pub mod authorize;
pub mod optional;
pub mod protect;
