pub mod compare;
pub mod validate;
