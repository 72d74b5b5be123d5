pub mod unicode;
pub mod wrap;
