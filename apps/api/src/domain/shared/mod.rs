pub mod errors;
pub mod ownership;
pub mod pagination;
pub mod reaction;
