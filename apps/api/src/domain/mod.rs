pub mod channel;
pub mod comment;
pub mod shared;
pub mod user;
pub mod video;
