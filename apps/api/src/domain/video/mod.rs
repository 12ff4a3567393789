pub mod duration;
pub mod entity;
pub mod repository;
