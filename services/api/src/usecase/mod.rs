pub mod auth;
pub mod comment;
pub mod follow;
pub mod ingredient;
pub mod like;
pub mod moderation;
pub mod recipe;
pub mod user;
