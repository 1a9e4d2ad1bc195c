pub mod auth;
pub mod group;
pub mod pagination;
pub mod post;
pub mod user;
