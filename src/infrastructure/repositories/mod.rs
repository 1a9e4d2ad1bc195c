pub mod group_repository;
pub mod post_repository;
pub mod user_repository;

pub use group_repository::GroupRepository;
pub use post_repository::PostRepository;
pub use user_repository::UserRepository;
