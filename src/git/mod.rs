pub mod discover;
pub mod fetch;
pub mod repo;

pub use discover::{discover_repositories, repo_name};
pub use fetch::update_repository;
pub use repo::GitRepo;
