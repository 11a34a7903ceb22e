//! One repository per table. Each is a unit struct with associated async
//! functions taking the pool explicitly.

pub mod book_repo;
pub mod user_repo;

pub use book_repo::BookRepo;
pub use user_repo::UserRepo;
