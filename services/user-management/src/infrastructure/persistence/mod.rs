mod in_memory;
mod postgres_unit_of_work;
mod postgres_user_repository;

pub use in_memory::*;
pub use postgres_unit_of_work::*;
pub use postgres_user_repository::PostgresUserRepository;
