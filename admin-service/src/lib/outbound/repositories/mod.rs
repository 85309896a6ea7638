pub mod postgres_role;
pub mod rest_role;

pub use postgres_role::PostgresRoleRepository;
pub use rest_role::RestRoleRepository;
