pub mod backend;
pub mod identity;
pub mod repositories;

pub use backend::BackendClient;
pub use identity::HostedIdentityProvider;
pub use repositories::PostgresRoleRepository;
pub use repositories::RestRoleRepository;
