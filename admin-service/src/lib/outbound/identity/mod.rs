pub mod hosted;

pub use hosted::HostedIdentityProvider;
