pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::admin;
pub use outbound::repositories;
