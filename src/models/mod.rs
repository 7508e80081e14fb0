pub mod audit_log;
pub mod authorization_code;
pub mod client;
pub mod refresh_token;
pub mod role;
pub mod scope;
pub mod user;

pub use audit_log::AuditLogEntry;
pub use authorization_code::AuthorizationCode;
pub use client::{Client, ClientUrl, NewClient};
pub use refresh_token::RefreshToken;
pub use role::{Role, UserRole};
pub use scope::{GrantType, Scope};
pub use user::{NewUser, User, UserStatus};
