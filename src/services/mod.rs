//! Domain operation services.
//!
//! The five operations here are the entire externally invokable contract of
//! the core; a transport layer maps requests onto these calls. Every
//! operation runs under [`executor::with_transaction`] and writes exactly one
//! audit entry per logical action on success.

pub mod audit;
pub mod client_ops;
pub mod code_exchange;
pub mod executor;
pub mod user_ops;

pub use client_ops::ClientOperations;
pub use code_exchange::CodeExchanger;
pub use user_ops::UserOperations;
