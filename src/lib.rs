//! unified-access: transactional identity/session core.
//!
//! Two modes, chosen by the caller and never auto-detected:
//!
//! - **bring-up**: apply the schema and operation catalogs once, inside a
//!   single all-or-nothing transaction, then exit.
//! - **serve**: expose the fixed operation catalog (create user, archive
//!   user, rotate password, register client, exchange authorization code) to
//!   a transport layer. Every operation is transactional and audit-logged;
//!   the code exchange serializes concurrent attempts on the same code so a
//!   replay can never succeed twice.

pub mod config;
pub mod db;
pub mod error;
pub mod migrations;
pub mod models;
pub mod services;

use sqlx::postgres::PgPool;

use crate::config::AppConfig;
use crate::services::{ClientOperations, CodeExchanger, UserOperations};

/// Shared application state handed to the transport layer.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: PgPool,
    pub users: UserOperations,
    pub clients: ClientOperations,
    pub exchanger: CodeExchanger,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config,
            users: UserOperations::new(pool.clone()),
            clients: ClientOperations::new(pool.clone()),
            exchanger: CodeExchanger::new(pool.clone()),
            db: pool,
        }
    }
}

/// Initialize tracing for the process.
pub fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
