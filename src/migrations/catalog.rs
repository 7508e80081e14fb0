//! The fixed schema and operation catalogs.
//!
//! Both catalogs are pure, static, read-only configuration. They are passed
//! explicitly into [`super::apply`] rather than read as ambient state. Every
//! statement is written in create-if-not-exists form so the full batch can be
//! re-applied against an already-migrated database as a no-op.

/// One named, idempotently re-appliable catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Table definitions, in dependency order.
pub const SCHEMA_CATALOG: &[Migration] = &[
    Migration {
        name: "create_users_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                username VARCHAR(255) NOT NULL,
                first_name VARCHAR(50),
                middle_name VARCHAR(50),
                last_name VARCHAR(50),
                email VARCHAR(100) NOT NULL,
                password_hash VARCHAR(255) NOT NULL,
                status VARCHAR(20) NOT NULL DEFAULT 'active'
                    CHECK (status IN ('active', 'inactive', 'suspended', 'deleted')),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                deleted_at TIMESTAMPTZ
            );
        "#,
    },
    Migration {
        name: "create_roles_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS roles (
                id SERIAL PRIMARY KEY,
                role_name VARCHAR(50) NOT NULL UNIQUE,
                description VARCHAR(255),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                deleted_at TIMESTAMPTZ
            );
        "#,
    },
    Migration {
        name: "create_user_roles_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS user_roles (
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                role_id INT NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
                assigned_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (user_id, role_id)
            );
            CREATE INDEX IF NOT EXISTS idx_user_roles_role ON user_roles (role_id);
        "#,
    },
    Migration {
        name: "create_audit_logs_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS audit_logs (
                id BIGSERIAL PRIMARY KEY,
                user_id UUID REFERENCES users(id) ON DELETE SET NULL,
                action VARCHAR(100) NOT NULL,
                timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                details TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_audit_logs_user_action ON audit_logs (user_id, action);
        "#,
    },
    Migration {
        name: "create_clients_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS clients (
                id UUID PRIMARY KEY,
                client_name VARCHAR(100) NOT NULL,
                client_secret VARCHAR(255) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                deleted_at TIMESTAMPTZ
            );
        "#,
    },
    Migration {
        name: "create_client_urls_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS client_urls (
                id BIGSERIAL PRIMARY KEY,
                client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                redirect_url VARCHAR(255) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
        "#,
    },
    Migration {
        name: "create_authorization_codes_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS authorization_codes (
                code VARCHAR(255) PRIMARY KEY,
                client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                expires_at TIMESTAMPTZ NOT NULL,
                used BOOLEAN NOT NULL DEFAULT FALSE
            );
        "#,
    },
    Migration {
        name: "create_refresh_tokens_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS refresh_tokens (
                id BIGSERIAL PRIMARY KEY,
                token VARCHAR(255) NOT NULL UNIQUE,
                client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                expires_at TIMESTAMPTZ NOT NULL,
                revoked BOOLEAN NOT NULL DEFAULT FALSE
            );
        "#,
    },
    Migration {
        name: "create_scopes_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS scopes (
                id SERIAL PRIMARY KEY,
                scope_name VARCHAR(50) NOT NULL UNIQUE,
                description VARCHAR(255)
            );
        "#,
    },
    Migration {
        name: "create_client_grant_types_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS client_grant_types (
                client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                grant_type VARCHAR(30) NOT NULL
                    CHECK (grant_type IN ('authorization_code', 'refresh_token', 'client_credentials')),
                PRIMARY KEY (client_id, grant_type)
            );
        "#,
    },
];

/// Per-operation supporting objects, one entry per domain operation.
///
/// The operation bodies live in [`crate::services`]; what each entry installs
/// are the indexes and partial uniqueness constraints that operation relies
/// on. Operations that scan the same tables restate the same statements, which
/// is harmless under IF NOT EXISTS and keeps each entry self-contained.
pub const OPERATION_CATALOG: &[Migration] = &[
    Migration {
        // Username and email must be unique among non-deleted users; archived
        // rows release the name.
        name: "create_user",
        sql: r#"
            CREATE UNIQUE INDEX IF NOT EXISTS uq_users_live_username
                ON users (username) WHERE deleted_at IS NULL;
            CREATE UNIQUE INDEX IF NOT EXISTS uq_users_live_email
                ON users (email) WHERE deleted_at IS NULL;
        "#,
    },
    Migration {
        name: "archive_user",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_refresh_tokens_user_expiry
                ON refresh_tokens (user_id, expires_at);
            CREATE INDEX IF NOT EXISTS idx_authorization_codes_user_expiry
                ON authorization_codes (user_id, expires_at);
        "#,
    },
    Migration {
        name: "update_user_password",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_refresh_tokens_user_expiry
                ON refresh_tokens (user_id, expires_at);
            CREATE INDEX IF NOT EXISTS idx_authorization_codes_user_expiry
                ON authorization_codes (user_id, expires_at);
        "#,
    },
    Migration {
        name: "register_client",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_client_urls_client_order
                ON client_urls (client_id, id);
        "#,
    },
    Migration {
        name: "exchange_authorization_code",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_authorization_codes_client
                ON authorization_codes (client_id);
        "#,
    },
];
