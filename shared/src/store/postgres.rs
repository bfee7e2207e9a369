use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::credentials::{resolve_credentials, SecretStore};
use crate::db::DbSession;
use crate::error::Result;
use crate::models::{Page, User};
use crate::store::{SchemaStore, UserStore};

const LIST_USERS_SQL: &str = "SELECT id, name, email, status::text AS status, \
     created_at, updated_at, deleted_at, last_login_at \
     FROM users WHERE deleted_at IS NULL \
     ORDER BY created_at, id LIMIT $1 OFFSET $2";

/// Postgres-backed `UserStore`. Resolves credentials and opens one
/// connection per call; the session is released when it goes out of scope.
pub struct PgUserStore<S: SecretStore> {
    config: DbConfig,
    secrets: S,
}

impl<S: SecretStore> PgUserStore<S> {
    pub fn new(config: DbConfig, secrets: S) -> Self {
        Self { config, secrets }
    }
}

#[async_trait]
impl<S: SecretStore + 'static> UserStore for PgUserStore<S> {
    async fn list_users(&self, page: &Page) -> Result<Vec<User>> {
        let credentials = resolve_credentials(&self.secrets, &self.config.secret_id).await?;
        let session = DbSession::connect(&self.config, &credentials).await?;

        let rows = session
            .client()
            .query(LIST_USERS_SQL, &[&page.limit, &page.offset])
            .await?;

        debug!("list_users returned {} rows", rows.len());
        rows.iter().map(User::from_row).collect()
    }
}

// Schema statements, in execution order. Each one is guarded so the whole
// sequence can run on every deployment.
const SESSION_SETTINGS: &str = "SET client_min_messages TO WARNING";

const CREATE_EXTENSION: &str = "CREATE EXTENSION IF NOT EXISTS \"pgcrypto\"";

const CREATE_STATUS_TYPE: &str = "DO $$\n\
     BEGIN\n\
         IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'user_status') THEN\n\
             CREATE TYPE user_status AS ENUM ('active', 'suspended', 'deleted');\n\
         END IF;\n\
     END\n\
     $$";

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (\n\
         id UUID PRIMARY KEY DEFAULT gen_random_uuid(),\n\
         name TEXT NOT NULL,\n\
         email TEXT NOT NULL UNIQUE,\n\
         status user_status NOT NULL DEFAULT 'active',\n\
         created_at TIMESTAMPTZ NOT NULL DEFAULT now(),\n\
         updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),\n\
         deleted_at TIMESTAMPTZ,\n\
         last_login_at TIMESTAMPTZ\n\
     )";

const CREATE_EMAIL_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_users_email ON users (email)";

const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_users_status ON users (status) WHERE deleted_at IS NULL";

const CREATE_UPDATED_AT_FUNCTION: &str = "CREATE OR REPLACE FUNCTION set_updated_at()\n\
     RETURNS TRIGGER AS $$\n\
     BEGIN\n\
         NEW.updated_at = now();\n\
         RETURN NEW;\n\
     END;\n\
     $$ LANGUAGE plpgsql";

// Trigger creation is drop-then-create; CREATE TRIGGER has no IF NOT EXISTS
const DROP_UPDATED_AT_TRIGGER: &str = "DROP TRIGGER IF EXISTS users_set_updated_at ON users";

const CREATE_UPDATED_AT_TRIGGER: &str = "CREATE TRIGGER users_set_updated_at \
     BEFORE UPDATE ON users FOR EACH ROW EXECUTE FUNCTION set_updated_at()";

const ENABLE_RLS: &str = "ALTER TABLE users ENABLE ROW LEVEL SECURITY";

const CREATE_RLS_POLICY: &str = "DO $$\n\
     BEGIN\n\
         IF NOT EXISTS (\n\
             SELECT 1 FROM pg_policies\n\
             WHERE tablename = 'users' AND policyname = 'users_self_access'\n\
         ) THEN\n\
             CREATE POLICY users_self_access ON users\n\
                 USING (id = current_setting('app.current_user_id', true)::uuid);\n\
         END IF;\n\
     END\n\
     $$";

/// Postgres-backed `SchemaStore` used by the deployment-time initializer.
pub struct PgSchemaStore<S: SecretStore> {
    config: DbConfig,
    secrets: S,
    enable_rls: bool,
}

impl<S: SecretStore> PgSchemaStore<S> {
    pub fn new(config: DbConfig, secrets: S, enable_rls: bool) -> Self {
        Self {
            config,
            secrets,
            enable_rls,
        }
    }
}

#[async_trait]
impl<S: SecretStore + 'static> SchemaStore for PgSchemaStore<S> {
    async fn apply_schema(&self) -> Result<()> {
        let credentials = resolve_credentials(&self.secrets, &self.config.secret_id).await?;
        let session = DbSession::connect(&self.config, &credentials).await?;

        let mut statements = vec![
            SESSION_SETTINGS,
            CREATE_EXTENSION,
            CREATE_STATUS_TYPE,
            CREATE_USERS_TABLE,
            CREATE_EMAIL_INDEX,
            CREATE_STATUS_INDEX,
            CREATE_UPDATED_AT_FUNCTION,
            DROP_UPDATED_AT_TRIGGER,
            CREATE_UPDATED_AT_TRIGGER,
        ];
        if self.enable_rls {
            statements.push(ENABLE_RLS);
            statements.push(CREATE_RLS_POLICY);
        }

        // Sequential on the one connection; the first failure propagates and
        // the session is released on the way out.
        for statement in statements {
            session.client().batch_execute(statement).await?;
        }

        info!(
            "Schema setup complete for database {} (rls={})",
            self.config.dbname, self.enable_rls
        );
        Ok(())
    }
}
