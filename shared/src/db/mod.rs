use std::io;

use tokio::task::JoinHandle;
use tokio_postgres::NoTls;
use tracing::{debug, warn};

use crate::config::DbConfig;
use crate::credentials::Credentials;
use crate::error::{Result, ServiceError};

/// A single database connection scoped to one invocation.
///
/// `tokio_postgres` splits a connection into a client half and a driver half;
/// the driver is spawned onto the runtime and aborted when the session drops,
/// so release happens exactly once on every exit path without an explicit
/// close call.
pub struct DbSession {
    client: tokio_postgres::Client,
    driver: JoinHandle<()>,
}

impl DbSession {
    /// Opens one connection with the given config and credentials.
    pub async fn connect(config: &DbConfig, credentials: &Credentials) -> Result<Self> {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .dbname(&config.dbname)
            .user(&credentials.username)
            .password(&credentials.password)
            .connect_timeout(config.connect_timeout);

        debug!(
            "Connecting to database {} at {}:{}",
            config.dbname, config.host, config.port
        );

        let (client, connection) = pg_config
            .connect(NoTls)
            .await
            .map_err(classify_connect_error)?;

        // Driver failures after establishment are logged, never propagated;
        // the query result from the client half takes precedence.
        let driver = tokio::spawn(async move {
            if let Err(err) = connection.await {
                warn!("Database connection driver terminated: {}", err);
            }
        });

        Ok(DbSession { client, driver })
    }

    pub fn client(&self) -> &tokio_postgres::Client {
        &self.client
    }
}

impl Drop for DbSession {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Tags establishment failures by inspecting the typed error source chain
/// rather than matching on message text: transport-level refusals and
/// timeouts become `ConnectionUnavailable`, everything else (bad database
/// name, authentication failure, TLS mismatch) becomes `Connection`.
fn classify_connect_error(err: tokio_postgres::Error) -> ServiceError {
    match io_error_kind(&err) {
        Some(kind) if is_unavailable_kind(kind) => {
            ServiceError::ConnectionUnavailable(err.to_string())
        }
        _ => ServiceError::Connection(err.to_string()),
    }
}

/// Transport-level failures where the database host could not be reached at
/// all: refused, reset, unreachable, or timed out.
pub(crate) fn is_unavailable_kind(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::TimedOut
    )
}

pub(crate) fn io_error_kind(err: &(dyn std::error::Error + 'static)) -> Option<io::ErrorKind> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        source = cause.source();
    }
    None
}
