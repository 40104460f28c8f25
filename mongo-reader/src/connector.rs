//! MongoDB session setup.

use std::time::{Duration, Instant};

use common::config::AppConfig;
use common::errors::{AppError, AppResult};
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, DriverInfo};
use mongodb::{Client, Collection};
use tracing::info;

const APP_NAME: &str = "mongo-reader";

/// Opens a session from a validated configuration.
pub struct Connector {
    config: AppConfig,
}

impl Connector {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Creates the client and pings the server.
    ///
    /// Fails before touching the network if the URI is empty. A server that
    /// cannot be selected within the driver's timeout is reported as
    /// [`AppError::Liveness`] and no session is returned.
    pub async fn connect(&self) -> AppResult<Session> {
        self.config.check()?;

        let mut options = ClientOptions::parse(self.config.mongo_uri())
            .await
            .map_err(|e| AppError::DatabaseConnection(e.to_string()))?;
        if options.app_name.is_none() {
            options.app_name = Some(APP_NAME.to_string());
        }
        options.driver_info = Some(DriverInfo::builder().name(APP_NAME).build());

        let client = Client::with_options(options)
            .map_err(|e| AppError::DatabaseConnection(e.to_string()))?;
        let session = Session { client };

        let latency = session.ping().await?;
        info!(
            target_uri = %self.config.redacted_uri(),
            latency_ms = latency.as_millis() as u64,
            "connected to MongoDB"
        );
        Ok(session)
    }
}

/// A live client handle, verified by a ping when it was opened.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    /// Runs `{ ping: 1 }` against `admin` and returns the round trip time.
    pub async fn ping(&self) -> AppResult<Duration> {
        let start = Instant::now();
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::Liveness(e.to_string()))?;
        Ok(start.elapsed())
    }

    pub fn collection(&self, database: &str, collection: &str) -> Collection<Document> {
        self.client.database(database).collection::<Document>(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_uri_never_reaches_connector() {
        let result = AppConfig::new("").map(Connector::new);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_bad_scheme_is_connection_error() {
        let config = AppConfig::new("http://localhost:27017").unwrap();
        let err = Connector::new(config).connect().await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseConnection(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_liveness() {
        let config = AppConfig::new(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=300&connectTimeoutMS=300",
        )
        .unwrap();
        let err = Connector::new(config).connect().await.unwrap_err();
        assert!(matches!(err, AppError::Liveness(_)), "got {err:?}");
    }
}
