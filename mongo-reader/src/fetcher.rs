//! Unfiltered collection reads.

use std::fmt;

use async_trait::async_trait;
use common::errors::{AppError, AppResult};
use common::models::Record;
use mongodb::bson::{doc, Document};
use mongodb::Cursor;
use tracing::{debug, info};

use crate::connector::Session;

/// A server-side iterator over query results.
#[async_trait]
pub trait DocumentCursor: Send {
    type Error: fmt::Display + Send;

    /// Moves to the next document. `Ok(false)` once exhausted.
    async fn advance(&mut self) -> Result<bool, Self::Error>;

    /// Decodes the document the cursor currently points at.
    fn current(&self) -> Result<Document, Self::Error>;
}

/// Anything that can run an unfiltered find over a collection.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    type Cursor: DocumentCursor;
    type Error: fmt::Display + Send;

    async fn find_all(&self, database: &str, collection: &str)
        -> Result<Self::Cursor, Self::Error>;
}

#[async_trait]
impl DocumentCursor for Cursor<Document> {
    type Error = mongodb::error::Error;

    async fn advance(&mut self) -> Result<bool, Self::Error> {
        Cursor::advance(self).await
    }

    fn current(&self) -> Result<Document, Self::Error> {
        self.deserialize_current()
    }
}

#[async_trait]
impl DocumentSource for Session {
    type Cursor = Cursor<Document>;
    type Error = mongodb::error::Error;

    async fn find_all(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Self::Cursor, Self::Error> {
        self.collection(database, collection).find(doc! {}).await
    }
}

/// Loads whole collections into memory.
pub struct Fetcher<'a, S: DocumentSource> {
    source: &'a S,
}

impl<'a, S: DocumentSource> Fetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Returns every document in `database.collection`, in cursor order.
    ///
    /// Nothing is returned on failure. The cursor is dropped on every exit
    /// path, which releases it on the server.
    pub async fn fetch_all(&self, database: &str, collection: &str) -> AppResult<Vec<Record>> {
        debug!(database = %database, collection = %collection, "issuing unfiltered find");

        let mut cursor = self
            .source
            .find_all(database, collection)
            .await
            .map_err(|e| AppError::Query(e.to_string()))?;

        let mut records = Vec::new();
        while cursor
            .advance()
            .await
            .map_err(|e| AppError::Cursor(e.to_string()))?
        {
            let document = cursor.current().map_err(|e| AppError::Decode {
                index: records.len(),
                message: e.to_string(),
            })?;
            records.push(Record::from_document(document));
        }

        info!(
            database = %database,
            collection = %collection,
            count = records.len(),
            "documents retrieved"
        );
        Ok(records)
    }
}
