//! GraphQL client implementation.

use std::fmt;
use std::sync::Arc;

use crate::clients::graphql::GraphqlError;
use crate::clients::{GraphqlRequest, HttpClient, Transport};
use crate::config::ClientConfig;
use crate::request::Operation;
use crate::response::{Response, ResponseLogger, TracingLogger};

/// GraphQL client that posts requests through a [`Transport`] and parses the
/// reply into a [`Response`].
///
/// The transport defaults to [`HttpClient`]. Parsed replies are reported to
/// a [`ResponseLogger`], [`TracingLogger`] unless replaced with
/// [`with_logger`](Self::with_logger).
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync` whenever its transport is.
///
/// # Example
///
/// ```rust,ignore
/// use gqlbind::{ClientConfig, Endpoint, Field, GraphqlClient, Operation};
///
/// let config = ClientConfig::builder()
///     .endpoint(Endpoint::new("https://api.example.com/graphql").unwrap())
///     .build()
///     .unwrap();
/// let client = GraphqlClient::new(&config)?;
///
/// let response = client
///     .query(&Operation::query().field(Field::new("people").select(["id"])))
///     .await?;
/// ```
pub struct GraphqlClient<T = HttpClient> {
    transport: T,
    logger: Arc<dyn ResponseLogger>,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient<HttpClient> {
    /// Creates a client that talks HTTP to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, GraphqlError> {
        Ok(Self::with_transport(HttpClient::new(config)?))
    }
}

impl<T: Transport> GraphqlClient<T> {
    /// Creates a client over an arbitrary transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replaces the response logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn ResponseLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Serializes and sends an operation.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Build`] if the operation cannot be
    /// serialized, and otherwise the errors of [`execute`](Self::execute).
    pub async fn query(&self, operation: &Operation) -> Result<Response, GraphqlError> {
        let request = GraphqlRequest::from_operation(operation)?;
        self.execute(&request).await
    }

    /// Sends a prepared request.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for transport failures and
    /// [`GraphqlError::Response`] if the reply is not a GraphQL response.
    /// Server-reported GraphQL errors are returned inside the [`Response`].
    pub async fn execute(&self, request: &GraphqlRequest) -> Result<Response, GraphqlError> {
        self.execute_with_headers(request, &[]).await
    }

    /// Sends a prepared request with extra headers for this call only.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_with_headers(
        &self,
        request: &GraphqlRequest,
        headers: &[(String, String)],
    ) -> Result<Response, GraphqlError> {
        tracing::debug!(
            "Executing GraphQL operation {}",
            request.name().unwrap_or("<anonymous>")
        );

        let raw = self.transport.send(request.to_body(), headers).await?;
        Ok(Response::from_slice(&raw, &*self.logger)?)
    }
}

impl<T: fmt::Debug> fmt::Debug for GraphqlClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
