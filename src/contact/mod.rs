//! Contact form endpoint
//!
//! `POST /api/contact` validates `{email, name, message}`, stores it through a
//! [`DocumentStore`], and echoes the stored record back.

mod data_api;
mod message;
pub mod status;
mod store;

pub use data_api::DataApiStore;
pub use message::{ContactForm, ContactMessage, NewMessage};
pub use status::{Notification, NotificationCopy, RequestStatus};
pub use store::{open_store, Connection, DocumentStore, FileStore, MemoryStore, StoreError};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Route the endpoint is mounted at
pub const CONTACT_ROUTE: &str = "/api/contact";

/// Status text sent with a created record
pub const STORED_MESSAGE: &str = "Successfully stored message!";

/// Failures of a contact submission, each mapped to a status code
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Invalid input.")]
    InvalidInput,

    #[error("Could not connect to database.")]
    Connect(#[source] StoreError),

    #[error("Storing message failed!")]
    Store(#[source] StoreError),
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            ContactError::Connect(_) | ContactError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Body of a `201 Created` response
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
    pub record: ContactMessage,
}

/// Shared by every request to the endpoint
pub struct ContactState {
    pub store: Arc<dyn DocumentStore>,
    pub collection: String,
}

impl ContactState {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }
}

/// Router exposing `POST /api/contact`
pub fn router(state: Arc<ContactState>) -> Router {
    router_at(CONTACT_ROUTE, state)
}

/// Router exposing the endpoint at `route`, for sites served below `/`
pub fn router_at(route: &str, state: Arc<ContactState>) -> Router {
    Router::new().route(route, post(submit)).with_state(state)
}

/// `POST /api/contact`
pub async fn submit(
    State(state): State<Arc<ContactState>>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>), ContactError> {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            tracing::debug!("Rejected contact body: {}", rejection);
            return Err(ContactError::InvalidInput);
        }
    };

    let Some(message) = form.validate() else {
        tracing::debug!("Contact submission failed validation");
        return Err(ContactError::InvalidInput);
    };

    let record = store_message(state.store.as_ref(), &state.collection, message).await?;
    tracing::info!("Stored contact message {}", record.id);

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: STORED_MESSAGE,
            record,
        }),
    ))
}

/// Insert one message, closing the connection whatever the outcome
pub async fn store_message(
    store: &dyn DocumentStore,
    collection: &str,
    message: NewMessage,
) -> Result<ContactMessage, ContactError> {
    let mut conn = store.connect().await.map_err(|e| {
        tracing::error!("Could not connect to the document store: {}", e);
        ContactError::Connect(e)
    })?;

    let inserted = conn.insert_one(collection, &message).await;

    if let Err(e) = conn.close().await {
        tracing::warn!("Closing the document store connection failed: {}", e);
    }

    match inserted {
        Ok(id) => Ok(message.with_id(id)),
        Err(e @ StoreError::Unreachable(_)) => {
            tracing::error!("Could not reach the document store: {}", e);
            Err(ContactError::Connect(e))
        }
        Err(e) => {
            tracing::error!("Storing contact message failed: {}", e);
            Err(ContactError::Store(e))
        }
    }
}
