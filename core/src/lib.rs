//! Synchronous client for the Base CRM REST API (v2).
//!
//! # Overview
//! Typed models for accounts, users, contacts, leads, deals, sources, loss
//! reasons, notes, tasks and tags, each exposed through a resource service
//! with the operations the API supports for it. Every operation is a single
//! HTTP round trip executed by an injected `Transport`.
//!
//! ```no_run
//! use basecrm::{BearerAuth, Client, DealListOptions, ListOptions, UreqTransport};
//!
//! # fn main() -> Result<(), basecrm::Error> {
//! let client = Client::new(BearerAuth::from_env(UreqTransport::new())?);
//! let options = DealListOptions {
//!     hot: Some(true),
//!     list: ListOptions {
//!         per_page: Some(50),
//!         ..ListOptions::default()
//!     },
//!     ..DealListOptions::default()
//! };
//! let (deals, response) = client.deals().list(Some(&options))?;
//! println!("{} hot deals, status {}", deals.len(), response.status());
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `Client` is stateless: it holds a `Config` and the transport.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`),
//!   so the transport is the only component doing I/O.
//! - One generic `Service` implements List/Get/Create/Edit/Delete; capability
//!   traits on the entity types (`Listable`, `Writable`, `HasSelf`) select
//!   which of those exist per resource.
//! - Non-2xx responses become `Error::Api`, which keeps the raw response.

pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod query;
pub mod service;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{Client, Config, Response, DEFAULT_BASE_URL, USER_AGENT};
pub use envelope::{Links, Meta};
pub use error::{ApiErrorDetail, Error, ErrorResponse, ErrorsEnvelope};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use query::{AddressFilter, ListOptions, ToQuery};
pub use service::{HasSelf, Listable, Resource, Service, Writable};
pub use transport::BearerAuth;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    Account, Address, AssociatedContact, Contact, ContactListOptions, CustomFields, Deal,
    DealListOptions, Lead, LeadListOptions, LossReason, LossReasonListOptions, Note,
    NoteListOptions, ResourceType, Source, SourceListOptions, Tag, TagListOptions, Task,
    TaskListOptions, User, UserListOptions,
};
