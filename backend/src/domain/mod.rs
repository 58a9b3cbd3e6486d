//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, and the services that implement the driving ports. Document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request-scoped correlation identifier.
//! - Email, User, Profile: donor accounts and their public view.
//! - SupplyRecord, Post, Entry: stored documents.
//! - EnrichedRecord, ProfileIndex: output and input of the profile join.
//! - AccountService, SupplyService, FeedService, EntryService: use-cases.

pub mod account_service;
pub mod auth;
pub mod category;
pub mod community;
pub mod document;
pub mod enrichment;
pub mod entry_service;
pub mod error;
pub mod feed_service;
pub mod ports;
pub mod supply;
pub mod supply_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccessToken, CredentialsValidationError, LoginCredentials, PasswordHash, Registration,
    TokenClaims, TokenTtl, TokenTtlParseError,
};
pub use self::category::{CategoryCatalogue, CategoryCount, CategoryDefinition};
pub use self::community::{Entry, EntryKind, NewPost, Post};
pub use self::document::{Fields, ID_FIELD, RecordId, RecordIdValidationError, into_fields};
pub use self::enrichment::{EnrichedRecord, PrimaryRecord, ProfileIndex};
pub use self::entry_service::EntryService;
pub use self::error::{Error, ErrorCode};
pub use self::feed_service::FeedService;
pub use self::supply::{
    NewSupply, Quantity, SupplyDetails, SupplyRecord, SupplyValidationError, UpdateOutcome,
};
pub use self::supply_service::SupplyService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, EmailValidationError, Profile, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use feedforward::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
