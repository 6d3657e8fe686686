//! Domain Layer
//!
//! Records and the pure rules applied to them: filtering, legacy path
//! handling, value formatting and form validation.
//! This layer has NO network or storage dependencies.

mod error;
mod record;
mod query;
mod session;
pub mod filter;
pub mod format;
pub mod paths;
pub mod validation;

pub use error::{
    ClientError, ClientResult, CONNECT_FAILED, FETCH_FAILED, LOGIN_FAILED, PDF_FAILED, PDF_NOT_AVAILABLE,
    SEARCH_FAILED,
};
pub use record::{Record, PLACEHOLDER};
pub use query::PageQuery;
pub use session::{AuthUser, LoginResponse, Session};
