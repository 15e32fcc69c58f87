//! Lookups against the breach-notification API.
//!
//! A [`Query`] is built from a [`Mode`] and its [`Parameters`], resolved to
//! an endpoint under an [`ApiBase`], and run by a [`Dispatcher`] with a
//! single GET. The [`Outcome`] is either the JSON body or a status that
//! maps to a diagnostic message.

mod dispatcher;
mod email;
mod outcome;
mod query;

pub use dispatcher::*;
pub use email::*;
pub use outcome::*;
pub use query::*;
