//! Shared data model for the portfolio site.
//!
//! Both the API server and the dashboard client speak these types: the
//! [`Project`] record, its [`Slug`] key, the form-level [`ProjectInput`]
//! with its validation rules, and the JSON envelope of the `project.*`
//! remote procedures.

mod project;
pub mod rpc;
mod slug;
mod validation;

pub use project::*;
pub use slug::*;
pub use validation::*;
