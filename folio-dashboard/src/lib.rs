//! Dashboard side of the portfolio: the project edit form and the clients
//! it drives.

pub mod api;
pub mod config;
pub mod form;
#[cfg(test)]
mod mock;
pub mod thumbnail;
pub mod upload;

pub use api::{ProjectApi, RpcProjectClient};
pub use form::{EditForm, SubmitOutcome, Toast, ToastKind};
pub use thumbnail::SelectedThumbnail;
pub use upload::ImageUploader;
