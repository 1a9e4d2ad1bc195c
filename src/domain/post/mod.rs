pub mod error;
pub mod form;
pub mod model;
pub mod service;

pub use error::PostServiceError;
pub use form::{CleanedPost, FieldErrors, FieldKind, FieldSpec, GroupChoice, PostForm, PostFormData};
pub use model::Post;
pub use service::{AuthorListing, GroupListing, PostDetail, PostService, PostServiceApi};
