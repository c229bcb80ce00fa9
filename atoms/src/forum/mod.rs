pub mod model;
pub mod service;

pub use model::CreateForumPostPayload;
pub use service::*;
