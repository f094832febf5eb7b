pub mod entity;
pub mod repository;

pub use entity::{Draft, DraftId, DraftUpdate, NewDraft};
pub use repository::DraftRepository;
