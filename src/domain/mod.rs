pub mod article;
pub mod category;
pub mod column;
pub mod comment;
pub mod draft;
pub mod errors;
pub mod pagination;
pub mod specification;
pub mod topic;
pub mod user;
