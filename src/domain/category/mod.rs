pub mod entity;
pub mod repository;

pub use entity::{Category, CategoryId, CategoryName, CategoryNode, NewCategory, build_tree};
pub use repository::CategoryRepository;
