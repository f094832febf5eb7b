pub mod entity;
pub mod repository;
pub mod specifications;

pub use entity::{
    Column, ColumnEntry, ColumnId, ColumnName, ColumnUpdate, NewColumn, next_sort,
    normalize_cover_url, normalize_description,
};
pub use repository::{ColumnEntryRepository, ColumnRepository};
pub use specifications::CanManageColumnSpec;
