pub mod entity;
pub mod repository;

pub use entity::{NewTopic, Topic, TopicId, TopicName, rank_by_hotness};
pub use repository::TopicRepository;
