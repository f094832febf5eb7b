pub use crate::domain::article::services::SlugGenerator;
