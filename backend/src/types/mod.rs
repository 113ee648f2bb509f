mod environment;
mod error;

pub use environment::{Environment, StaticCredentials};
pub use error::{AppError, LIST_IMAGES_FAILED};
