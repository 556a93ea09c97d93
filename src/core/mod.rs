pub mod aliases;
pub mod cache;
pub mod extract;
pub mod index;
pub mod indexed;
pub mod normalize;
pub mod prompt;
pub mod recommendations;
pub mod resolver;
pub mod sweeper;

pub use crate::domain::model::{Category, DayInput, DayRecommendations};
pub use crate::domain::ports::{ConfigProvider, ReferenceSource};
pub use crate::utils::error::Result;
