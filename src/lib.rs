pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{HttpSource, LocalSource};
pub use core::index::{Dataset, Entry, PreloadReport, ReferenceIndex};
pub use core::recommendations::DayRecommender;
pub use core::sweeper::SweeperHandle;
pub use domain::model::{
    Category, DayInput, DayRecommendations, DaySummary, Mood, Polarity, ReferenceEntry,
    SpecialYogaEntry,
};
pub use utils::error::{LookupError, Result};
