pub mod filters;
pub mod idea;

pub use filters::{
    AgeOption, FilterCatalog, FilterConfig, FilterItem, Filters, GroupOption, MoodOption,
    PeopleOption,
};
pub use idea::{
    default_season, Energy, Idea, LegacyMood, Place, Recommendation, StoredGroup, StoredPeople,
};
