pub mod curated;
pub mod matching;
pub mod normalize;
pub mod prompt;
pub mod providers;
pub mod recommend;

pub use curated::CuratedDataset;
pub use providers::{IdeaGenerator, OpenAiProvider};
