use serde::{Deserialize, Serialize};

use super::AgeOption;

/// Group size as recorded on a stored idea.
///
/// Wider than [`super::PeopleOption`]: the curated data also uses the
/// catch-all `5+` bucket and `가족` for family outings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoredPeople {
    #[serde(rename = "혼자")]
    Solo,
    #[serde(rename = "둘")]
    Pair,
    #[serde(rename = "3-4")]
    Small,
    #[serde(rename = "5-9")]
    Medium,
    #[serde(rename = "10+")]
    Large,
    #[serde(rename = "5+")]
    FivePlus,
    #[serde(rename = "가족")]
    Family,
}

/// Group composition as recorded on a stored idea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoredGroup {
    #[serde(rename = "남")]
    Male,
    #[serde(rename = "여")]
    Female,
    #[serde(rename = "섞임")]
    Mixed,
    #[serde(rename = "가족")]
    Family,
}

/// Mood vocabulary of the curated dataset, which predates the filter moods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegacyMood {
    #[serde(rename = "조용")]
    Quiet,
    #[serde(rename = "적당")]
    Moderate,
    #[serde(rename = "신남")]
    Excited,
    #[serde(rename = "집")]
    Home,
    #[serde(rename = "밖")]
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Energy {
    Low,
    Mid,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Place {
    Home,
    Indoor,
    Outdoor,
}

/// A single activity suggestion, in the curated dataset's schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub time: String,
    pub budget: String,
    pub people: StoredPeople,
    pub group: StoredGroup,
    pub age: AgeOption,
    pub mood: LegacyMood,
    pub energy: Energy,
    pub place: Place,
    pub repeatable: bool,
    #[serde(default = "default_season")]
    pub season: Vec<String>,
    pub alcohol: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

pub fn default_season() -> Vec<String> {
    vec!["all".to_string()]
}

/// Payload returned by the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub ideas: Vec<Idea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

// ============================================================================
// Lenient parsing for model output
// ============================================================================

impl StoredPeople {
    /// Parses a canonical value or a common alias
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let value = raw.trim().trim_end_matches('명').trim().replace('~', "-");
        match value.as_str() {
            "혼자" | "1" | "solo" => Some(StoredPeople::Solo),
            "둘" | "2" | "pair" | "couple" => Some(StoredPeople::Pair),
            "3-4" => Some(StoredPeople::Small),
            "5-9" => Some(StoredPeople::Medium),
            "10+" | "10" | "10 이상" => Some(StoredPeople::Large),
            "5+" | "5" | "5 이상" => Some(StoredPeople::FivePlus),
            "가족" | "family" => Some(StoredPeople::Family),
            _ => None,
        }
    }
}

impl StoredGroup {
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "남" | "남자" | "남자단체" | "male" | "men" => Some(StoredGroup::Male),
            "여" | "여자" | "여자단체" | "female" | "women" => Some(StoredGroup::Female),
            "섞임" | "혼성" | "mixed" | "any" => Some(StoredGroup::Mixed),
            "가족" | "family" => Some(StoredGroup::Family),
            _ => None,
        }
    }
}

impl AgeOption {
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let value = raw.trim().trim_end_matches("대").trim_end_matches('s').trim();
        match value {
            "10" => Some(AgeOption::Teens),
            "20" => Some(AgeOption::Twenties),
            "30" => Some(AgeOption::Thirties),
            "40" => Some(AgeOption::Forties),
            "50+" | "50" | "60" | "60+" | "50 이상" => Some(AgeOption::FiftyPlus),
            _ => None,
        }
    }
}

impl LegacyMood {
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "조용" | "조용함" | "quiet" | "calm" => Some(LegacyMood::Quiet),
            "적당" | "적당함" | "moderate" => Some(LegacyMood::Moderate),
            "신남" | "신나는" | "excited" | "exciting" => Some(LegacyMood::Excited),
            "집" | "home" => Some(LegacyMood::Home),
            "밖" | "outside" | "outdoor" => Some(LegacyMood::Outside),
            _ => None,
        }
    }
}

impl Energy {
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" | "낮음" => Some(Energy::Low),
            "mid" | "medium" | "middle" | "보통" => Some(Energy::Mid),
            "high" | "높음" => Some(Energy::High),
            _ => None,
        }
    }
}

impl Place {
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "home" | "집" => Some(Place::Home),
            "indoor" | "inside" | "실내" => Some(Place::Indoor),
            "outdoor" | "outside" | "실외" | "야외" => Some(Place::Outdoor),
            _ => None,
        }
    }
}
