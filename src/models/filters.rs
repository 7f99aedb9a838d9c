use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Group size as chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeopleOption {
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
}

/// Group composition as chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupOption {
    #[serde(rename = "남자")]
    Man,
    #[serde(rename = "여자")]
    Woman,
    #[serde(rename = "남자단체")]
    Men,
    #[serde(rename = "여자단체")]
    Women,
    #[serde(rename = "가족")]
    Family,
}

/// Age band, shared by filters and stored ideas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeOption {
    #[serde(rename = "10")]
    Teens,
    #[serde(rename = "20")]
    Twenties,
    #[serde(rename = "30")]
    Thirties,
    #[serde(rename = "40")]
    Forties,
    #[serde(rename = "50+")]
    FiftyPlus,
}

/// Mood as chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodOption {
    #[serde(rename = "릴랙스")]
    Relax,
    #[serde(rename = "라이트")]
    Light,
    #[serde(rename = "에너지")]
    Energy,
    #[serde(rename = "창의")]
    Creative,
    #[serde(rename = "액티브")]
    Active,
}

impl PeopleOption {
    pub const ALL: [PeopleOption; 5] = [
        PeopleOption::Solo,
        PeopleOption::Pair,
        PeopleOption::Small,
        PeopleOption::Medium,
        PeopleOption::Large,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeopleOption::Solo => "혼자",
            PeopleOption::Pair => "둘",
            PeopleOption::Small => "3-4",
            PeopleOption::Medium => "5-9",
            PeopleOption::Large => "10+",
        }
    }

    fn emoji(&self) -> &'static str {
        match self {
            PeopleOption::Solo => "👤",
            PeopleOption::Pair => "👥",
            PeopleOption::Small => "👨‍👩‍👧",
            PeopleOption::Medium => "👨‍👩‍👧‍👦",
            PeopleOption::Large => "🎉",
        }
    }
}

impl GroupOption {
    pub const ALL: [GroupOption; 5] = [
        GroupOption::Man,
        GroupOption::Woman,
        GroupOption::Men,
        GroupOption::Women,
        GroupOption::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupOption::Man => "남자",
            GroupOption::Woman => "여자",
            GroupOption::Men => "남자단체",
            GroupOption::Women => "여자단체",
            GroupOption::Family => "가족",
        }
    }

    fn emoji(&self) -> &'static str {
        match self {
            GroupOption::Man => "🧍‍♂️",
            GroupOption::Woman => "🧍‍♀️",
            GroupOption::Men => "👬",
            GroupOption::Women => "👭",
            GroupOption::Family => "🏡",
        }
    }
}

impl AgeOption {
    pub const ALL: [AgeOption; 5] = [
        AgeOption::Teens,
        AgeOption::Twenties,
        AgeOption::Thirties,
        AgeOption::Forties,
        AgeOption::FiftyPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeOption::Teens => "10",
            AgeOption::Twenties => "20",
            AgeOption::Thirties => "30",
            AgeOption::Forties => "40",
            AgeOption::FiftyPlus => "50+",
        }
    }
}

impl MoodOption {
    pub const ALL: [MoodOption; 5] = [
        MoodOption::Relax,
        MoodOption::Light,
        MoodOption::Energy,
        MoodOption::Creative,
        MoodOption::Active,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodOption::Relax => "릴랙스",
            MoodOption::Light => "라이트",
            MoodOption::Energy => "에너지",
            MoodOption::Creative => "창의",
            MoodOption::Active => "액티브",
        }
    }

    fn emoji(&self) -> &'static str {
        match self {
            MoodOption::Relax => "🧘",
            MoodOption::Light => "🙂",
            MoodOption::Energy => "🔥",
            MoodOption::Creative => "🎨",
            MoodOption::Active => "🚀",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(PeopleOption, GroupOption, AgeOption, MoodOption);

/// The four filters a user selects before asking for recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub people: PeopleOption,
    pub group: GroupOption,
    pub age: AgeOption,
    pub mood: MoodOption,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            people: PeopleOption::Pair,
            group: GroupOption::Men,
            age: AgeOption::Twenties,
            mood: MoodOption::Light,
        }
    }
}

// ============================================================================
// Filter catalog served to clients
// ============================================================================

/// A selectable value for one filter
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterItem {
    pub label: &'static str,
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<&'static str>,
}

/// One filter group with its title and options
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterConfig {
    pub key: &'static str,
    pub title: &'static str,
    pub options: Vec<FilterItem>,
}

/// Everything a client needs to render the filter panel
#[derive(Debug, Clone, Serialize)]
pub struct FilterCatalog {
    pub filters: Vec<FilterConfig>,
    pub defaults: Filters,
}

impl FilterCatalog {
    pub fn new() -> Self {
        let filters = vec![
            FilterConfig {
                key: "people",
                title: "인원",
                options: PeopleOption::ALL
                    .iter()
                    .map(|o| item(o.as_str(), Some(o.emoji())))
                    .collect(),
            },
            FilterConfig {
                key: "group",
                title: "구성",
                options: GroupOption::ALL
                    .iter()
                    .map(|o| item(o.as_str(), Some(o.emoji())))
                    .collect(),
            },
            FilterConfig {
                key: "age",
                title: "연령대",
                options: AgeOption::ALL.iter().map(|o| item(o.as_str(), None)).collect(),
            },
            FilterConfig {
                key: "mood",
                title: "분위기",
                options: MoodOption::ALL
                    .iter()
                    .map(|o| item(o.as_str(), Some(o.emoji())))
                    .collect(),
            },
        ];

        Self {
            filters,
            defaults: Filters::default(),
        }
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn item(value: &'static str, emoji: Option<&'static str>) -> FilterItem {
    FilterItem {
        label: value,
        value,
        emoji,
    }
}
