//! Repair of language-model replies into the canonical [`Recommendation`] shape.
//!
//! Models wrap JSON in markdown fences, rename keys, answer with a bare array,
//! or drift from the enum vocabulary. Each idea is repaired on its own and
//! dropped if it cannot be; the reply only fails when nothing usable remains.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult},
    models::{
        default_season, AgeOption, Energy, Idea, LegacyMood, Place, Recommendation, StoredGroup,
        StoredPeople,
    },
};

/// Number of ideas a recommendation carries at most
pub const MAX_IDEAS: usize = 5;

/// Parses and repairs raw model text
pub fn parse_model_output(text: &str) -> AppResult<Recommendation> {
    if text.trim().is_empty() {
        return Err(AppError::MalformedOutput("model reply is empty".to_string()));
    }

    let json_text = extract_json(text)
        .ok_or_else(|| AppError::MalformedOutput("no JSON found in model reply".to_string()))?;
    let payload: Value = serde_json::from_str(json_text)
        .map_err(|e| AppError::MalformedOutput(format!("invalid JSON: {}", e)))?;

    let (items, status_message) = match &payload {
        Value::Array(items) => (items, None),
        Value::Object(map) => {
            let items = match map.get("ideas").or_else(|| map.get("recommendations")) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(AppError::MalformedOutput(
                        "reply has no ideas array".to_string(),
                    ))
                }
            };
            let status = map
                .get("statusMessage")
                .or_else(|| map.get("status_message"))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from);
            (items, status)
        }
        _ => {
            return Err(AppError::MalformedOutput(
                "reply is neither an object nor an array".to_string(),
            ))
        }
    };

    let mut seen_ids = HashSet::new();
    let mut ideas = Vec::with_capacity(MAX_IDEAS);

    for (index, item) in items.iter().enumerate() {
        if ideas.len() == MAX_IDEAS {
            break;
        }
        match normalize_idea(item, index) {
            Ok(mut idea) => {
                idea.id = unique_id(idea.id, &mut seen_ids);
                ideas.push(idea);
            }
            Err(reason) => {
                tracing::warn!(index, reason = %reason, "Discarding unrepairable idea");
            }
        }
    }

    if ideas.is_empty() {
        return Err(AppError::MalformedOutput(
            "reply contained no valid ideas".to_string(),
        ));
    }

    tracing::debug!(
        received = items.len(),
        kept = ideas.len(),
        "Model output normalized"
    );

    Ok(Recommendation {
        ideas,
        status_message,
    })
}

/// Finds the JSON document inside a reply, stripping markdown fences and
/// surrounding prose.
fn extract_json(text: &str) -> Option<&str> {
    let body = strip_fence(text.trim());

    if serde_json::from_str::<Value>(body).is_ok() {
        return Some(body);
    }

    // Whichever bracket opens first decides between object and array
    let start = body.find(|c| c == '{' || c == '[')?;
    let close = if body[start..].starts_with('{') { '}' } else { ']' };
    let end = body.rfind(close).filter(|&end| end > start)?;
    Some(&body[start..=end])
}

/// Removes a leading ```` ``` ```` fence, its optional language tag and the
/// closing fence. Works whether or not the fence sits on its own line.
fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let rest = match rest.rfind("```") {
        Some(end) => &rest[..end],
        None => rest,
    };
    rest.trim()
}

fn normalize_idea(value: &Value, index: usize) -> Result<Idea, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "idea is not an object".to_string())?;

    let title = required_text(obj, "title")?;
    let description = required_text(obj, "description")?;
    let time = required_text(obj, "time")?;
    let budget = required_text(obj, "budget")?;

    let id = text(obj, "id")
        .or_else(|| Some(slugify(&title)).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| format!("idea-{}", index + 1));

    Ok(Idea {
        id,
        people: required_enum(obj, "people", StoredPeople::parse_loose)?,
        group: required_enum(obj, "group", StoredGroup::parse_loose)?,
        age: required_enum(obj, "age", AgeOption::parse_loose)?,
        mood: required_enum(obj, "mood", LegacyMood::parse_loose)?,
        energy: required_enum(obj, "energy", Energy::parse_loose)?,
        place: required_enum(obj, "place", Place::parse_loose)?,
        repeatable: flag(obj, "repeatable")?,
        season: season(obj),
        alcohol: flag(obj, "alcohol")?,
        tips: text(obj, "tips"),
        title,
        description,
        time,
        budget,
    })
}

/// Trimmed, non-empty text; numbers are accepted and stringified
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_text(obj: &Map<String, Value>, key: &str) -> Result<String, String> {
    text(obj, key).ok_or_else(|| format!("missing {}", key))
}

fn required_enum<T>(
    obj: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, String> {
    let raw = text(obj, key).ok_or_else(|| format!("missing {}", key))?;
    parse(&raw).ok_or_else(|| format!("unknown {} value {:?}", key, raw))
}

fn flag(obj: &Map<String, Value>, key: &str) -> Result<bool, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "예" | "네" | "o" => Ok(true),
            "false" | "no" | "n" | "0" | "아니오" | "아니요" | "x" | "" => Ok(false),
            other => Err(format!("unknown {} value {:?}", key, other)),
        },
        Some(_) => Err(format!("{} is not a boolean", key)),
    }
}

fn season(obj: &Map<String, Value>) -> Vec<String> {
    let seasons: Vec<String> = match obj.get("season") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    };

    if seasons.is_empty() {
        default_season()
    } else {
        seasons
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn unique_id(id: String, seen: &mut HashSet<String>) -> String {
    if seen.insert(id.clone()) {
        return id;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", id, n);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_idea(id: &str) -> Value {
        json!({
            "id": id,
            "title": "한강 피크닉",
            "description": "돗자리와 간식을 챙겨 한강에서 여유를 즐겨요.",
            "time": "2-3시간",
            "budget": "1인 1만원",
            "people": "둘",
            "group": "섞임",
            "age": "20",
            "mood": "밖",
            "energy": "low",
            "place": "outdoor",
            "repeatable": true,
            "season": ["spring", "fall"],
            "alcohol": false,
            "tips": "해 질 녘에 가면 더 좋아요."
        })
    }

    #[test]
    fn test_parses_canonical_reply() {
        let reply = json!({
            "ideas": [valid_idea("picnic")],
            "statusMessage": "오늘은 한강이 좋아요!"
        })
        .to_string();

        let rec = parse_model_output(&reply).unwrap();
        assert_eq!(rec.ideas.len(), 1);
        assert_eq!(rec.status_message.as_deref(), Some("오늘은 한강이 좋아요!"));

        let idea = &rec.ideas[0];
        assert_eq!(idea.id, "picnic");
        assert_eq!(idea.people, StoredPeople::Pair);
        assert_eq!(idea.place, Place::Outdoor);
        assert_eq!(idea.season, vec!["spring".to_string(), "fall".to_string()]);
        assert_eq!(idea.tips.as_deref(), Some("해 질 녘에 가면 더 좋아요."));
    }

    #[test]
    fn test_empty_reply_is_error() {
        assert!(matches!(
            parse_model_output("   "),
            Err(AppError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_non_json_reply_is_error() {
        assert!(parse_model_output("죄송하지만 추천할 수 없어요.").is_err());
    }

    #[test]
    fn test_strips_markdown_fence() {
        let reply = format!(
            "```json\n{}\n```",
            json!({ "ideas": [valid_idea("picnic")] })
        );
        let rec = parse_model_output(&reply).unwrap();
        assert_eq!(rec.ideas[0].id, "picnic");
        assert!(rec.status_message.is_none());
    }

    #[test]
    fn test_extracts_object_from_prose() {
        let reply = format!(
            "물론이죠! 추천은 다음과 같아요:\n{}\n즐거운 시간 보내세요.",
            json!({ "ideas": [valid_idea("picnic")] })
        );
        let rec = parse_model_output(&reply).unwrap();
        assert_eq!(rec.ideas.len(), 1);
    }

    #[test]
    fn test_object_followed_by_prose() {
        let reply = format!(
            "{}\n이상 5가지 추천이었어요!",
            json!({ "ideas": [valid_idea("picnic")] })
        );
        let rec = parse_model_output(&reply).unwrap();
        assert_eq!(rec.ideas[0].id, "picnic");
    }

    #[test]
    fn test_prose_followed_by_bare_array() {
        let reply = format!(
            "추천 목록입니다:\n{}",
            json!([valid_idea("a"), valid_idea("b")])
        );
        let rec = parse_model_output(&reply).unwrap();
        let ids: Vec<_> = rec.ideas.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let reply = format!("하나만 골랐어요: {}", json!([valid_idea("solo")]));
        assert_eq!(parse_model_output(&reply).unwrap().ideas[0].id, "solo");
    }

    #[test]
    fn test_fence_on_single_line() {
        let reply = format!("```json {}```", json!({ "ideas": [valid_idea("picnic")] }));
        assert_eq!(parse_model_output(&reply).unwrap().ideas.len(), 1);

        let reply = format!("```{}```", json!([valid_idea("plain")]));
        assert_eq!(parse_model_output(&reply).unwrap().ideas[0].id, "plain");
    }

    #[test]
    fn test_fence_after_prose() {
        let reply = format!(
            "여기 있어요:\n```json\n{}\n```",
            json!({ "ideas": [valid_idea("picnic")] })
        );
        assert_eq!(parse_model_output(&reply).unwrap().ideas.len(), 1);
    }

    #[test]
    fn test_accepts_bare_array_and_alias_keys() {
        let reply = json!([valid_idea("a"), valid_idea("b")]).to_string();
        assert_eq!(parse_model_output(&reply).unwrap().ideas.len(), 2);

        let reply = json!({
            "recommendations": [valid_idea("a")],
            "status_message": "준비 완료"
        })
        .to_string();
        let rec = parse_model_output(&reply).unwrap();
        assert_eq!(rec.status_message.as_deref(), Some("준비 완료"));
    }

    #[test]
    fn test_object_without_ideas_is_error() {
        let reply = json!({ "statusMessage": "hi" }).to_string();
        assert!(parse_model_output(&reply).is_err());
    }

    #[test]
    fn test_repairs_loose_fields() {
        let reply = json!({
            "ideas": [{
                "title": "Board Game Night",
                "description": "보드게임 카페에서 새 게임에 도전해요.",
                "time": "2시간",
                "budget": 10000,
                "people": "3~4",
                "group": "남자",
                "age": 30,
                "mood": "적당",
                "energy": "Medium",
                "place": "실내",
                "repeatable": "yes",
                "season": "winter, spring",
                "alcohol": "no",
                "tips": "  "
            }]
        })
        .to_string();

        let idea = parse_model_output(&reply).unwrap().ideas.remove(0);
        assert_eq!(idea.id, "board-game-night");
        assert_eq!(idea.budget, "10000");
        assert_eq!(idea.people, StoredPeople::Small);
        assert_eq!(idea.group, StoredGroup::Male);
        assert_eq!(idea.age, AgeOption::Thirties);
        assert_eq!(idea.energy, Energy::Mid);
        assert_eq!(idea.place, Place::Indoor);
        assert!(idea.repeatable);
        assert!(!idea.alcohol);
        assert_eq!(idea.season, vec!["winter".to_string(), "spring".to_string()]);
        assert_eq!(idea.tips, None);
    }

    #[test]
    fn test_missing_flags_and_season_get_defaults() {
        let mut idea = valid_idea("x");
        let obj = idea.as_object_mut().unwrap();
        obj.remove("repeatable");
        obj.remove("alcohol");
        obj.remove("season");

        let reply = json!({ "ideas": [idea] }).to_string();
        let idea = parse_model_output(&reply).unwrap().ideas.remove(0);
        assert!(!idea.repeatable);
        assert!(!idea.alcohol);
        assert_eq!(idea.season, vec!["all".to_string()]);
    }

    #[test]
    fn test_flag_forms() {
        let cases = [
            (json!("예"), true),
            (json!("아니오"), false),
            (json!(1), true),
            (json!(0), false),
            (json!("YES"), true),
            (json!(null), false),
        ];
        for (raw, expected) in cases {
            let mut idea = valid_idea("x");
            idea["alcohol"] = raw.clone();
            let reply = json!({ "ideas": [idea] }).to_string();
            let idea = parse_model_output(&reply).unwrap().ideas.remove(0);
            assert_eq!(idea.alcohol, expected, "alcohol = {raw}");
        }
    }

    #[test]
    fn test_unknown_flag_string_drops_idea() {
        let mut bad = valid_idea("bad");
        bad["repeatable"] = json!("sometimes");
        let reply = json!({ "ideas": [bad, valid_idea("good")] }).to_string();
        let rec = parse_model_output(&reply).unwrap();
        let ids: Vec<_> = rec.ideas.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["good"]);
    }

    #[test]
    fn test_drops_unrepairable_ideas() {
        let mut bad_mood = valid_idea("bad-mood");
        bad_mood["mood"] = json!("릴랙스");
        let mut no_title = valid_idea("no-title");
        no_title["title"] = json!("");

        let reply = json!({ "ideas": [bad_mood, valid_idea("good"), no_title, "text"] })
            .to_string();
        let rec = parse_model_output(&reply).unwrap();
        let ids: Vec<_> = rec.ideas.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["good"]);
    }

    #[test]
    fn test_all_invalid_is_error() {
        let mut bad = valid_idea("bad");
        bad["energy"] = json!("extreme");
        let reply = json!({ "ideas": [bad] }).to_string();
        assert!(matches!(
            parse_model_output(&reply),
            Err(AppError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_caps_at_five_and_dedupes_ids() {
        let items: Vec<_> = (0..7).map(|_| valid_idea("same")).collect();
        let reply = json!({ "ideas": items }).to_string();

        let rec = parse_model_output(&reply).unwrap();
        let ids: Vec<_> = rec.ideas.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["same", "same-2", "same-3", "same-4", "same-5"]);
    }

    #[test]
    fn test_id_falls_back_to_index_when_title_has_no_slug() {
        let mut idea = valid_idea("ignored");
        let obj = idea.as_object_mut().unwrap();
        obj.remove("id");
        obj.insert("title".to_string(), json!("!!!"));

        let reply = json!({ "ideas": [idea] }).to_string();
        let rec = parse_model_output(&reply).unwrap();
        assert_eq!(rec.ideas[0].id, "idea-1");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Escape Room!"), "escape-room");
        assert_eq!(slugify("  한강 피크닉 "), "한강-피크닉");
        assert_eq!(slugify("---"), "");
    }
}
