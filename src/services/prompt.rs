use crate::models::Filters;

/// Instructions sent with every generation request.
///
/// Lists the legacy enum vocabulary so replies line up with the curated
/// dataset schema.
pub const SYSTEM_PROMPT: &str = "\
너는 한국어로 답하는 액티비티 추천 도우미야.
항상 액티비티 5개를 추천하고, 설명 없이 JSON 객체 하나로만 응답해.
각 액티비티에는 아래 필드가 모두 있어야 해:
- id: 영문 소문자와 하이픈 조합 권장
- title: 15자 안팎의 짧은 제목
- description: 무엇을 하는지 1~2문장으로 구체적으로
- time: 예) \"1-2시간\", \"30분\"
- budget: 금액 범위와 통화 단위 포함
- people: [\"혼자\",\"둘\",\"3-4\",\"5-9\",\"10+\",\"5+\",\"가족\"] 중 하나
- group: [\"남\",\"여\",\"섞임\",\"가족\"] 중 하나
- age: [\"10\",\"20\",\"30\",\"40\",\"50+\"] 중 하나
- mood: [\"조용\",\"적당\",\"신남\",\"집\",\"밖\"] 중 하나
- energy: [\"low\",\"mid\",\"high\"] 중 하나
- place: [\"home\",\"indoor\",\"outdoor\"] 중 하나
- repeatable: true/false
- season: [\"all\"] 또는 계절 문자열 배열
- alcohol: true/false
- tips: 선택 사항, 한 문장 조언
budget, description, tips는 자연스러운 한국어로 써.";

/// Builds the user turn describing the selected filters
pub fn user_prompt(filters: &Filters) -> String {
    format!(
        "선호 조건:\n\
         - 인원: {}\n\
         - 구성: {}\n\
         - 연령대: {}\n\
         - 분위기: {}\n\n\
         위 조건에 맞는 한국어 액티비티 아이디어 5개를 JSON 객체로 반환해.\n\
         응답 형태는 {{\"ideas\":[...], \"statusMessage\":\"...\"}} 이고, \
         statusMessage는 사용자에게 보여줄 한 줄 요약이야.",
        filters.people, filters.group, filters.age, filters.mood
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeOption, GroupOption, MoodOption, PeopleOption};

    #[test]
    fn test_user_prompt_contains_filters() {
        let filters = Filters {
            people: PeopleOption::Large,
            group: GroupOption::Family,
            age: AgeOption::FiftyPlus,
            mood: MoodOption::Active,
        };

        let prompt = user_prompt(&filters);
        assert!(prompt.contains("- 인원: 10+"));
        assert!(prompt.contains("- 구성: 가족"));
        assert!(prompt.contains("- 연령대: 50+"));
        assert!(prompt.contains("- 분위기: 액티브"));
        assert!(prompt.contains(r#"{"ideas":[...], "statusMessage":"..."}"#));
    }

    #[test]
    fn test_system_prompt_lists_legacy_vocabulary() {
        for value in ["\"섞임\"", "\"5+\"", "\"신남\"", "\"outdoor\"", "\"mid\""] {
            assert!(SYSTEM_PROMPT.contains(value), "missing {value}");
        }
    }
}
