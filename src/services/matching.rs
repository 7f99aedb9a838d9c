use rand::{seq::SliceRandom, Rng};

use crate::models::{
    AgeOption, Energy, Filters, GroupOption, Idea, LegacyMood, MoodOption, PeopleOption, Place,
    StoredGroup, StoredPeople,
};

/// Keeps the ideas whose legacy fields are compatible with every filter
pub fn filter_ideas<'a, I>(ideas: I, filters: &Filters) -> Vec<Idea>
where
    I: IntoIterator<Item = &'a Idea>,
{
    ideas
        .into_iter()
        .filter(|idea| matches_filters(idea, filters))
        .cloned()
        .collect()
}

pub fn matches_filters(idea: &Idea, filters: &Filters) -> bool {
    match_people(idea, filters.people)
        && match_group(idea, filters.group)
        && match_age(idea, filters.age)
        && match_mood(idea, filters.mood)
}

/// Picks a single idea uniformly at random
pub fn random_idea<'a, R: Rng + ?Sized>(ideas: &'a [Idea], rng: &mut R) -> Option<&'a Idea> {
    ideas.choose(rng)
}

/// Returns up to `count` ideas in random order
pub fn pick_random<R: Rng + ?Sized>(ideas: &[Idea], count: usize, rng: &mut R) -> Vec<Idea> {
    let mut pool = ideas.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

fn match_people(idea: &Idea, filter: PeopleOption) -> bool {
    match filter {
        PeopleOption::Solo => idea.people == StoredPeople::Solo,
        PeopleOption::Pair => idea.people == StoredPeople::Pair,
        PeopleOption::Small => idea.people == StoredPeople::Small,
        PeopleOption::Medium => {
            matches!(idea.people, StoredPeople::Medium | StoredPeople::FivePlus)
        }
        PeopleOption::Large => matches!(
            idea.people,
            StoredPeople::Large | StoredPeople::FivePlus | StoredPeople::Family
        ),
    }
}

/// Stored ideas only know 남/여/섞임/가족, so solo vs. group composition is
/// recovered from the stored head count.
fn match_group(idea: &Idea, filter: GroupOption) -> bool {
    let is_solo = idea.people == StoredPeople::Solo;
    let has_men = matches!(idea.group, StoredGroup::Male | StoredGroup::Mixed);
    let has_women = matches!(idea.group, StoredGroup::Female | StoredGroup::Mixed);

    match filter {
        GroupOption::Family => idea.group == StoredGroup::Family,
        GroupOption::Man => is_solo && has_men,
        GroupOption::Woman => is_solo && has_women,
        GroupOption::Men => !is_solo && has_men,
        GroupOption::Women => !is_solo && has_women,
    }
}

fn match_age(idea: &Idea, filter: AgeOption) -> bool {
    idea.age == filter
        || (filter == AgeOption::Forties && idea.age == AgeOption::FiftyPlus)
        || (filter == AgeOption::FiftyPlus && idea.age == AgeOption::Forties)
}

fn match_mood(idea: &Idea, filter: MoodOption) -> bool {
    match filter {
        MoodOption::Relax => idea.mood == LegacyMood::Quiet || idea.place == Place::Home,
        MoodOption::Light => matches!(idea.mood, LegacyMood::Moderate | LegacyMood::Home),
        MoodOption::Energy => idea.mood == LegacyMood::Excited || idea.energy == Energy::High,
        MoodOption::Creative => idea.place == Place::Indoor || !idea.repeatable,
        MoodOption::Active => idea.place == Place::Outdoor || idea.mood == LegacyMood::Outside,
    }
}
