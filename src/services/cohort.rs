//! Anonymous peer cohort comparison.
//!
//! A cohort is every other user who shares an interest category, the same
//! commitment level, and the same pre-bucketed age range. The subject's skill
//! level is ranked against the cohort with a midpoint-of-ties percentile and
//! paired with an encouraging message.
//!
//! Precondition owned by the caller: only pass users who opted into
//! comparisons, and only include peers whose privacy preferences allow it.
//! Gating lives at the data-access boundary, not here.

use crate::types::{CohortComparison, Interest, SkillLevel, UserInterests};

/// Computes one [`CohortComparison`] per subject interest that has at least
/// one qualifying peer. Interests with an empty cohort are omitted.
pub fn compare(subject: &UserInterests, population: &[UserInterests]) -> Vec<CohortComparison> {
    subject
        .interests
        .iter()
        .filter_map(|interest| {
            let peer_levels = cohort_levels(subject, interest, population);
            if peer_levels.is_empty() {
                return None;
            }
            let percentile = percentile_rank(interest.current_level, &peer_levels);
            Some(CohortComparison {
                interest: interest.category,
                intent_level: interest.intent_level,
                age_range: subject.age_range,
                cohort_size: peer_levels.len() as u32,
                percentile,
                encouraging_message: encouraging_message(percentile).to_string(),
            })
        })
        .collect()
}

/// Skill ranks of every peer interest in the subject's cohort for one
/// category. Age range is an opaque equality key; bucket boundaries are owned
/// upstream.
fn cohort_levels(
    subject: &UserInterests,
    interest: &Interest,
    population: &[UserInterests],
) -> Vec<u8> {
    population
        .iter()
        .filter(|peer| peer.user_id != subject.user_id && peer.age_range == subject.age_range)
        .flat_map(|peer| peer.interests.iter())
        .filter(|peer_interest| {
            peer_interest.category == interest.category
                && peer_interest.intent_level == interest.intent_level
        })
        .map(|peer_interest| peer_interest.current_level.rank())
        .collect()
}

/// Midpoint-of-ties percentile: peers strictly below count fully, ties count
/// half. Avoids the 0%/100% artifacts of naive rank percentiles.
pub fn percentile_rank(level: SkillLevel, peer_levels: &[u8]) -> u8 {
    debug_assert!(!peer_levels.is_empty());
    let rank = level.rank();
    let less = peer_levels.iter().filter(|&&peer| peer < rank).count() as f64;
    let equal = peer_levels.iter().filter(|&&peer| peer == rank).count() as f64;
    let percentile = ((less + 0.5 * equal) / peer_levels.len() as f64 * 100.0).round();
    percentile.clamp(0.0, 100.0) as u8
}

/// Band-keyed feedback. Always growth-oriented, including the lowest band;
/// discouraging copy is a product defect.
pub fn encouraging_message(percentile: u8) -> &'static str {
    match percentile {
        90..=100 => "You're in the top tier of your peer group. Keep leading the way!",
        75..=89 => "You're ahead of most peers at your commitment level. Great momentum!",
        50..=74 => "You're keeping pace with your cohort and still climbing. Stay with it!",
        25..=49 => "You're building solid ground. Steady practice moves you up quickly.",
        _ => "Everyone starts somewhere, and you have the most room to grow. Keep going!",
    }
}
