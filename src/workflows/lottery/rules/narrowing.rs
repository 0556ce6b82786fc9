use super::super::domain::{ParkingSpace, Resident, SpaceSize};
use super::config::RuleSet;

/// Indices into `pool` that `resident` may draw from during the first pass.
///
/// Area restriction is a hard filter. Size priority only narrows when at least one
/// large space survives, so it never leaves a resident without candidates.
pub(crate) fn candidate_indices(
    resident: &Resident,
    pool: &[ParkingSpace],
    rules: &RuleSet,
) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..pool.len()).collect();

    if rules.area_restriction {
        let zone = resident.area.home_zone();
        candidates.retain(|&index| pool[index].zone == zone);
    }

    if rules.large_priority {
        let large: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&index| pool[index].size == SpaceSize::Large)
            .collect();
        if !large.is_empty() {
            candidates = large;
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::lottery::domain::{AllocationZone, AreaCode};
    use crate::workflows::lottery::rules::RuleToggle;

    fn pool() -> Vec<ParkingSpace> {
        vec![
            ParkingSpace::new("1", SpaceSize::Large, AllocationZone::Motorcycle),
            ParkingSpace::new("2", SpaceSize::Small, AllocationZone::A),
            ParkingSpace::new("3", SpaceSize::Large, AllocationZone::A),
            ParkingSpace::new("4", SpaceSize::Small, AllocationZone::Store),
        ]
    }

    #[test]
    fn without_narrowing_rules_every_space_is_a_candidate() {
        let resident = Resident::new("A01F03", AreaCode::A);
        let candidates = candidate_indices(&resident, &pool(), &RuleSet::unrestricted());
        assert_eq!(candidates, vec![0, 1, 2, 3]);
    }

    #[test]
    fn area_restriction_matches_resident_area_to_zone() {
        let resident = Resident::new("A01F03", AreaCode::A);
        let rules = RuleSet::default().with(RuleToggle::AreaRestriction);
        assert_eq!(candidate_indices(&resident, &pool(), &rules), vec![1, 2]);
    }

    #[test]
    fn store_keepers_match_the_store_zone() {
        let resident = Resident::new("S01F01", AreaCode::S);
        let rules = RuleSet::default().with(RuleToggle::AreaRestriction);
        assert_eq!(candidate_indices(&resident, &pool(), &rules), vec![3]);
    }

    #[test]
    fn large_priority_narrows_within_the_area() {
        let resident = Resident::new("A01F03", AreaCode::A);
        let rules = RuleSet::default()
            .with(RuleToggle::AreaRestriction)
            .with(RuleToggle::LargePriority);
        assert_eq!(candidate_indices(&resident, &pool(), &rules), vec![2]);
    }

    #[test]
    fn large_priority_falls_back_when_no_large_space_remains() {
        let resident = Resident::new("S01F01", AreaCode::S);
        let rules = RuleSet::default()
            .with(RuleToggle::AreaRestriction)
            .with(RuleToggle::LargePriority);
        assert_eq!(candidate_indices(&resident, &pool(), &rules), vec![3]);
    }
}
