use super::common::*;
use crate::workflows::lottery::{
    eligible_count, eligible_spaces, is_eligible, AllocationZone, EligibilityMode, RuleSet,
    RuleToggle, SpaceSize,
};

fn ids(spaces: &[&crate::workflows::lottery::ParkingSpace]) -> Vec<String> {
    spaces.iter().map(|space| space.id.0.clone()).collect()
}

#[test]
fn only_store_keeps_store_frontage() {
    let inventory = open_inventory();
    let rules = RuleSet::from_toggles([RuleToggle::OnlyStore]);

    let eligible = eligible_spaces(&inventory, &rules, EligibilityMode::Matching);
    assert_eq!(eligible.len(), 20);
    assert!(eligible
        .iter()
        .all(|space| space.zone == AllocationZone::Store));
}

#[test]
fn only_disabled_keeps_accessible_bays() {
    let inventory = open_inventory();
    let rules = RuleSet::from_toggles([RuleToggle::OnlyDisabled]);

    let eligible = eligible_spaces(&inventory, &rules, EligibilityMode::PoolFilter);
    assert_eq!(eligible.len(), 16);
    assert!(eligible
        .iter()
        .all(|space| space.size == SpaceSize::Accessible));
}

#[test]
fn only_disabled_finds_nothing_while_bays_are_reserved() {
    let session = crate::workflows::lottery::LotterySession::standard();
    let rules = RuleSet::from_toggles([RuleToggle::OnlyDisabled]);
    assert_eq!(
        eligible_count(session.spaces(), &rules, EligibilityMode::Matching),
        0
    );
}

#[test]
fn only_motorcycle_keeps_motorcycle_zone() {
    let inventory = open_inventory();
    let rules = RuleSet::from_toggles([RuleToggle::OnlyMotorcycle]);

    let eligible = eligible_spaces(&inventory, &rules, EligibilityMode::Matching);
    assert_eq!(eligible.len(), 8);
    assert!(eligible
        .iter()
        .all(|space| space.zone == AllocationZone::Motorcycle));
}

#[test]
fn large_priority_gates_only_when_filtering_the_pool() {
    let pool = mixed_pool();
    let rules = RuleSet::from_toggles([RuleToggle::LargePriority]);

    let filtered = eligible_spaces(&pool, &rules, EligibilityMode::PoolFilter);
    assert_eq!(ids(&filtered), vec!["1", "5", "49", "68"]);

    let matching = eligible_spaces(&pool, &rules, EligibilityMode::Matching);
    assert_eq!(matching.len(), pool.len());
}

#[test]
fn exclusions_drop_their_category_and_keep_the_rest() {
    let pool = mixed_pool();
    let rules = RuleSet::from_toggles([
        RuleToggle::ExcludeStore,
        RuleToggle::ExcludeDisabled,
        RuleToggle::ExcludeMotorcycle,
    ]);

    let eligible = eligible_spaces(&pool, &rules, EligibilityMode::Matching);
    assert_eq!(ids(&eligible), vec!["5", "9", "49", "104", "68", "92"]);
}

#[test]
fn each_exclusion_applies_on_its_own() {
    let pool = mixed_pool();
    let cases = [
        (RuleToggle::ExcludeStore, AllocationZone::Store, None),
        (RuleToggle::ExcludeMotorcycle, AllocationZone::Motorcycle, None),
        (
            RuleToggle::ExcludeDisabled,
            AllocationZone::Reserved,
            Some(SpaceSize::Accessible),
        ),
    ];

    for (toggle, zone, size) in cases {
        let rules = RuleSet::from_toggles([toggle]);
        let eligible = eligible_spaces(&pool, &rules, EligibilityMode::PoolFilter);
        assert!(
            eligible.iter().all(|space| match size {
                Some(size) => space.size != size,
                None => space.zone != zone,
            }),
            "{toggle} leaked an excluded space"
        );
        assert!(eligible.len() < pool.len(), "{toggle} excluded nothing");
    }
}

#[test]
fn no_restriction_overrides_every_other_clause() {
    let pool = mixed_pool();
    let rules = RuleSet {
        no_restriction: true,
        only_store: true,
        exclude_motorcycle: true,
        ..RuleSet::default()
    };

    for mode in [EligibilityMode::PoolFilter, EligibilityMode::Matching] {
        assert!(pool.iter().all(|space| is_eligible(space, &rules, mode)));
    }
}

#[test]
fn first_only_clause_wins_over_later_clauses() {
    let pool = mixed_pool();
    let rules = RuleSet {
        only_store: true,
        only_motorcycle: true,
        exclude_store: true,
        ..RuleSet::default()
    };

    let eligible = eligible_spaces(&pool, &rules, EligibilityMode::Matching);
    assert_eq!(ids(&eligible), vec!["12"]);
}

#[test]
fn empty_rule_set_admits_every_available_space() {
    let mut pool = mixed_pool();
    pool[0].available = false;

    let eligible = eligible_spaces(&pool, &RuleSet::default(), EligibilityMode::PoolFilter);
    assert_eq!(eligible.len(), pool.len() - 1);
    assert!(eligible.iter().all(|space| space.id.0 != "1"));
}
