use std::collections::HashSet;

use super::common::*;
use crate::workflows::lottery::{
    AreaCode, DrawRequest, DrawStrategy, LotterySession, RuleSet, RuleToggle,
};

#[test]
fn rounds_are_numbered_in_commit_order() {
    let mut session = LotterySession::standard();
    let mut rng = rng(10);

    let first = session
        .draw(&DrawRequest::count(3, RuleSet::unrestricted()), &mut rng)
        .expect("first round")
        .round;
    let second = session
        .draw(&DrawRequest::count(2, RuleSet::unrestricted()), &mut rng)
        .expect("second round")
        .round;

    assert_eq!((first, second), (1, 2));
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.available_residents().len(), 573 - 5);
    assert_eq!(session.available_spaces().len(), 484 - 5);
}

#[test]
fn failed_draws_do_not_consume_a_round_number() {
    let mut session = LotterySession::standard();
    let mut rng = rng(12);

    session
        .draw(&DrawRequest::count(0, RuleSet::unrestricted()), &mut rng)
        .expect_err("empty draw refused");
    let round = session
        .draw(&DrawRequest::count(1, RuleSet::unrestricted()), &mut rng)
        .expect("draw succeeds");

    assert_eq!(round.round, 1);
}

#[test]
fn uniqueness_holds_across_many_rounds() {
    let mut session = LotterySession::standard();
    let mut rng = rng(2024);
    let rule_cycle = [
        RuleSet::unrestricted(),
        RuleSet::from_toggles([RuleToggle::AreaRestriction]),
        RuleSet::from_toggles([RuleToggle::LargePriority, RuleToggle::AreaRestriction]),
        RuleSet::from_toggles([RuleToggle::ExcludeMotorcycle, RuleToggle::ExcludeStore]),
    ];

    for round in 0..12 {
        let rules = rule_cycle[round % rule_cycle.len()];
        let strategy = if round % 3 == 0 {
            DrawStrategy::Direct
        } else {
            DrawStrategy::Matched
        };
        session
            .draw(&DrawRequest::count(30, rules).with_strategy(strategy), &mut rng)
            .expect("pools are large enough");
    }

    let mut won_spaces = HashSet::new();
    let mut won_residents = HashSet::new();
    for round in session.history() {
        for won in &round.winners {
            assert!(won_spaces.insert(won.space.id.clone()), "space {} reused", won.space.id);
            assert!(
                won_residents.insert(won.resident.id.clone()),
                "resident {} won twice",
                won.resident.id
            );
        }
    }

    assert_eq!(won_spaces.len(), 12 * 30);
    assert!(session
        .available_spaces()
        .iter()
        .all(|space| !won_spaces.contains(&space.id)));
    assert!(session
        .available_residents()
        .iter()
        .all(|resident| !won_residents.contains(&resident.id)));
}

#[test]
fn reset_restores_full_inventory_and_is_idempotent() {
    let mut session = LotterySession::standard();
    session
        .draw(&DrawRequest::count(25, RuleSet::unrestricted()), &mut rng(6))
        .expect("draw succeeds");

    session.reset();
    let once = session.clone();
    session.reset();

    assert!(session.history().is_empty());
    assert_eq!(session.available_residents(), session.roster());
    assert_eq!(session.available_spaces().len(), 500);
    assert_eq!(session.spaces(), once.spaces());
    assert_eq!(session.available_residents(), once.available_residents());
}

#[test]
fn area_counts_track_the_available_pool() {
    let mut session = LotterySession::standard();
    let counts = session.area_counts();
    assert_eq!(counts.s, 20);
    assert_eq!(counts.get(AreaCode::A), 8 * 23);
    assert_eq!(counts.total, 573);

    let store_keeper = session
        .available_residents()
        .iter()
        .find(|resident| resident.area == AreaCode::S)
        .map(|resident| resident.id.clone())
        .expect("store-keeper present");
    session
        .draw(
            &DrawRequest::residents([store_keeper], RuleSet::unrestricted()),
            &mut rng(1),
        )
        .expect("draw succeeds");

    let counts = session.area_counts();
    assert_eq!(counts.s, 19);
    assert_eq!(counts.total, 572);
}

#[test]
fn preview_counts_eligible_spaces_per_strategy() {
    let session = LotterySession::standard();
    let rules = RuleSet::from_toggles([RuleToggle::LargePriority]);

    let matched = session
        .preview(&rules, DrawStrategy::Matched)
        .expect("valid rules");
    let direct = session
        .preview(&rules, DrawStrategy::Direct)
        .expect("valid rules");

    assert_eq!(matched.eligible_spaces, 484);
    assert!(direct.eligible_spaces < matched.eligible_spaces);
    assert_eq!(direct.available_residents.total, 573);

    let conflicting = RuleSet {
        no_restriction: true,
        only_store: true,
        ..RuleSet::default()
    };
    assert_eq!(
        session
            .preview(&conflicting, DrawStrategy::Matched)
            .expect_err("conflict")
            .kind(),
        "configuration"
    );
}
