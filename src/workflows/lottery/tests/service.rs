use std::sync::Arc;

use super::common::*;
use crate::config::LotteryConfig;
use crate::workflows::lottery::{
    DrawRequest, DrawStrategy, LotteryError, LotteryService, LotteryServiceError, LotterySession,
    RuleSet, RuleToggle, UnknownResidentPolicy,
};

#[test]
fn draw_commits_and_publishes_the_round() {
    let (service, publisher) = build_service();

    let round = service
        .draw(DrawRequest::count(4, RuleSet::unrestricted()))
        .expect("draw succeeds");

    let notices = publisher.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].round, round.round);
    assert_eq!(notices[0].pairs.len(), 4);
    assert_eq!(service.history().expect("history").len(), 1);

    let pool = service.snapshot().expect("snapshot");
    assert_eq!(pool.rounds_drawn, 1);
    assert_eq!(pool.available_residents.total, 573 - 4);
}

#[test]
fn failed_draws_are_not_published() {
    let (service, publisher) = build_service();
    let rules = RuleSet::from_toggles([RuleToggle::OnlyMotorcycle]);

    match service.draw(DrawRequest::count(9, rules)) {
        Err(LotteryServiceError::Lottery(LotteryError::Capacity(error))) => {
            assert_eq!(error.available, 8);
        }
        other => panic!("expected capacity error, got {other:?}"),
    }
    assert!(publisher.notices().is_empty());
    assert!(service.history().expect("history").is_empty());
}

#[test]
fn undelivered_notices_keep_the_committed_round() {
    let service = LotteryService::new(
        LotterySession::standard(),
        Arc::new(UnavailablePublisher),
        &lottery_config(),
    );

    let round = service
        .draw(DrawRequest::count(1, RuleSet::unrestricted()))
        .expect("round commits while the publisher is offline");

    let history = service.history().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].winners, round.winners);

    let next = service
        .draw(DrawRequest::count(1, RuleSet::unrestricted()))
        .expect("second round commits");
    assert_eq!(next.round, round.round + 1);
}

#[test]
fn notices_follow_round_order_across_threads() {
    let (service, publisher) = build_service();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                for _ in 0..5 {
                    service
                        .draw(DrawRequest::count(2, RuleSet::unrestricted()))
                        .expect("draw succeeds");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("draw thread");
    }

    let rounds: Vec<u32> = publisher.notices().iter().map(|notice| notice.round).collect();
    let expected: Vec<u32> = (1..=20).collect();
    assert_eq!(rounds, expected);
}

#[test]
fn reset_reopens_the_session() {
    let (service, _) = build_service();
    service
        .draw(DrawRequest::count(10, RuleSet::unrestricted()))
        .expect("draw succeeds");

    let pool = service.reset().expect("reset");

    assert_eq!(pool.rounds_drawn, 0);
    assert_eq!(pool.available_spaces, 500);
    assert_eq!(pool.unavailable_spaces, 0);
    assert_eq!(pool.available_residents.total, 573);
}

#[test]
fn configured_seed_makes_sessions_reproducible() {
    let (first, _) = build_service();
    let (second, _) = build_service();
    let request = DrawRequest::count(6, RuleSet::from_toggles([RuleToggle::AreaRestriction]));

    let a = first.draw(request.clone()).expect("draw succeeds");
    let b = second.draw(request).expect("draw succeeds");

    assert_eq!(a.winners, b.winners);
}

#[test]
fn configuration_drives_engine_policy_and_default_strategy() {
    let config = LotteryConfig {
        default_strategy: DrawStrategy::Direct,
        unknown_residents: UnknownResidentPolicy::Reject,
        ..lottery_config()
    };
    let service = LotteryService::new(
        LotterySession::standard(),
        Arc::new(MemoryPublisher::default()),
        &config,
    );

    assert_eq!(service.default_strategy(), DrawStrategy::Direct);
    let preview = service
        .preview(&RuleSet::from_toggles([RuleToggle::LargePriority]), None)
        .expect("preview");
    assert_eq!(preview.strategy, DrawStrategy::Direct);

    let error = service
        .draw(DrawRequest::residents(["Z99F99"], RuleSet::unrestricted()))
        .expect_err("unknown resident rejected");
    assert!(matches!(
        error,
        LotteryServiceError::Lottery(LotteryError::UnknownResidents(_))
    ));
}

#[test]
fn pool_listings_shrink_as_rounds_commit() {
    let (service, _) = build_service();
    let before = service.available_spaces().expect("spaces").len();

    service
        .draw(DrawRequest::count(7, RuleSet::unrestricted()))
        .expect("draw succeeds");

    assert_eq!(service.available_spaces().expect("spaces").len(), before - 7);
    assert_eq!(
        service.available_residents().expect("residents").residents.len(),
        573 - 7
    );
}
