use std::sync::{Arc, Mutex};

use axum::response::Response;
use axum::Router;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::config::LotteryConfig;
use crate::workflows::lottery::{
    lottery_router, AllocationZone, AreaCode, LotteryService, LotterySession, ParkingSpace,
    PublishError, Resident, RoundNotice, RoundPublisher, SpaceSize,
};

pub(super) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(super) fn space(id: &str, size: SpaceSize, zone: AllocationZone) -> ParkingSpace {
    ParkingSpace::new(id, size, zone)
}

pub(super) fn resident(id: &str, area: AreaCode) -> Resident {
    Resident::new(id, area)
}

/// One space of every size and zone combination the rules distinguish.
pub(super) fn mixed_pool() -> Vec<ParkingSpace> {
    vec![
        space("1", SpaceSize::Large, AllocationZone::Motorcycle),
        space("2", SpaceSize::Small, AllocationZone::Motorcycle),
        space("5", SpaceSize::Large, AllocationZone::A),
        space("9", SpaceSize::Small, AllocationZone::A),
        space("49", SpaceSize::Large, AllocationZone::B),
        space("104", SpaceSize::Small, AllocationZone::B),
        space("68", SpaceSize::Large, AllocationZone::C),
        space("92", SpaceSize::Small, AllocationZone::C),
        space("12", SpaceSize::Small, AllocationZone::Store),
        space("17A", SpaceSize::Accessible, AllocationZone::Reserved),
        space("17B", SpaceSize::Accessible, AllocationZone::Reserved),
    ]
}

pub(super) fn mixed_residents() -> Vec<Resident> {
    vec![
        resident("S01F01", AreaCode::S),
        resident("A01F03", AreaCode::A),
        resident("A01F04", AreaCode::A),
        resident("B01F04", AreaCode::B),
        resident("C01F03", AreaCode::C),
        resident("C01F04", AreaCode::C),
    ]
}

/// Standard inventory with the reserved bays opened up.
pub(super) fn open_inventory() -> Vec<ParkingSpace> {
    let mut session = LotterySession::standard();
    session.reset();
    session.spaces().to_vec()
}

pub(super) fn lottery_config() -> LotteryConfig {
    LotteryConfig {
        seed: Some(42),
        ..LotteryConfig::default()
    }
}

#[derive(Default)]
pub(super) struct MemoryPublisher {
    notices: Arc<Mutex<Vec<RoundNotice>>>,
}

impl MemoryPublisher {
    pub(super) fn notices(&self) -> Vec<RoundNotice> {
        self.notices.lock().expect("publisher mutex poisoned").clone()
    }
}

impl RoundPublisher for MemoryPublisher {
    fn publish(&self, notice: RoundNotice) -> Result<(), PublishError> {
        self.notices
            .lock()
            .expect("publisher mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct UnavailablePublisher;

impl RoundPublisher for UnavailablePublisher {
    fn publish(&self, _notice: RoundNotice) -> Result<(), PublishError> {
        Err(PublishError::Transport("result board offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<LotteryService<MemoryPublisher>>, Arc<MemoryPublisher>) {
    let publisher = Arc::new(MemoryPublisher::default());
    let service = LotteryService::new(
        LotterySession::standard(),
        publisher.clone(),
        &lottery_config(),
    );
    (Arc::new(service), publisher)
}

pub(super) fn router_with_service(service: Arc<LotteryService<MemoryPublisher>>) -> Router {
    lottery_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
