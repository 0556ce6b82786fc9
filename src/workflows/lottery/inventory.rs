//! Built-in roster and car-park inventory for the community the lottery was first run for.

use super::domain::{AllocationZone, AreaCode, ParkingSpace, Resident, SpaceSize};

use AllocationZone::{Motorcycle, Reserved, Store};
use SpaceSize::{Accessible, Large, Small, Unmarked};

/// Store-keeper units on the ground floor. Numbers 4 and 14 are skipped in the building.
const STORE_UNITS: [u8; 20] = [
    1, 2, 3, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 16, 17, 18, 19, 20, 21, 22,
];

/// Residential towers as (area, floors, first unit, last unit).
const TOWERS: [(AreaCode, u8, u8, u8); 3] = [
    (AreaCode::A, 8, 3, 25),
    (AreaCode::B, 9, 4, 23),
    (AreaCode::C, 9, 3, 23),
];

/// Numbered runs of spaces sharing size and zone, in painted order.
const SPACE_RUNS: [(u16, u16, SpaceSize, AllocationZone); 45] = [
    (1, 4, Large, Motorcycle),
    (5, 8, Large, AllocationZone::A),
    (9, 11, Small, AllocationZone::A),
    (12, 16, Small, Store),
    (19, 20, Small, Motorcycle),
    (21, 22, Large, Motorcycle),
    (27, 27, Small, Store),
    (32, 48, Large, AllocationZone::A),
    (49, 67, Large, AllocationZone::B),
    (68, 91, Large, AllocationZone::C),
    (92, 93, Small, AllocationZone::C),
    (94, 96, Large, AllocationZone::C),
    (97, 100, Small, AllocationZone::C),
    (101, 102, Large, AllocationZone::C),
    (103, 103, Large, AllocationZone::B),
    (104, 104, Small, AllocationZone::B),
    (105, 117, Large, AllocationZone::B),
    (118, 124, Large, AllocationZone::A),
    (125, 125, Unmarked, AllocationZone::A),
    (126, 130, Small, AllocationZone::A),
    (131, 158, Large, AllocationZone::A),
    (159, 159, Small, AllocationZone::A),
    (160, 167, Large, AllocationZone::A),
    (168, 168, Small, AllocationZone::B),
    (169, 200, Large, AllocationZone::B),
    (201, 224, Large, AllocationZone::C),
    (225, 228, Small, AllocationZone::C),
    (229, 234, Large, AllocationZone::C),
    (235, 251, Small, AllocationZone::C),
    (252, 258, Large, AllocationZone::C),
    (259, 261, Small, AllocationZone::C),
    (262, 276, Large, AllocationZone::C),
    (277, 278, Large, AllocationZone::B),
    (279, 281, Small, AllocationZone::B),
    (282, 285, Large, AllocationZone::B),
    (286, 286, Small, AllocationZone::B),
    (287, 292, Large, AllocationZone::B),
    (293, 294, Small, AllocationZone::B),
    (295, 296, Large, AllocationZone::B),
    (297, 300, Large, AllocationZone::A),
    (301, 302, Small, AllocationZone::A),
    (303, 305, Large, AllocationZone::A),
    (306, 331, Small, AllocationZone::A),
    (332, 345, Small, Store),
    (346, 361, Small, AllocationZone::A),
];

const LATE_SPACE_RUNS: [(u16, u16, SpaceSize, AllocationZone); 4] = [
    (362, 395, Small, AllocationZone::B),
    (396, 444, Small, AllocationZone::C),
    (445, 478, Small, AllocationZone::B),
    (479, 494, Small, AllocationZone::A),
];

/// Accessible bays held back from the draw; they only open up after a full reset.
const RESERVED_BAYS: [&str; 16] = [
    "17A", "17B", "18A", "18B", "23A", "23B", "24A", "24B", "25A", "25B", "26A", "26B", "28",
    "29", "30", "31",
];

pub fn standard_residents() -> Vec<Resident> {
    let store_keepers = STORE_UNITS
        .iter()
        .map(|unit| Resident::new(format!("S{unit:02}F01"), AreaCode::S));

    let towers = TOWERS
        .iter()
        .flat_map(|&(area, floors, first, last)| {
            (1..=floors).flat_map(move |floor| {
                (first..=last).map(move |unit| {
                    Resident::new(format!("{}0{floor}F{unit:02}", area.label()), area)
                })
            })
        });

    store_keepers.chain(towers).collect()
}

pub fn standard_spaces() -> Vec<ParkingSpace> {
    let mut spaces: Vec<(u16, ParkingSpace)> = SPACE_RUNS
        .iter()
        .chain(LATE_SPACE_RUNS.iter())
        .flat_map(|&(first, last, size, zone)| {
            (first..=last)
                .map(move |number| (number, ParkingSpace::new(number.to_string(), size, zone)))
        })
        .collect();

    spaces.extend(RESERVED_BAYS.iter().map(|bay| {
        let number = bay
            .trim_end_matches(|c: char| c.is_ascii_alphabetic())
            .parse::<u16>()
            .unwrap_or(u16::MAX);
        (number, ParkingSpace::new(*bay, Accessible, Reserved).unavailable())
    }));

    // Stable sort keeps A before B within a numbered bay pair.
    spaces.sort_by_key(|(number, _)| *number);
    spaces.into_iter().map(|(_, space)| space).collect()
}
