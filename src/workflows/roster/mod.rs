//! CSV import of resident rosters and parking inventories.

mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::config::LotteryConfig;
use crate::workflows::lottery::{
    standard_residents, standard_spaces, AllocationZone, AreaCode, LabelError, LotterySession,
    ParkingSpace, Resident, ResidentId, SpaceId, SpaceSize,
};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { row: usize, message: String },
    Duplicate { row: usize, id: String },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidRow { row, message } => {
                write!(f, "row {}: {}", row, message)
            }
            RosterImportError::Duplicate { row, id } => {
                write!(f, "row {}: duplicate identifier '{}'", row, id)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidRow { .. } | RosterImportError::Duplicate { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

fn invalid_label(row: usize, err: LabelError) -> RosterImportError {
    RosterImportError::InvalidRow {
        row,
        message: err.to_string(),
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn residents_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Resident>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::residents_from_reader(file)
    }

    /// Reads `id,label,area` rows. A blank label falls back to the id.
    pub fn residents_from_reader<R: Read>(reader: R) -> Result<Vec<Resident>, RosterImportError> {
        let mut seen: HashSet<ResidentId> = HashSet::new();
        let mut residents = Vec::new();

        for row in parser::parse_residents(reader)? {
            if row.id.is_empty() {
                return Err(RosterImportError::InvalidRow {
                    row: row.row,
                    message: "resident id is empty".to_string(),
                });
            }

            let area: AreaCode = row.area.parse().map_err(|err| invalid_label(row.row, err))?;
            let id = ResidentId(row.id);
            if !seen.insert(id.clone()) {
                return Err(RosterImportError::Duplicate {
                    row: row.row,
                    id: id.0,
                });
            }

            residents.push(Resident {
                label: row.label.unwrap_or_else(|| id.0.clone()),
                id,
                area,
            });
        }

        Ok(residents)
    }

    pub fn spaces_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<ParkingSpace>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::spaces_from_reader(file)
    }

    /// Reads `number,size,zone,available` rows. A blank availability means available.
    pub fn spaces_from_reader<R: Read>(reader: R) -> Result<Vec<ParkingSpace>, RosterImportError> {
        let mut seen: HashSet<SpaceId> = HashSet::new();
        let mut spaces = Vec::new();

        for row in parser::parse_spaces(reader)? {
            if row.number.is_empty() {
                return Err(RosterImportError::InvalidRow {
                    row: row.row,
                    message: "space number is empty".to_string(),
                });
            }

            let size: SpaceSize = row.size.parse().map_err(|err| invalid_label(row.row, err))?;
            let zone: AllocationZone =
                row.zone.parse().map_err(|err| invalid_label(row.row, err))?;
            let available = match row.available.as_deref() {
                None => true,
                Some(value) => {
                    parser::parse_flag(value).ok_or_else(|| RosterImportError::InvalidRow {
                        row: row.row,
                        message: format!("unrecognized availability flag '{value}'"),
                    })?
                }
            };

            let id = SpaceId(row.number);
            if !seen.insert(id.clone()) {
                return Err(RosterImportError::Duplicate {
                    row: row.row,
                    id: id.0,
                });
            }

            spaces.push(ParkingSpace {
                id,
                size,
                zone,
                available,
            });
        }

        Ok(spaces)
    }
}

/// Session over the configured CSV exports, falling back to the built-in roster and
/// inventory for whichever path is unset.
pub fn load_session(config: &LotteryConfig) -> Result<LotterySession, RosterImportError> {
    let residents = match &config.residents_csv {
        Some(path) => RosterImporter::residents_from_path(path)?,
        None => standard_residents(),
    };
    let spaces = match &config.spaces_csv {
        Some(path) => RosterImporter::spaces_from_path(path)?,
        None => standard_spaces(),
    };

    info!(
        residents = residents.len(),
        spaces = spaces.len(),
        imported_residents = config.residents_csv.is_some(),
        imported_spaces = config.spaces_csv.is_some(),
        "lottery session loaded"
    );

    Ok(LotterySession::new(residents, spaces))
}
