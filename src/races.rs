//! Static race catalog
//!
//! Hardcoded data for the supported races (later from a database). The
//! generator resolves a request's race identifier here; everything else
//! about a race that the core needs is its distance.

use serde::Serialize;

use crate::error::PlanError;

/// Reference information about a supported race
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RaceInfo {
    pub race_id: &'static str,
    pub name: &'static str,
    pub distance_km: f64,
    pub location: &'static str,
    pub elevation_gain_m: u32,
    pub key_challenges: &'static [&'static str],
}

const RACES: &[RaceInfo] = &[
    RaceInfo {
        race_id: "lidingo",
        name: "Lidingöloppet 30 km",
        distance_km: 30.0,
        location: "Lidingö, Stockholm",
        elevation_gain_m: 400,
        key_challenges: &[
            "Technical rocky sections around kilometer 8-12",
            "Long climb at kilometer 15",
            "Slippery footing in rain",
            "Dense forest with rooty trails",
            "Mentally demanding distance",
        ],
    },
    RaceInfo {
        race_id: "lidingo_15",
        name: "Lidingöloppet 15 km",
        distance_km: 15.0,
        location: "Lidingö, Stockholm",
        elevation_gain_m: 210,
        key_challenges: &[
            "Rolling forest terrain from the start",
            "Rooty single track in the middle section",
        ],
    },
    RaceInfo {
        race_id: "lidingo_10",
        name: "Lidingöloppet 10 km",
        distance_km: 10.0,
        location: "Lidingö, Stockholm",
        elevation_gain_m: 140,
        key_challenges: &[
            "Fast start into narrow trails",
            "Short punchy climbs late in the course",
        ],
    },
];

/// Look up a race by identifier
pub fn get(race_id: &str) -> Result<&'static RaceInfo, PlanError> {
    RACES.iter().find(|r| r.race_id == race_id).ok_or_else(|| {
        let available: Vec<&str> = RACES.iter().map(|r| r.race_id).collect();
        PlanError::InvalidInput(format!(
            "Unknown race '{}'. Available races: {}",
            race_id,
            available.join(", ")
        ))
    })
}

/// All supported races, for listing at the boundary
pub fn all() -> &'static [RaceInfo] {
    RACES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_race() {
        let race = get("lidingo").unwrap();
        assert_eq!(race.distance_km, 30.0);
        assert_eq!(race.elevation_gain_m, 400);
    }

    #[test]
    fn test_lookup_unknown_race_lists_alternatives() {
        let err = get("vasaloppet").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("vasaloppet"));
        assert!(message.contains("lidingo"));
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<&str> = all().iter().map(|r| r.race_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }
}
