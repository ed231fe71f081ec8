use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Points one player actually scored in a played gameweek.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizedRecord {
    #[serde(alias = "player_name")]
    pub name: String,
    #[serde(alias = "round_points")]
    pub points: i32,
}

/// Realized points by player name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealizedPoints {
    points: HashMap<String, i32>,
}

impl RealizedPoints {
    /// Rows repeating a name are added up: a player with two fixtures in the
    /// gameweek has one row per fixture.
    #[must_use]
    pub fn from_records(records: &[RealizedRecord]) -> Self {
        let mut points: HashMap<String, i32> = HashMap::with_capacity(records.len());
        for record in records {
            *points.entry(record.name.clone()).or_default() += record.points;
        }
        Self { points }
    }

    /// Points of `name`; players without a row scored nothing.
    #[must_use]
    pub fn points(&self, name: &str) -> i32 {
        self.points.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.points.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(String, i32)> for RealizedPoints {
    fn from_iter<I: IntoIterator<Item = (String, i32)>>(iter: I) -> Self {
        let records: Vec<RealizedRecord> = iter
            .into_iter()
            .map(|(name, points)| RealizedRecord { name, points })
            .collect();
        Self::from_records(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_players_score_zero() {
        let realized: RealizedPoints = [("Palmer".to_owned(), 12)].into_iter().collect();
        assert_eq!(realized.points("Palmer"), 12);
        assert_eq!(realized.points("Nobody"), 0);
        assert!(!realized.contains("Nobody"));
    }

    #[test]
    fn test_repeated_rows_are_summed() {
        let realized: RealizedPoints = [
            ("Palmer".to_owned(), 12),
            ("Saka".to_owned(), 3),
            ("Palmer".to_owned(), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(realized.len(), 2);
        assert_eq!(realized.points("Palmer"), 13);
        assert_eq!(realized.points("Saka"), 3);
    }

    #[test]
    fn test_double_gameweek_records() {
        let json = r#"[
            {"player_name": "Isak", "round_points": 2},
            {"player_name": "Isak", "round_points": 9}
        ]"#;
        let records: Vec<RealizedRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(RealizedPoints::from_records(&records).points("Isak"), 11);
    }

    #[test]
    fn test_deserialize_pipeline_columns() {
        let json = r#"[{"player_name": "Saka", "round_points": 7}, {"name": "Rice", "points": 2}]"#;
        let records: Vec<RealizedRecord> = serde_json::from_str(json).unwrap();
        let realized = RealizedPoints::from_records(&records);
        assert_eq!(realized.points("Saka"), 7);
        assert_eq!(realized.points("Rice"), 2);
    }
}
