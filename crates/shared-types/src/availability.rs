//! Availability aggregation over a room's raw selection list.
//!
//! Both the backend overview endpoint and the frontend status board run the
//! same tally so a room never shows two different answers for "which dates
//! work for everyone".

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DateSelection;

/// The participants available on a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTally {
    pub date: NaiveDate,
    pub names: Vec<String>,
}

/// Aggregated availability for one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityBoard {
    /// Distinct participant names, in order of first appearance.
    pub participants: Vec<String>,
    /// Per-date name groups, sorted by date ascending.
    pub dates: Vec<DateTally>,
    /// Dates on which every current participant is available.
    pub unanimous_dates: Vec<NaiveDate>,
}

impl AvailabilityBoard {
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Group selections by date and find the dates covered by every participant.
///
/// A name is counted at most once per date, so unclean input (duplicate rows)
/// cannot push a group past the participant count.
pub fn tally(selections: &[DateSelection]) -> AvailabilityBoard {
    let mut participants: Vec<String> = Vec::new();
    let mut by_date: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();

    for selection in selections {
        if !participants.iter().any(|n| n == &selection.name) {
            participants.push(selection.name.clone());
        }

        let names = by_date.entry(selection.selected_date).or_default();
        if !names.iter().any(|n| n == &selection.name) {
            names.push(selection.name.clone());
        }
    }

    let unanimous_dates = by_date
        .iter()
        .filter(|(_, names)| !participants.is_empty() && names.len() == participants.len())
        .map(|(date, _)| *date)
        .collect();

    let dates = by_date
        .into_iter()
        .map(|(date, names)| DateTally { date, names })
        .collect();

    AvailabilityBoard {
        participants,
        dates,
        unanimous_dates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn selection(id: i32, name: &str, date: &str) -> DateSelection {
        DateSelection {
            id,
            room_id: "room1234".to_string(),
            name: name.to_string(),
            selected_date: date.parse().expect("valid test date"),
            created_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    #[test]
    fn test_empty_room_has_no_unanimous_dates() {
        let board = tally(&[]);
        assert!(board.participants.is_empty());
        assert!(board.dates.is_empty());
        assert!(board.unanimous_dates.is_empty());
        assert!(board.is_empty());
    }

    #[test]
    fn test_single_participant_is_unanimous_everywhere() {
        let board = tally(&[
            selection(1, "ana", "2026-02-10"),
            selection(2, "ana", "2026-02-12"),
        ]);

        assert_eq!(board.participants, vec!["ana"]);
        assert_eq!(
            board.unanimous_dates,
            vec![date("2026-02-10"), date("2026-02-12")]
        );
    }

    #[test]
    fn test_unanimous_requires_every_participant() {
        let board = tally(&[
            selection(1, "ana", "2026-02-10"),
            selection(2, "ana", "2026-02-11"),
            selection(3, "ben", "2026-02-11"),
            selection(4, "ben", "2026-02-12"),
        ]);

        assert_eq!(board.participants, vec!["ana", "ben"]);
        assert_eq!(board.unanimous_dates, vec![date("2026-02-11")]);
    }

    #[test]
    fn test_dates_sorted_ascending_regardless_of_input_order() {
        let board = tally(&[
            selection(1, "ana", "2026-03-01"),
            selection(2, "ana", "2026-02-10"),
            selection(3, "ana", "2026-02-20"),
        ]);

        let dates: Vec<NaiveDate> = board.dates.iter().map(|t| t.date).collect();
        assert_eq!(
            dates,
            vec![date("2026-02-10"), date("2026-02-20"), date("2026-03-01")]
        );
    }

    #[test]
    fn test_participants_keep_first_appearance_order() {
        let board = tally(&[
            selection(1, "cara", "2026-02-10"),
            selection(2, "ana", "2026-02-10"),
            selection(3, "cara", "2026-02-11"),
            selection(4, "ben", "2026-02-11"),
        ]);

        assert_eq!(board.participants, vec!["cara", "ana", "ben"]);
    }

    #[test]
    fn test_duplicate_rows_counted_once() {
        let board = tally(&[
            selection(1, "ana", "2026-02-10"),
            selection(2, "ana", "2026-02-10"),
            selection(3, "ben", "2026-02-10"),
        ]);

        assert_eq!(board.participants, vec!["ana", "ben"]);
        assert_eq!(board.dates[0].names, vec!["ana", "ben"]);
        // Two distinct names out of two participants, despite three rows
        assert_eq!(board.unanimous_dates, vec![date("2026-02-10")]);
    }

    #[test]
    fn test_names_within_date_keep_selection_order() {
        let board = tally(&[
            selection(1, "ben", "2026-02-10"),
            selection(2, "ana", "2026-02-10"),
        ]);

        assert_eq!(board.dates[0].names, vec!["ben", "ana"]);
    }
}
