#[cfg(test)]
mod tests {
    use crate::tools::estimate::*;

    #[test]
    fn test_aliases_map_to_canonical_rooms() {
        assert_eq!(normalize_room_label(Some("Living Room")), "living");
        assert_eq!(normalize_room_label(Some("Great room")), "living");
        assert_eq!(normalize_room_label(Some("Powder Room")), "bath");
        assert_eq!(normalize_room_label(Some("Bedroom")), "bed");
        assert_eq!(normalize_room_label(Some("Front yard")), "exterior");
        assert_eq!(normalize_room_label(Some("Study nook")), "office");
    }

    #[test]
    fn test_unknown_or_blank_labels_use_other() {
        assert_eq!(normalize_room_label(None), OTHER_ROOM);
        assert_eq!(normalize_room_label(Some("   ")), OTHER_ROOM);
        assert_eq!(normalize_room_label(Some("Room")), OTHER_ROOM);
        assert_eq!(lookup("Garage"), (2_500, 8_000));
    }

    #[test]
    fn test_bathroom_wins_over_bedroom_alias() {
        // "bath" is checked before "bed".
        assert_eq!(lookup("Bathroom"), (8_000, 22_000));
        assert_eq!(lookup("Bedroom"), (4_000, 12_000));
    }

    #[test]
    fn test_budget_totals_and_order() {
        let budget = estimate_budget(vec![
            "Kitchen".to_string(),
            "Living Room".to_string(),
            "Room".to_string(),
        ]);
        let labels: Vec<&str> = budget.rooms.iter().map(|r| r.room_label.as_str()).collect();
        assert_eq!(labels, vec!["Kitchen", "Living Room", "Room"]);
        assert_eq!(budget.total_low(), 12_000 + 6_000 + 2_500);
        assert_eq!(budget.total_high(), 35_000 + 15_000 + 8_000);
    }

    #[test]
    fn test_budget_totals_saturate() {
        let budget = BudgetEstimate {
            rooms: vec![
                RoomEstimate {
                    room_label: "Kitchen".into(),
                    low: u32::MAX - 1,
                    high: u32::MAX,
                },
                RoomEstimate {
                    room_label: "Bathroom".into(),
                    low: 8_000,
                    high: 22_000,
                },
            ],
        };
        assert_eq!(budget.total_low(), u32::MAX);
        assert_eq!(budget.total_high(), u32::MAX);
    }

    #[test]
    fn test_empty_budget() {
        let budget = estimate_budget(Vec::<String>::new());
        assert_eq!(budget.total_low(), 0);
        assert_eq!(budget.total_high(), 0);
    }
}
