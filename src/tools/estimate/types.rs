use serde::Serialize;

/// Renovation range for one labeled room, in whole USD.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomEstimate {
    pub room_label: String,
    pub low: u32,
    pub high: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BudgetEstimate {
    pub rooms: Vec<RoomEstimate>,
}

impl BudgetEstimate {
    /// Sum of the low ends, saturating at `u32::MAX`.
    pub fn total_low(&self) -> u32 {
        self.rooms.iter().fold(0u32, |acc, r| acc.saturating_add(r.low))
    }

    pub fn total_high(&self) -> u32 {
        self.rooms.iter().fold(0u32, |acc, r| acc.saturating_add(r.high))
    }
}
