use serde::Serialize;

/// Payload shared by kill (`K`) and death (`D`) lines
///
/// For a death line the victim is decoded into the `killed_player_*` fields
/// and the attacker into `player_*`, so both kinds read the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombatData {
    pub player_id: String,
    pub player_slot: String,
    pub player_team: String,
    pub player_name: String,
    pub killed_player_id: String,
    pub killed_player_slot: String,
    pub killed_player_team: String,
    pub killed_player_name: String,
    pub weapon: String,
    pub damage: String,
    #[serde(rename = "type")]
    pub damage_type: String,
    pub target_area: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerData {
    pub player_id: String,
    pub player_slot: String,
    pub player_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeaponChangeData {
    pub player_id: String,
    pub player_slot: String,
    pub player_name: String,
    pub weapon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub player_id: String,
    pub player_slot: String,
    pub player_name: String,
    pub message: String,
}

/// Decoded in-match event, serialized as `{"type": ..., "data": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum EventKind {
    Kill(CombatData),
    Death(CombatData),
    Join(PlayerData),
    WeaponChange(WeaponChangeData),
    Message(MessageData),
}

impl EventKind {
    pub fn type_tag(&self) -> &'static str {
        match self {
            EventKind::Kill(_) => "kill",
            EventKind::Death(_) => "death",
            EventKind::Join(_) => "join",
            EventKind::WeaponChange(_) => "weaponchange",
            EventKind::Message(_) => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    #[serde(flatten)]
    pub kind: EventKind,
    pub time: i64,
}
