use crate::models::{CombatData, EventKind, MessageData, PlayerData, WeaponChangeData};

/// Positional fields of a `;`-separated event payload
///
/// Field 0 is the type tag. Reading past the end yields an empty string, so a
/// truncated line still decodes.
struct Fields<'a> {
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(payload: &'a str) -> Self {
        Self { parts: payload.split(';').collect() }
    }

    fn tag(&self) -> &'a str {
        self.parts.first().copied().unwrap_or("")
    }

    fn get(&self, index: usize) -> String {
        self.parts.get(index).copied().unwrap_or("").to_string()
    }

    fn player(&self) -> PlayerData {
        PlayerData { player_id: self.get(1), player_slot: self.get(2), player_name: self.get(3) }
    }
}

/// Decode an event payload such as `K;12;3;allies;Alice;45;6;axis;Bob;...`
///
/// Returns `None` for tags we don't track (and for payloads without a tag),
/// the caller drops those lines.
pub fn parse_event(payload: &str) -> Option<EventKind> {
    let fields = Fields::new(payload);

    let kind = match fields.tag() {
        "K" => EventKind::Kill(CombatData {
            player_id: fields.get(1),
            player_slot: fields.get(2),
            player_team: fields.get(3),
            player_name: fields.get(4),
            killed_player_id: fields.get(5),
            killed_player_slot: fields.get(6),
            killed_player_team: fields.get(7),
            killed_player_name: fields.get(8),
            weapon: fields.get(9),
            damage: fields.get(10),
            damage_type: fields.get(11),
            target_area: fields.get(12),
        }),
        // Victim comes first on death lines
        "D" => EventKind::Death(CombatData {
            killed_player_id: fields.get(1),
            killed_player_slot: fields.get(2),
            killed_player_team: fields.get(3),
            killed_player_name: fields.get(4),
            player_id: fields.get(5),
            player_slot: fields.get(6),
            player_team: fields.get(7),
            player_name: fields.get(8),
            weapon: fields.get(9),
            damage: fields.get(10),
            damage_type: fields.get(11),
            target_area: fields.get(12),
        }),
        "J" | "Q" => EventKind::Join(fields.player()),
        "Weapon" => {
            let PlayerData { player_id, player_slot, player_name } = fields.player();
            EventKind::WeaponChange(WeaponChangeData {
                player_id,
                player_slot,
                player_name,
                weapon: fields.get(4),
            })
        }
        "say" | "sayteam" => {
            let PlayerData { player_id, player_slot, player_name } = fields.player();
            EventKind::Message(MessageData {
                player_id,
                player_slot,
                player_name,
                message: fields.get(4),
            })
        }
        _ => return None,
    };

    Some(kind)
}
