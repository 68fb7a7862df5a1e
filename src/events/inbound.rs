//! Inbound chat traffic, deserialized from the host's JSON payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub display_name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sprite: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub user_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub emotes: Vec<String>,
    pub info: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAction {
    pub user_id: String,
    pub info: UserInfo,
    pub action: ActionKind,
}

/// Commands a user can trigger on their avatar. Unknown fields in the
/// payload fall back to defaults so the wire format can grow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", content = "data", rename_all = "snake_case")]
pub enum ActionKind {
    Jump {
        #[serde(default)]
        velocity_x: Option<f32>,
        #[serde(default)]
        velocity_y: Option<f32>,
    },
    Dash {
        #[serde(default)]
        force: Option<f32>,
    },
    Color {
        color: String,
    },
    Grow {
        #[serde(default)]
        scale: Option<f32>,
        #[serde(default)]
        duration: Option<f32>,
    },
    Sprite {
        sprite: String,
    },
    AddJumpHits {
        count: u32,
    },
    Resurrect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Raid {
    pub broadcaster: RaidBroadcaster,
    pub viewers: RaidViewers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaidBroadcaster {
    pub id: String,
    pub info: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaidViewers {
    pub count: u32,
    pub sprite: String,
}

/// Entry of the periodic present-chatters snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chatter {
    pub user_id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== WIRE FORMAT TESTS ====================

    #[test]
    fn test_chat_message_minimal_payload() {
        let json = r#"{
            "user_id": "42",
            "info": { "display_name": "ada" }
        }"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.user_id, "42");
        assert_eq!(msg.info.display_name, "ada");
        assert!(msg.message.is_empty());
        assert!(msg.emotes.is_empty());
        assert!(msg.info.color.is_none());
    }

    #[test]
    fn test_action_tagged_by_name() {
        let json = r#"{
            "user_id": "42",
            "info": { "display_name": "ada" },
            "action": { "name": "jump", "data": { "velocity_y": -600.0 } }
        }"#;
        let action: UserAction = serde_json::from_str(json).unwrap();
        match action.action {
            ActionKind::Jump {
                velocity_x,
                velocity_y,
            } => {
                assert!(velocity_x.is_none());
                assert_eq!(velocity_y, Some(-600.0));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_unit_action_needs_no_data() {
        let json = r#"{
            "user_id": "42",
            "info": { "display_name": "ada" },
            "action": { "name": "resurrect" }
        }"#;
        let action: UserAction = serde_json::from_str(json).unwrap();
        assert!(matches!(action.action, ActionKind::Resurrect));
    }

    #[test]
    fn test_raid_payload() {
        let json = r#"{
            "broadcaster": { "id": "7", "info": { "display_name": "streamer" } },
            "viewers": { "count": 10, "sprite": "agent" }
        }"#;
        let raid: Raid = serde_json::from_str(json).unwrap();
        assert_eq!(raid.viewers.count, 10);
        assert_eq!(raid.viewers.sprite, "agent");
    }
}
