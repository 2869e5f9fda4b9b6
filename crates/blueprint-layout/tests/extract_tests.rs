//! Extraction of layouts from realistic blueprint text.

use blueprint_layout::prelude::*;
use proptest::prelude::*;

const CRYPT: &str = r#"
# The Drowned Crypt

Players enter from the flooded stairwell and push north toward the ossuary.

```level-json
{
  "rooms": [
    { "id": "stairs", "label": "Flooded Stairs", "x": 0, "y": 4, "w": 3, "h": 2, "type": "spawn" },
    { "id": "ossuary", "x": 4, "y": 0, "w": 4, "h": 4, "type": "Combat" },
    { "id": "vault", "x": 9, "y": 1, "w": 2, "h": 2, "type": "treasure", "loot": "ignored" }
  ],
  "connections": [
    { "from": "stairs", "to": "ossuary", "mainPath": true },
    { "from": "ossuary", "to": "vault", "type": "corridor" }
  ],
  "doors": [
    { "roomId": "ossuary", "side": "West", "offset": 0.75 },
    { "roomId": "vault", "side": "west" }
  ],
  "windows": [{ "roomId": "ossuary", "side": "north" }],
  "props": [{ "roomId": "ossuary", "x": 1, "y": 1, "category": "altar" }],
  "enemySpawns": [
    { "roomId": "ossuary", "x": 2, "y": 2, "role": "ghoul" },
    { "roomId": "vault" }
  ]
}
```

The vault door is locked until the ghouls are dead.
"#;

#[test]
fn extracts_full_blueprint() {
    let layout = extract_level_json(CRYPT).unwrap();

    assert_eq!(layout.rooms.len(), 3);
    assert_eq!(layout.room("stairs").unwrap().display_name(), Some("Flooded Stairs"));
    assert_eq!(layout.room("ossuary").unwrap().kind.as_deref(), Some("Combat"));

    assert!(layout.connections[0].main_path);
    assert!(layout.connections[1].is_corridor());

    assert_eq!(layout.doors[0].parsed_side(), Ok(Side::West));
    assert_eq!(layout.doors[0].clamped_offset(), 0.75);
    assert_eq!(layout.doors[1].clamped_offset(), Opening::DEFAULT_OFFSET);

    assert_eq!(layout.windows.len(), 1);
    assert_eq!(layout.props[0].category.as_deref(), Some("altar"));
    assert_eq!(layout.enemy_spawns[0].role.as_deref(), Some("ghoul"));
    assert_eq!(layout.enemy_spawns[1].x, None);
    assert!(!layout.has_no_details());
}

#[test]
fn first_tagged_block_wins() {
    let text = "```json\n{}\n```\n```LEVEL-JSON\n{\"rooms\":[{\"id\":\"a\",\"x\":0,\"y\":0,\"w\":1,\"h\":1}]}\n```\n```level-json\nnot json\n```";
    let layout = extract_level_json(text).unwrap();
    assert_eq!(layout.rooms[0].id, "a");
}

#[test]
fn error_messages_are_user_facing() {
    assert_eq!(
        extract_level_json("just prose").unwrap_err().to_string(),
        "No ```level-json ... ``` block found in the text."
    );
    assert_eq!(
        extract_level_json("```level-json\n   \n```").unwrap_err().to_string(),
        "The level-json block is empty."
    );

    let err = extract_level_json("```level-json\n{\"rooms\": [1, 2]}\n```").unwrap_err();
    assert_eq!(err.to_string(), "Failed to parse level-json. Please check the JSON format.");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn bare_json_parses_without_a_fence() {
    let layout = LevelLayout::from_json_str(r#"{"rooms": []}"#).unwrap();
    assert!(layout.rooms.is_empty());
    assert!(layout.has_no_details());
}

proptest! {
    #[test]
    fn arbitrary_text_never_panics(text in any::<String>()) {
        let _ = extract_level_json(&text);
    }

    #[test]
    fn block_is_found_regardless_of_surrounding_prose(
        before in "[a-zA-Z .,\n]{0,80}",
        after in "[a-zA-Z .,\n]{0,80}",
    ) {
        let text = format!("{before}\n```level-json\n{{\"rooms\": []}}\n```\n{after}");
        prop_assert_eq!(find_level_json_block(&text), Some("{\"rooms\": []}"));
    }
}
