//! Blueprint Layout -- the structured description of a dungeon level.
//!
//! This crate owns the input side of the blueprint pipeline: the
//! [`LevelLayout`](model::LevelLayout) data model (rooms, connections and the
//! detail features owned by rooms) and the extraction of a fenced
//! `level-json` block out of free-form text.
//!
//! The layout is plain data. It is deserialized once per render request,
//! consumed read-only by the renderer, and replaced wholesale on the next
//! request. Nothing in this crate mutates a layout after parsing.
//!
//! # Quick Start
//!
//! ```
//! use blueprint_layout::prelude::*;
//!
//! let text = "Here is the level:\n```level-json\n{\"rooms\": [{\"id\": \"a\", \"x\": 0, \"y\": 0, \"w\": 2, \"h\": 2}]}\n```";
//! let layout = extract_level_json(text).unwrap();
//!
//! assert_eq!(layout.rooms.len(), 1);
//! assert_eq!(layout.rooms[0].display_name(), Some("a"));
//! assert!(layout.connections.is_empty());
//! ```

#![deny(unsafe_code)]

pub mod extract;
pub mod model;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while turning text into a [`LevelLayout`](model::LevelLayout).
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The text contains no fenced block tagged `level-json`.
    #[error("No ```level-json ... ``` block found in the text.")]
    MissingBlock,

    /// The fenced block exists but contains only whitespace.
    #[error("The level-json block is empty.")]
    EmptyBlock,

    /// The block body is not JSON matching the layout shape.
    #[error("Failed to parse level-json. Please check the JSON format.")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::extract::{extract_level_json, find_level_json_block, LEVEL_JSON_TAG};
    pub use crate::model::{
        Connection, Door, EnemySpawn, LevelLayout, Opening, ParseSideError, Prop, Room, Side,
        Window,
    };
    pub use crate::LayoutError;
}
