#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Dungeon Chase experience.

use dungeon_chase_core::WELCOME_BANNER;
use dungeon_chase_world::{query, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Lines announcing the gold requirement and the dungeon about to be entered.
    #[must_use]
    pub fn greeting(&self, world: &World) -> [String; 2] {
        [
            format!(
                "You need {} gold to escape this dungeon...",
                query::gold_required(world)
            ),
            format!(
                "Now be careful as you enter the {}!",
                display_name(query::map_name(world))
            ),
        ]
    }
}

/// Map name as announced to the player: underscores become spaces, upper-cased and trimmed.
#[must_use]
pub fn display_name(name: &str) -> String {
    name.replace('_', " ").to_uppercase().trim().to_owned()
}
