//! Player intents: one value per thing a player can ask the engine to do.

use serde::{Deserialize, Serialize};

use crate::cards::Color;
use crate::core::PlayerId;
use crate::economy::CatalogId;
use crate::pending::PendingInput;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Intent {
    /// Play the card at `card_index`; `color` names the colour for a wild.
    Play {
        card_index: usize,
        color: Option<Color>,
    },
    /// Draw one card and end the turn.
    Draw,
    /// Answer the open pending action.
    Respond(PendingInput),
    /// Buy a catalog entry.
    Purchase {
        item: CatalogId,
        target: Option<PlayerId>,
    },
}
