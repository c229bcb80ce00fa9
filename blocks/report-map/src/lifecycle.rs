//! Popup lifecycle for a single map marker.
//!
//! Hovering gives a preview; clicking pins the popup so its content (the
//! maps link) can be used without the popup closing under the pointer. The
//! popup being dismissed is the only way out of the pinned state.
//!
//! | phase    | hovered | pinned | popup   |
//! |----------|---------|--------|---------|
//! | Idle     | false   | false  | closed  |
//! | Hovering | true    | false  | open    |
//! | Pinned   | any     | true   | open    |

use serde::{Deserialize, Serialize};

/// Events the mapping library reports for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerEvent {
    PointerEnter,
    PointerLeave,
    Click,
    /// The popup went away by any means: close button, map click, or a close
    /// issued by this controller.
    PopupClose,
}

impl MarkerEvent {
    pub const ALL: [MarkerEvent; 4] = [
        MarkerEvent::PointerEnter,
        MarkerEvent::PointerLeave,
        MarkerEvent::Click,
        MarkerEvent::PopupClose,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MarkerState {
    pub hovered: bool,
    pub pinned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPhase {
    Idle,
    Hovering,
    Pinned,
}

impl MarkerState {
    pub const IDLE: MarkerState = MarkerState {
        hovered: false,
        pinned: false,
    };

    pub fn popup_visible(&self) -> bool {
        self.hovered || self.pinned
    }

    pub fn phase(&self) -> MarkerPhase {
        match (self.hovered, self.pinned) {
            (_, true) => MarkerPhase::Pinned,
            (true, false) => MarkerPhase::Hovering,
            (false, false) => MarkerPhase::Idle,
        }
    }
}

/// Pure transition. Every event is accepted in every state.
pub fn transition(state: MarkerState, event: MarkerEvent) -> MarkerState {
    match event {
        MarkerEvent::PointerEnter => MarkerState {
            hovered: true,
            ..state
        },
        // Leaving only clears the hover; a pin keeps the popup up.
        MarkerEvent::PointerLeave => MarkerState {
            hovered: false,
            ..state
        },
        MarkerEvent::Click => MarkerState {
            pinned: true,
            ..state
        },
        MarkerEvent::PopupClose => MarkerState::IDLE,
    }
}

/// What the map should do with the popup after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupCommand {
    Open,
    Close,
}

/// Per-marker state holder. Controllers share nothing with each other.
#[derive(Debug, Clone, Default)]
pub struct MarkerController {
    state: MarkerState,
}

impl MarkerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MarkerState {
        self.state
    }

    /// Apply an event and return the popup command implied by a change in
    /// visibility, if any.
    pub fn handle(&mut self, event: MarkerEvent) -> Option<PopupCommand> {
        let before = self.state.popup_visible();
        self.state = transition(self.state, event);
        match (before, self.state.popup_visible()) {
            (false, true) => Some(PopupCommand::Open),
            (true, false) => Some(PopupCommand::Close),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.state = MarkerState::IDLE;
    }
}
