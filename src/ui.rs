//! Score/lives/overlay capability
//!
//! The round controller pushes HUD changes through `UiSink`; the browser host
//! backs it with DOM elements, tests and the native runner with `UiLog`.

use crate::sim::GamePhase;

/// HUD capability provided by the host
pub trait UiSink {
    fn set_score(&mut self, score: u64);
    fn set_lives(&mut self, lives: u8);
    fn show_overlay(&mut self, title: &str, message: &str);
    fn hide_overlay(&mut self);
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn from_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Won => Some(Outcome::Won),
            GamePhase::Lost => Some(Outcome::Lost),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Outcome::Won => "VICTORY!",
            Outcome::Lost => "GAME OVER",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Won => "You destroyed every energy core!",
            Outcome::Lost => "Your persistence was remarkable, but the bricks won.",
        }
    }
}

/// Score as shown on the HUD (zero-padded to 4 digits)
pub fn format_score(score: u64) -> String {
    format!("{score:04}")
}

/// A recorded HUD update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    Score(u64),
    Lives(u8),
    ShowOverlay { title: String, message: String },
    HideOverlay,
}

/// Sink that records every update and logs it
#[derive(Debug, Default)]
pub struct UiLog {
    pub updates: Vec<UiUpdate>,
}

impl UiLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_score(&self) -> Option<u64> {
        self.updates.iter().rev().find_map(|u| match u {
            UiUpdate::Score(s) => Some(*s),
            _ => None,
        })
    }

    pub fn last_lives(&self) -> Option<u8> {
        self.updates.iter().rev().find_map(|u| match u {
            UiUpdate::Lives(l) => Some(*l),
            _ => None,
        })
    }

    /// Title of the overlay currently shown, if any
    pub fn overlay(&self) -> Option<&str> {
        match self
            .updates
            .iter()
            .rev()
            .find(|u| matches!(u, UiUpdate::ShowOverlay { .. } | UiUpdate::HideOverlay))
        {
            Some(UiUpdate::ShowOverlay { title, .. }) => Some(title.as_str()),
            _ => None,
        }
    }
}

impl UiSink for UiLog {
    fn set_score(&mut self, score: u64) {
        log::trace!("Score {}", format_score(score));
        self.updates.push(UiUpdate::Score(score));
    }

    fn set_lives(&mut self, lives: u8) {
        log::trace!("Lives {}", lives);
        self.updates.push(UiUpdate::Lives(lives));
    }

    fn show_overlay(&mut self, title: &str, message: &str) {
        log::info!("{} - {}", title, message);
        self.updates.push(UiUpdate::ShowOverlay {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn hide_overlay(&mut self) {
        self.updates.push(UiUpdate::HideOverlay);
    }
}
