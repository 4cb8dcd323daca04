//! Display settings and preferences
//!
//! Cosmetic only: nothing here changes gameplay outcomes.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 300,
            QualityPreset::High => 1000,
        }
    }
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (bursts on bounces and brick hits)
    pub particles: bool,
    /// Shadow glow around paddle, balls and power-ups
    pub glow: bool,
    /// Reduced motion (no glow)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            glow: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Settings for a renderer-less run: no particles are simulated at all
    pub fn headless() -> Self {
        Self {
            particles: false,
            glow: false,
            ..Self::default()
        }
    }

    /// Effective glow (respects reduced_motion; Low drops glow for fill-rate)
    pub fn effective_glow(&self) -> bool {
        self.glow && !self.reduced_motion && self.quality != QualityPreset::Low
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_off_means_zero_cap() {
        assert_eq!(Settings::headless().max_particles(), 0);
        let high = Settings {
            quality: QualityPreset::High,
            ..Default::default()
        };
        assert_eq!(high.max_particles(), 1000);
    }

    #[test]
    fn test_reduced_motion_disables_glow() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_glow());
        assert!(Settings::default().effective_glow());
    }

    #[test]
    fn test_low_quality_drops_glow() {
        let settings: Settings = serde_json::from_str(r#"{ "quality": "Low" }"#).unwrap();
        assert!(settings.glow);
        assert!(!settings.effective_glow());
        assert_eq!(settings.max_particles(), 100);
    }
}
