//! Cosmetic particle bursts
//!
//! Particles never affect gameplay. Their scatter comes from a tick hash
//! rather than the round RNG, so enabling or disabling them leaves the
//! simulation bit-for-bit identical.

use glam::Vec2;

/// Default particle tint
pub const PARTICLE_WHITE: &str = "#ffffff";

/// A single fading particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: &'static str,
    pub size: f32,
    /// Opacity, monotonically decreasing; dead at <= 0
    pub alpha: f32,
}

impl Particle {
    pub fn update(&mut self, fade: f32) {
        self.pos += self.vel;
        self.alpha -= fade;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Uniform value in [0, 1) from a seed, particle index and lane
fn scatter(seed: u32, index: u32, lane: u32) -> f32 {
    let mut hash = seed
        .wrapping_mul(2654435761)
        .wrapping_add(index.wrapping_mul(7919))
        .wrapping_add(lane.wrapping_mul(104729));
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(0x5bd1_e995);
    hash ^= hash >> 15;
    (hash % 1000) as f32 / 1000.0
}

/// Bounded particle pool; oldest particles are evicted first when full
#[derive(Debug, Clone, Default)]
pub struct Particles {
    items: Vec<Particle>,
    cap: usize,
}

impl Particles {
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Emit `count` particles at `origin`
    pub fn burst(&mut self, origin: Vec2, color: &'static str, count: u32, seed: u32, spread: f32) {
        if self.cap == 0 {
            return;
        }
        for i in 0..count {
            if self.items.len() >= self.cap {
                self.items.remove(0);
            }
            let vx = (scatter(seed, i, 0) - 0.5) * spread;
            let vy = (scatter(seed, i, 1) - 0.5) * spread;
            self.items.push(Particle {
                pos: origin,
                vel: Vec2::new(vx, vy),
                color,
                size: scatter(seed, i, 2) * 3.0 + 1.0,
                alpha: 1.0,
            });
        }
    }

    /// Advance every particle, then drop the faded ones in a single pass
    pub fn update(&mut self, fade: f32) {
        for particle in &mut self.items {
            particle.update(fade);
        }
        self.items.retain(|p| !p.is_dead());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_and_fade_out() {
        let mut particles = Particles::new(100);
        particles.burst(Vec2::new(10.0, 10.0), PARTICLE_WHITE, 8, 42, 8.0);
        assert_eq!(particles.len(), 8);
        assert!(particles.iter().all(|p| p.size >= 1.0 && p.size < 4.0));
        assert!(particles.iter().all(|p| p.vel.x.abs() <= 4.0 && p.vel.y.abs() <= 4.0));

        // 1.0 / 0.02 = 50 ticks to fade out
        for _ in 0..49 {
            particles.update(0.02);
        }
        assert_eq!(particles.len(), 8);
        for _ in 0..2 {
            particles.update(0.02);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut particles = Particles::new(5);
        particles.burst(Vec2::ZERO, "#000000", 3, 1, 8.0);
        particles.burst(Vec2::ONE, PARTICLE_WHITE, 4, 2, 8.0);
        assert_eq!(particles.len(), 5);
        assert_eq!(particles.iter().filter(|p| p.color == PARTICLE_WHITE).count(), 4);
    }

    #[test]
    fn test_zero_cap_spawns_nothing() {
        let mut particles = Particles::new(0);
        particles.burst(Vec2::ZERO, PARTICLE_WHITE, 15, 7, 8.0);
        assert!(particles.is_empty());
    }
}
