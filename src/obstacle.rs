//! Scrolling obstacle pools.
//!
//! A pool is a fixed row of evenly spaced bodies moving right to left. When a
//! body passes its wrap threshold it jumps one full pool width to the right,
//! landing behind the last member of the row. Nothing is allocated or freed
//! after spawn, so spacing stays uniform forever.

use crate::collision::{Aabb, ContactKind};
use crate::physics::{BodyDesc, BodyHandle, PhysicsBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Pickup, collected on overlap
    Star,
    /// Solid obstacle, ends the run on contact
    Wall,
}

impl ObstacleKind {
    pub fn response(&self) -> ContactKind {
        match self {
            ObstacleKind::Star => ContactKind::Overlap,
            ObstacleKind::Wall => ContactKind::Solid,
        }
    }

    pub fn texture_key(&self) -> &'static str {
        match self {
            ObstacleKind::Star => "star",
            ObstacleKind::Wall => "wall",
        }
    }
}

/// Layout of a pool at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct PoolLayout {
    pub kind: ObstacleKind,
    /// Centre of the first member
    pub first_x: f32,
    pub center_y: f32,
    pub spacing: f32,
    pub pool_size: usize,
    pub wrap_threshold: f32,
    /// Drawn size of the texture before rotation
    pub texture_size: (f32, f32),
    /// Collision extent, if it differs from the texture size
    pub body_size: Option<(f32, f32)>,
    /// Radians
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub body: BodyHandle,
    pub active: bool,
}

/// Move `x` left by `delta_ms * speed`; once it drops below `threshold`, add
/// `wrap_distance`. Returns the new x and whether it wrapped.
pub fn scroll_x(x: f32, delta_ms: f32, speed: f32, threshold: f32, wrap_distance: f32) -> (f32, bool) {
    let moved = x - delta_ms * speed;
    if moved < threshold {
        (moved + wrap_distance, true)
    } else {
        (moved, false)
    }
}

#[derive(Debug, Clone)]
pub struct ObstaclePool {
    kind: ObstacleKind,
    spacing: f32,
    wrap_threshold: f32,
    texture_size: (f32, f32),
    rotation: f32,
    obstacles: Vec<Obstacle>,
}

impl ObstaclePool {
    pub fn spawn<P: PhysicsBackend>(physics: &mut P, layout: PoolLayout) -> Self {
        let (texture_w, texture_h) = layout.texture_size;
        let obstacles = (0..layout.pool_size)
            .map(|i| {
                let cx = layout.first_x + i as f32 * layout.spacing;
                let bounds = Aabb::from_center(cx, layout.center_y, texture_w, texture_h);
                let body = physics.add_body(BodyDesc::kinematic(bounds));
                if let Some((w, h)) = layout.body_size {
                    physics.set_size(body, w, h);
                }
                Obstacle { body, active: true }
            })
            .collect();

        ObstaclePool {
            kind: layout.kind,
            spacing: layout.spacing,
            wrap_threshold: layout.wrap_threshold,
            texture_size: layout.texture_size,
            rotation: layout.rotation,
            obstacles,
        }
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// One full pool width: how far a wrapping member jumps.
    pub fn wrap_distance(&self) -> f32 {
        self.obstacles.len() as f32 * self.spacing
    }

    pub fn wrap_threshold(&self) -> f32 {
        self.wrap_threshold
    }

    pub fn texture_size(&self) -> (f32, f32) {
        self.texture_size
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn handles(&self) -> Vec<BodyHandle> {
        self.obstacles.iter().map(|o| o.body).collect()
    }

    pub fn active_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.active).count()
    }

    /// Scroll every active member. Returns how many wrapped this frame.
    pub fn advance<P: PhysicsBackend>(&self, physics: &mut P, delta_ms: f32, speed: f32) -> usize {
        let wrap_distance = self.wrap_distance();
        let mut wrapped = 0;

        for obstacle in self.obstacles.iter().filter(|o| o.active) {
            let Some(bounds) = physics.body(obstacle.body).map(|b| b.bounds) else {
                continue;
            };
            // Thresholds are measured against the centre, as sprites are placed
            let (cx, _) = bounds.center();
            let (new_cx, did_wrap) =
                scroll_x(cx, delta_ms, speed, self.wrap_threshold, wrap_distance);
            physics.set_position(obstacle.body, new_cx - bounds.width / 2.0, bounds.y);
            if did_wrap {
                wrapped += 1;
                log::debug!(
                    "{:?} wrapped from {:.1} to {:.1}",
                    self.kind,
                    cx - delta_ms * speed,
                    new_cx
                );
            }
        }

        wrapped
    }

    /// Take a member out of play for good. Returns false if it was already
    /// out, or is not part of this pool.
    pub fn deactivate<P: PhysicsBackend>(&mut self, physics: &mut P, body: BodyHandle) -> bool {
        match self.obstacles.iter_mut().find(|o| o.body == body && o.active) {
            Some(obstacle) => {
                obstacle.active = false;
                physics.disable_body(body);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ArcadeWorld;

    fn star_layout() -> PoolLayout {
        PoolLayout {
            kind: ObstacleKind::Star,
            first_x: 212.0,
            center_y: 500.0,
            spacing: 500.0,
            pool_size: 6,
            wrap_threshold: -100.0,
            texture_size: (24.0, 22.0),
            body_size: None,
            rotation: 0.0,
        }
    }

    #[test]
    fn test_scroll_x_moves_by_delta_times_speed() {
        let (x, wrapped) = scroll_x(200.0, 16.0, 0.4, -100.0, 3000.0);
        assert!((x - 193.6).abs() < 1e-4);
        assert!(!wrapped);
    }

    #[test]
    fn test_scroll_x_wraps_one_pool_width() {
        let (x, wrapped) = scroll_x(-96.0, 16.0, 0.4, -100.0, 3000.0);
        assert!(wrapped);
        assert!((x - (-102.4 + 3000.0)).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_x_at_threshold_does_not_wrap() {
        let (x, wrapped) = scroll_x(-100.0, 0.0, 0.4, -100.0, 3000.0);
        assert_eq!(x, -100.0);
        assert!(!wrapped);
    }

    #[test]
    fn test_spawn_evenly_spaced() {
        let mut world = ArcadeWorld::new(450.0);
        let pool = ObstaclePool::spawn(&mut world, star_layout());

        assert_eq!(pool.len(), 6);
        assert_eq!(pool.wrap_distance(), 3000.0);
        let xs: Vec<f32> = pool.iter().map(|o| world.position(o.body).0).collect();
        assert_eq!(xs, vec![200.0, 700.0, 1200.0, 1700.0, 2200.0, 2700.0]);
    }

    #[test]
    fn test_wall_body_uses_collision_extent() {
        let mut world = ArcadeWorld::new(450.0);
        let layout = PoolLayout {
            kind: ObstacleKind::Wall,
            first_x: 550.0,
            center_y: 650.0,
            texture_size: (400.0, 32.0),
            body_size: Some((32.0, 400.0)),
            rotation: std::f32::consts::FRAC_PI_2,
            wrap_threshold: -300.0,
            ..star_layout()
        };
        let pool = ObstaclePool::spawn(&mut world, layout);

        let first = pool.iter().next().map(|o| o.body).unwrap();
        let bounds = world.body(first).unwrap().bounds;
        assert_eq!(bounds, Aabb::from_center(550.0, 650.0, 32.0, 400.0));
        assert_eq!(pool.kind().response(), ContactKind::Solid);
    }

    #[test]
    fn test_advance_keeps_uniform_spacing_across_wraps() {
        let mut world = ArcadeWorld::new(450.0);
        let pool = ObstaclePool::spawn(&mut world, star_layout());

        let mut total_wraps = 0;
        for _ in 0..2000 {
            total_wraps += pool.advance(&mut world, 16.0, 0.4);
        }
        assert!(total_wraps > 6);

        let mut xs: Vec<f32> = pool
            .iter()
            .filter_map(|o| world.body(o.body))
            .map(|b| b.bounds.center().0)
            .collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in xs.windows(2) {
            assert!((pair[1] - pair[0] - 500.0).abs() < 0.5, "spacing drifted: {:?}", xs);
        }
        assert!(xs[0] >= -100.0);
    }

    #[test]
    fn test_deactivate_once() {
        let mut world = ArcadeWorld::new(450.0);
        let mut pool = ObstaclePool::spawn(&mut world, star_layout());
        let star = pool.handles()[2];

        assert!(pool.deactivate(&mut world, star));
        assert!(!pool.deactivate(&mut world, star));
        assert_eq!(pool.active_count(), 5);
        assert!(!world.is_enabled(star));
    }

    #[test]
    fn test_inactive_members_stop_scrolling() {
        let mut world = ArcadeWorld::new(450.0);
        let mut pool = ObstaclePool::spawn(&mut world, star_layout());
        let star = pool.handles()[0];
        pool.deactivate(&mut world, star);

        pool.advance(&mut world, 16.0, 0.4);

        assert_eq!(world.position(star).0, 200.0);
    }
}
