//! Arcade-style physics backend.
//!
//! The scene never integrates motion itself. It talks to a [`PhysicsBackend`]:
//! create bodies, nudge velocities and positions, ask whether a body is
//! standing on something, and register which groups of bodies collide
//! (blocking) or merely overlap (callback only). [`ArcadeWorld`] is the
//! implementation the game ships with: gravity, semi-implicit Euler
//! integration and AABB contacts, nothing more.

use crate::collision::{aabb_intersect, calculate_overlap, Aabb, Collidable, ContactKind};

/// Opaque reference to a body owned by a physics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(usize);

/// Identifies a registered collider/overlap pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Moves under velocity (and gravity if allowed)
    Dynamic,
    /// Never integrated, never pushed
    Static,
}

/// Everything needed to create a body.
#[derive(Debug, Clone, Copy)]
pub struct BodyDesc {
    pub bounds: Aabb,
    pub kind: BodyKind,
    pub allow_gravity: bool,
    /// Immovable dynamic bodies are integrated but never pushed by contacts
    pub immovable: bool,
}

impl BodyDesc {
    pub fn dynamic(bounds: Aabb) -> Self {
        BodyDesc {
            bounds,
            kind: BodyKind::Dynamic,
            allow_gravity: true,
            immovable: false,
        }
    }

    pub fn fixed(bounds: Aabb) -> Self {
        BodyDesc {
            bounds,
            kind: BodyKind::Static,
            allow_gravity: false,
            immovable: true,
        }
    }

    /// Dynamic body that ignores gravity and is not pushed around (obstacles).
    pub fn kinematic(bounds: Aabb) -> Self {
        BodyDesc {
            bounds,
            kind: BodyKind::Dynamic,
            allow_gravity: false,
            immovable: true,
        }
    }
}

/// Which faces of a body were blocked during the last step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touching {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub bounds: Aabb,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub kind: BodyKind,
    pub allow_gravity: bool,
    pub immovable: bool,
    pub enabled: bool,
    pub touching: Touching,
}

impl Body {
    fn from_desc(desc: BodyDesc) -> Self {
        Body {
            bounds: desc.bounds,
            velocity_x: 0.0,
            velocity_y: 0.0,
            kind: desc.kind,
            allow_gravity: desc.allow_gravity,
            immovable: desc.immovable,
            enabled: true,
            touching: Touching::default(),
        }
    }

    fn is_pushable(&self) -> bool {
        self.kind == BodyKind::Dynamic && !self.immovable
    }
}

impl Collidable for Body {
    fn get_bounds(&self) -> Aabb {
        self.bounds
    }
}

/// A registered pair reported this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub pair: PairId,
    pub kind: ContactKind,
    pub a: BodyHandle,
    pub b: BodyHandle,
}

/// Capabilities the scene needs from a physics engine.
///
/// Calls with a handle the backend did not create are ignored and queries
/// answer with neutral values.
pub trait PhysicsBackend {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;

    fn body(&self, handle: BodyHandle) -> Option<&Body>;

    fn set_position(&mut self, handle: BodyHandle, x: f32, y: f32);

    fn set_velocity_y(&mut self, handle: BodyHandle, velocity_y: f32);

    /// Resize the collision extent, keeping the centre fixed.
    fn set_size(&mut self, handle: BodyHandle, width: f32, height: f32);

    /// Remove a body from collision and integration. There is no way back.
    fn disable_body(&mut self, handle: BodyHandle);

    /// Blocking pair between two groups; reported on every intersecting step.
    fn add_collider(&mut self, a: &[BodyHandle], b: &[BodyHandle]) -> PairId;

    /// Non-blocking pair between two groups.
    fn add_overlap(&mut self, a: &[BodyHandle], b: &[BodyHandle]) -> PairId;

    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    /// Advance the simulation by `delta_ms`, returning the contacts observed.
    fn step(&mut self, delta_ms: f32) -> Vec<Contact>;

    fn position(&self, handle: BodyHandle) -> (f32, f32) {
        self.body(handle)
            .map(|b| (b.bounds.x, b.bounds.y))
            .unwrap_or((0.0, 0.0))
    }

    fn velocity(&self, handle: BodyHandle) -> (f32, f32) {
        self.body(handle)
            .map(|b| (b.velocity_x, b.velocity_y))
            .unwrap_or((0.0, 0.0))
    }

    fn touching_down(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_some_and(|b| b.touching.down)
    }

    fn is_enabled(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_some_and(|b| b.enabled)
    }
}

struct Pair {
    kind: ContactKind,
    a: Vec<BodyHandle>,
    b: Vec<BodyHandle>,
}

/// Minimal arcade physics world.
pub struct ArcadeWorld {
    gravity_y: f32,
    bodies: Vec<Body>,
    pairs: Vec<Pair>,
    paused: bool,
}

impl ArcadeWorld {
    /// `gravity_y` is in px/s², positive pulls down.
    pub fn new(gravity_y: f32) -> Self {
        ArcadeWorld {
            gravity_y,
            bodies: Vec::new(),
            pairs: Vec::new(),
            paused: false,
        }
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyHandle(index), body))
    }

    fn add_pair(&mut self, kind: ContactKind, a: &[BodyHandle], b: &[BodyHandle]) -> PairId {
        self.pairs.push(Pair {
            kind,
            a: a.to_vec(),
            b: b.to_vec(),
        });
        PairId(self.pairs.len() - 1)
    }

    fn integrate(&mut self, dt: f32) {
        for body in self.bodies.iter_mut() {
            body.touching = Touching::default();
            if !body.enabled || body.kind == BodyKind::Static {
                continue;
            }
            if body.allow_gravity {
                body.velocity_y += self.gravity_y * dt;
            }
            body.bounds.x += body.velocity_x * dt;
            body.bounds.y += body.velocity_y * dt;
        }
    }

    /// Push `a` and/or `b` apart along the axis of least penetration.
    fn separate(&mut self, a: usize, b: usize) {
        let (a_bounds, b_bounds) = (self.bodies[a].bounds, self.bodies[b].bounds);
        let (overlap_x, overlap_y) = calculate_overlap(&a_bounds, &b_bounds);

        let a_moves = self.bodies[a].is_pushable();
        let b_moves = self.bodies[b].is_pushable();
        let (a_share, b_share) = match (a_moves, b_moves) {
            (true, true) => (0.5, 0.5),
            (true, false) => (1.0, 0.0),
            (false, true) => (0.0, 1.0),
            (false, false) => (0.0, 0.0),
        };

        if overlap_x.abs() < overlap_y.abs() {
            self.bodies[a].bounds.x -= overlap_x * a_share;
            self.bodies[b].bounds.x += overlap_x * b_share;
            let a_on_left = overlap_x > 0.0;
            self.bodies[a].touching.right |= a_on_left;
            self.bodies[a].touching.left |= !a_on_left;
            self.bodies[b].touching.left |= a_on_left;
            self.bodies[b].touching.right |= !a_on_left;
            if a_share > 0.0 {
                self.bodies[a].velocity_x = 0.0;
            }
            if b_share > 0.0 {
                self.bodies[b].velocity_x = 0.0;
            }
        } else {
            self.bodies[a].bounds.y -= overlap_y * a_share;
            self.bodies[b].bounds.y += overlap_y * b_share;
            let a_above = overlap_y > 0.0;
            self.bodies[a].touching.down |= a_above;
            self.bodies[a].touching.up |= !a_above;
            self.bodies[b].touching.up |= a_above;
            self.bodies[b].touching.down |= !a_above;
            // Stop whoever was moving into the contact
            if a_share > 0.0 && (self.bodies[a].velocity_y > 0.0) == a_above {
                self.bodies[a].velocity_y = 0.0;
            }
            if b_share > 0.0 && (self.bodies[b].velocity_y < 0.0) == a_above {
                self.bodies[b].velocity_y = 0.0;
            }
        }
    }

    fn resolve_pairs(&mut self) -> Vec<Contact> {
        let mut contacts = Vec::new();

        for pair_index in 0..self.pairs.len() {
            let kind = self.pairs[pair_index].kind;
            let group_a = self.pairs[pair_index].a.clone();
            let group_b = self.pairs[pair_index].b.clone();

            for &a in &group_a {
                for &b in &group_b {
                    if a == b || !self.is_enabled(a) || !self.is_enabled(b) {
                        continue;
                    }
                    let a_bounds = self.bodies[a.0].get_bounds();
                    let b_bounds = self.bodies[b.0].get_bounds();
                    if !aabb_intersect(&a_bounds, &b_bounds) {
                        continue;
                    }
                    if kind == ContactKind::Solid {
                        self.separate(a.0, b.0);
                    }
                    contacts.push(Contact {
                        pair: PairId(pair_index),
                        kind,
                        a,
                        b,
                    });
                }
            }
        }

        contacts
    }
}

impl PhysicsBackend for ArcadeWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        self.bodies.push(Body::from_desc(desc));
        BodyHandle(self.bodies.len() - 1)
    }

    fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0)
    }

    fn set_position(&mut self, handle: BodyHandle, x: f32, y: f32) {
        if let Some(body) = self.bodies.get_mut(handle.0) {
            body.bounds.x = x;
            body.bounds.y = y;
        }
    }

    fn set_velocity_y(&mut self, handle: BodyHandle, velocity_y: f32) {
        if let Some(body) = self.bodies.get_mut(handle.0) {
            body.velocity_y = velocity_y;
        }
    }

    fn set_size(&mut self, handle: BodyHandle, width: f32, height: f32) {
        if let Some(body) = self.bodies.get_mut(handle.0) {
            let (cx, cy) = body.bounds.center();
            body.bounds = Aabb::from_center(cx, cy, width, height);
        }
    }

    fn disable_body(&mut self, handle: BodyHandle) {
        if let Some(body) = self.bodies.get_mut(handle.0) {
            body.enabled = false;
            body.velocity_x = 0.0;
            body.velocity_y = 0.0;
        }
    }

    fn add_collider(&mut self, a: &[BodyHandle], b: &[BodyHandle]) -> PairId {
        self.add_pair(ContactKind::Solid, a, b)
    }

    fn add_overlap(&mut self, a: &[BodyHandle], b: &[BodyHandle]) -> PairId {
        self.add_pair(ContactKind::Overlap, a, b)
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn step(&mut self, delta_ms: f32) -> Vec<Contact> {
        if self.paused || delta_ms <= 0.0 {
            return Vec::new();
        }

        self.integrate(delta_ms / 1000.0);
        self.resolve_pairs()
    }
}
