use bevy::prelude::*;

/// Circular collision footprint in world units
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f32,
}

impl Collider {
    pub fn overlaps(&self, position: Vec2, other: &Collider, other_position: Vec2) -> bool {
        position.distance_squared(other_position) <= (self.radius + other.radius).powi(2)
    }
}

/// Tag for entities that projectiles are allowed to hurt
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Alive;

/// Something that can take damage.
pub trait Living {
    fn damage(&mut self, amount: f32);
    fn is_dead(&self) -> bool;
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }
}

impl Living for Health {
    fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount.max(0.0)).max(0.0);
    }

    fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(ProjectilePhase)]
pub struct Projectile {
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub max_lifetime: f32,
    /// Seconds spent flying. Only advances while combat is simulated.
    pub age: f32,
    /// Never collides with this entity
    pub owner: Option<Entity>,
}

impl Projectile {
    pub fn is_expired(&self) -> bool {
        self.age >= self.max_lifetime
    }

    pub fn displacement(&self, dt: f32) -> Vec2 {
        self.direction * self.speed * dt
    }
}

/// Lifecycle of a projectile. Only `Flying` projectiles are simulated; the
/// other two are terminal.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ProjectilePhase {
    #[default]
    Flying,
    Expired,
    Hit,
}

impl ProjectilePhase {
    pub fn is_flying(&self) -> bool {
        *self == ProjectilePhase::Flying
    }

    /// Move to `Expired` if the lifetime is used up. True exactly once, on
    /// the transition.
    pub fn expire_if_due(&mut self, projectile: &Projectile) -> bool {
        if self.is_flying() && projectile.is_expired() {
            *self = ProjectilePhase::Expired;
            true
        } else {
            false
        }
    }

    /// Move to `Hit`. True exactly once, on the transition.
    pub fn hit(&mut self) -> bool {
        if self.is_flying() {
            *self = ProjectilePhase::Hit;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub damage: f32,
    pub speed: f32,
    pub lifetime: f32,
    pub radius: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Tower {
    pub unit_index: usize,
    pub range: f32,
    pub fire_interval: f32,
    pub cooldown: f32,
    pub projectile: ProjectileSpec,
}

/// Tower whose range ring is drawn, i.e. the current selection
#[derive(Component)]
pub struct ShowRange;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub speed: f32,
    pub bounty: u32,
}
