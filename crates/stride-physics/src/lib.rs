//! Stride Physics - Collision queries and character movement using rapier3d
//!
//! Provides the static collision scene, the collision-aware character mover,
//! and the downward probes that turn terrain into grounding signals.

mod character_controller;
mod ground;

pub use character_controller::{CharacterController, CharacterControllerConfig};
pub use ground::{GroundProbeConfig, GroundSensor};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

/// Static collision scene plus the query pipeline the probes read.
/// Nothing is stepped; the character is moved kinematically.
pub struct PhysicsWorld {
    /// Rigid body storage (empty, but required by collider removal and queries)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    island_manager: IslandManager,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Rebuild the query pipeline after adding or moving colliders
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_box_blocks_rays() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec3::new(1.0, 0.5, 1.0), Vec3::new(0.0, 0.5, 0.0));

        // Not visible until the queries are rebuilt
        let down = Vec3::new(0.0, -1.0, 0.0);
        assert!(world.raycast(Vec3::new(0.0, 5.0, 0.0), down, 10.0, QueryFilter::default()).is_none());

        world.refresh_queries();
        let (_, toi) = world
            .raycast(Vec3::new(0.0, 5.0, 0.0), down, 10.0, QueryFilter::default())
            .expect("ray should hit the box top");
        assert!((toi - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_ground_creation() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0);
        assert!(world.get_collider(ground).is_some());

        world.remove_collider(ground);
        assert!(world.get_collider(ground).is_none());
    }

    #[test]
    fn test_raycast() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        world.refresh_queries();

        let hit = world.raycast(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            100.0,
            QueryFilter::default(),
        );
        let (_, toi) = hit.expect("ray should hit the ground plane");
        assert!((toi - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_raycast_misses_beyond_range() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        world.refresh_queries();

        let hit = world.raycast(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            2.0,
            QueryFilter::default(),
        );
        assert!(hit.is_none());
    }
}
