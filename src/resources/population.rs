//! Registries tracking which entities belong to whom.
//!
//! Only the simulation layer and its lifecycle systems mutate these maps;
//! per-tick component systems treat them as read-only. Insertion order of
//! viewers is kept so that capacity eviction can drop the oldest first.

use bevy_ecs::entity::Entity;
use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Resource, Debug, Default)]
pub struct Population {
    viewers: FxHashMap<String, Entity>,
    viewer_order: VecDeque<String>,
    raiders: Vec<Entity>,
    tombstones: Vec<Entity>,
    /// Last chat activity per user id, in simulation seconds.
    activity: FxHashMap<String, f32>,
}

impl Population {
    pub fn viewer(&self, user_id: &str) -> Option<Entity> {
        self.viewers.get(user_id).copied()
    }

    pub fn add_viewer(&mut self, user_id: impl Into<String>, entity: Entity) {
        let user_id = user_id.into();
        if self.viewers.insert(user_id.clone(), entity).is_none() {
            self.viewer_order.push_back(user_id);
        }
    }

    pub fn remove_viewer(&mut self, user_id: &str) -> Option<Entity> {
        let entity = self.viewers.remove(user_id);
        if entity.is_some() {
            self.viewer_order.retain(|id| id != user_id);
        }
        entity
    }

    pub fn remove_viewer_entity(&mut self, entity: Entity) -> Option<String> {
        let user_id = self
            .viewers
            .iter()
            .find(|(_, e)| **e == entity)
            .map(|(id, _)| id.clone())?;
        self.remove_viewer(&user_id);
        Some(user_id)
    }

    pub fn oldest_viewer(&self) -> Option<&str> {
        self.viewer_order.front().map(String::as_str)
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    pub fn viewer_entries(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.viewers.iter().map(|(id, e)| (id.as_str(), *e))
    }

    pub fn add_raider(&mut self, entity: Entity) {
        self.raiders.push(entity);
    }

    pub fn remove_raider(&mut self, entity: Entity) {
        self.raiders.retain(|e| *e != entity);
    }

    pub fn raider_count(&self) -> usize {
        self.raiders.len()
    }

    pub fn add_tombstone(&mut self, entity: Entity) {
        self.tombstones.push(entity);
    }

    pub fn remove_tombstone(&mut self, entity: Entity) {
        self.tombstones.retain(|e| *e != entity);
    }

    pub fn tombstone_count(&self) -> usize {
        self.tombstones.len()
    }

    pub fn tombstones(&self) -> &[Entity] {
        &self.tombstones
    }

    pub fn stamp_activity(&mut self, user_id: impl Into<String>, now: f32) {
        self.activity.insert(user_id.into(), now);
    }

    /// Whether the user has chatted at all since the overlay started.
    pub fn has_activity(&self, user_id: &str) -> bool {
        self.activity.contains_key(user_id)
    }

    /// Whether the user chatted within `window` seconds before `now`.
    pub fn recent_activity(&self, user_id: &str, now: f32, window: f32) -> bool {
        self.activity
            .get(user_id)
            .is_some_and(|at| now - at <= window)
    }
}
