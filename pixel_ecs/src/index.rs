//! String-keyed indices over entities: *tags* and *groups*.
//!
//! Both indices are kept in both directions, and every removal leaves
//! them mutually consistent with no empty containers left behind.

use std::collections::{BTreeSet, HashMap};

use crate::Entity;

/// One-to-one mapping between tags and entities.
#[derive(Debug, Default)]
pub struct TagIndex {
    entity_per_tag: HashMap<String, Entity>,
    tag_per_entity: HashMap<Entity, String>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the tag to the entity.
    ///
    /// Binding is refused if the tag is held by another entity already.
    /// If the entity holds another tag, that tag is released.
    ///
    /// Returns `true` if the entity holds the tag after the call.
    ///
    pub fn insert(&mut self, entity: Entity, tag: &str) -> bool {
        if let Some(&owner) = self.entity_per_tag.get(tag) {
            return owner == entity;
        }
        if let Some(previous) = self.tag_per_entity.insert(entity, tag.to_string()) {
            self.entity_per_tag.remove(&previous);
        }
        self.entity_per_tag.insert(tag.to_string(), entity);
        true
    }

    /// Returns `true` if the entity holds exactly this tag.
    pub fn contains(&self, entity: Entity, tag: &str) -> bool {
        self.entity_per_tag.get(tag) == Some(&entity)
    }

    /// Entity bound to the tag, if any.
    pub fn entity(&self, tag: &str) -> Option<Entity> {
        self.entity_per_tag.get(tag).copied()
    }

    /// Tag of the entity, if any.
    pub fn tag(&self, entity: Entity) -> Option<&str> {
        self.tag_per_entity.get(&entity).map(String::as_str)
    }

    /// Releases the tag of the entity. Returns released tag.
    pub fn remove_entity(&mut self, entity: Entity) -> Option<String> {
        let tag = self.tag_per_entity.remove(&entity)?;
        self.entity_per_tag.remove(&tag);
        Some(tag)
    }

    /// Releases the tag. Returns entity which held it.
    pub fn remove_tag(&mut self, tag: &str) -> Option<Entity> {
        let entity = self.entity_per_tag.remove(tag)?;
        self.tag_per_entity.remove(&entity);
        Some(entity)
    }

    /// Count of bound tags.
    pub fn len(&self) -> usize {
        self.entity_per_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_per_tag.is_empty()
    }
}

/// Many-to-many mapping between groups and entities.
#[derive(Debug, Default)]
pub struct GroupIndex {
    entities_per_group: HashMap<String, BTreeSet<Entity>>,
    groups_per_entity: HashMap<Entity, BTreeSet<String>>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the entity into the group.
    pub fn insert(&mut self, entity: Entity, group: &str) {
        self.entities_per_group
            .entry(group.to_string())
            .or_default()
            .insert(entity);
        self.groups_per_entity
            .entry(entity)
            .or_default()
            .insert(group.to_string());
    }

    /// Returns `true` if the entity belongs to the group.
    pub fn contains(&self, entity: Entity, group: &str) -> bool {
        self.entities_per_group
            .get(group)
            .map_or(false, |entities| entities.contains(&entity))
    }

    /// Members of the group in ascending order.
    pub fn entities(&self, group: &str) -> Vec<Entity> {
        self.entities_per_group
            .get(group)
            .map(|entities| entities.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Groups of the entity in ascending order.
    pub fn groups(&self, entity: Entity) -> Vec<&str> {
        self.groups_per_entity
            .get(&entity)
            .map(|groups| groups.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Removes the entity from the group.
    ///
    /// Returns `true` if the entity was a member.
    ///
    pub fn remove(&mut self, entity: Entity, group: &str) -> bool {
        let removed = match self.entities_per_group.get_mut(group) {
            Some(entities) => {
                let removed = entities.remove(&entity);
                if entities.is_empty() {
                    self.entities_per_group.remove(group);
                }
                removed
            }
            None => false,
        };
        if let Some(groups) = self.groups_per_entity.get_mut(&entity) {
            groups.remove(group);
            if groups.is_empty() {
                self.groups_per_entity.remove(&entity);
            }
        }
        removed
    }

    /// Removes the entity from all of its groups.
    pub fn remove_entity(&mut self, entity: Entity) {
        let groups = match self.groups_per_entity.remove(&entity) {
            Some(groups) => groups,
            None => return,
        };
        for group in groups {
            if let Some(entities) = self.entities_per_group.get_mut(&group) {
                entities.remove(&entity);
                if entities.is_empty() {
                    self.entities_per_group.remove(&group);
                }
            }
        }
    }

    /// Removes the group with all of its memberships.
    pub fn remove_group(&mut self, group: &str) {
        let entities = match self.entities_per_group.remove(group) {
            Some(entities) => entities,
            None => return,
        };
        for entity in entities {
            if let Some(groups) = self.groups_per_entity.get_mut(&entity) {
                groups.remove(group);
                if groups.is_empty() {
                    self.groups_per_entity.remove(&entity);
                }
            }
        }
    }

    /// Count of non-empty groups.
    pub fn len(&self) -> usize {
        self.entities_per_group.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities_per_group.is_empty()
    }
}
