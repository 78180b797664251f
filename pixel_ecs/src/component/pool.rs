//! Dense storage for **components** of one type.

use std::any::Any;
use std::collections::HashMap;
use std::mem;
use std::ops::{Index, IndexMut};

use super::{super::Entity, Component};

/// Count of slots preallocated by [`Pool::new`].
pub const DEFAULT_POOL_CAPACITY: usize = 100;

/// Storage for statically typed components of ECS.
///
/// Components are kept contiguous: removal moves the last component
/// into the freed slot, so slots `0..len()` are always occupied.
///
pub struct Pool<T>
where
    T: Component,
{
    /// Components are actually stored here.
    data: Vec<T>,
    entity_to_index: HashMap<Entity, usize>,
    index_to_entity: Vec<Entity>,
}

impl<T> Pool<T>
where
    T: Component,
{
    /// Creates an empty pool with [`DEFAULT_POOL_CAPACITY`] preallocated slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Creates an empty pool with `capacity` preallocated slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            entity_to_index: HashMap::with_capacity(capacity),
            index_to_entity: Vec::with_capacity(capacity),
        }
    }

    /// Returns `true` if there are no components in the pool.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Count of components in the pool.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Count of slots the pool can hold without reallocation.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Reserves room for at least `additional` more components.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
        self.index_to_entity.reserve(additional);
        self.entity_to_index.reserve(additional);
    }

    /// Removes all components, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.data.clear();
        self.entity_to_index.clear();
        self.index_to_entity.clear();
    }

    /// Inserts component and attaches it to the entity.
    /// If component was already attached, it will be replaced by value.
    ///
    /// Returns previously attached component, if any.
    ///
    pub fn set(&mut self, entity: Entity, component: T) -> Option<T> {
        if let Some(&index) = self.entity_to_index.get(&entity) {
            return Some(mem::replace(&mut self.data[index], component));
        }

        let len = self.data.len();
        if len == self.data.capacity() {
            let additional = len.max(1);
            log::trace!(
                "growing pool of `{}` from {} to {} slots",
                std::any::type_name::<T>(),
                len,
                len + additional,
            );
            self.reserve(additional);
        }
        self.data.push(component);
        self.index_to_entity.push(entity);
        self.entity_to_index.insert(entity, len);
        None
    }

    /// Removes component and detaches it from the entity.
    ///
    /// The last component of the pool takes the place of removed one.
    ///
    /// Returns component that was attached to the entity.
    ///
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.entity_to_index.remove(&entity)?;
        let component = self.data.swap_remove(index);
        let removed = self.index_to_entity.swap_remove(index);
        assert_eq!(removed, entity, "pool mappings are out of sync");

        if let Some(&moved) = self.index_to_entity.get(index) {
            self.entity_to_index.insert(moved, index);
        }
        Some(component)
    }

    /// Returns `true` if component was already attached to the entity.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    /// Retrieves an immutable reference to component attached to the entity.
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let index = *self.entity_to_index.get(&entity)?;
        self.data.get(index)
    }

    /// Retrieves a mutable reference to component attached to the entity.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = *self.entity_to_index.get(&entity)?;
        self.data.get_mut(index)
    }

    /// Retrieves the component stored in slot `index` together with its entity.
    pub fn slot(&self, index: usize) -> Option<(Entity, &T)> {
        let component = self.data.get(index)?;
        Some((self.index_to_entity[index], component))
    }

    /// Returns immutable iterator over all components with their entities.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.index_to_entity.iter().copied().zip(self.data.iter())
    }

    /// Returns mutable iterator over all components with their entities.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.index_to_entity.iter().copied().zip(self.data.iter_mut())
    }

    /// Returns iterator over all entities which have component of this type.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.index_to_entity.iter().copied()
    }

    /// Returns immutable iterator over all components.
    pub fn components(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Returns mutable iterator over all components.
    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Default for Pool<T>
where
    T: Component,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Entity> for Pool<T>
where
    T: Component,
{
    type Output = T;

    fn index(&self, entity: Entity) -> &Self::Output {
        self.get(entity)
            .expect("there is no component attached to the entity")
    }
}

impl<T> IndexMut<Entity> for Pool<T>
where
    T: Component,
{
    fn index_mut(&mut self, entity: Entity) -> &mut Self::Output {
        self.get_mut(entity)
            .expect("there is no component attached to the entity")
    }
}

/// Type-erased view of [`Pool`] used by the coordinator
/// to purge entities from pools of every type.
pub(crate) trait AnyPool: Any {
    /// Detaches component of the entity, if any.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> AnyPool for Pool<T>
where
    T: Component,
{
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
