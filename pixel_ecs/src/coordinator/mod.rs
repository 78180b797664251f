//! Utilities for storage of ECS.

use std::any::{type_name, TypeId};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::mem;

use crate::component::{AnyPool, Component, ComponentId, Pool};
use crate::error::{Error, Result};
use crate::index::{GroupIndex, TagIndex};
use crate::system::{AsAny, DeltaTime, Signature, System, SystemResult};
use crate::Entity;


/// Storage for entities, components and systems of ECS.
///
/// This is the only place where ECS state is mutated. Entity creation and
/// destruction are deferred: call [`Coordinator::update`] once per tick,
/// before systems run, to apply them.
///
#[derive(Default)]
pub struct Coordinator {
    /// Count of identifiers minted so far.
    next_id: usize,
    to_be_created: BTreeSet<Entity>,
    to_be_destroyed: BTreeSet<Entity>,
    /// Identifiers of destroyed entities, oldest first.
    free_ids: VecDeque<usize>,
    /// Entities which were created and not destroyed yet (pending ones included).
    allocated: HashSet<Entity>,

    /// Signature of each entity, indexed by entity id.
    signatures: Vec<Signature>,
    /// Pool of each component type, indexed by component id.
    pools: Vec<Option<Box<dyn AnyPool>>>,
    systems: HashMap<TypeId, Box<dyn System>>,
    /// Count of systems detached by [`Coordinator::run_system`] right now.
    running_systems: usize,

    tags: TagIndex,
    groups: GroupIndex,
}

impl Coordinator {
    /// Creates new empty coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests creation of new entity.
    ///
    /// The entity becomes visible to systems on the next [`Coordinator::update`].
    /// Components can be attached to it right away.
    ///
    pub fn create(&mut self) -> Entity {
        let id = match self.free_ids.pop_front() {
            Some(id) => id,
            None => {
                let id = self.next_id;
                self.next_id += 1;
                if id >= self.signatures.len() {
                    let len = self.signatures.len();
                    let new_len = if len == 0 { 2 } else { len * 2 };
                    log::trace!("growing signature table from {} to {}", len, new_len);
                    self.signatures.resize(new_len.max(id + 1), Signature::EMPTY);
                }
                id
            }
        };

        let entity = Entity::new(id);
        self.allocated.insert(entity);
        self.to_be_created.insert(entity);
        log::debug!("entity {} created", entity);
        entity
    }

    /// Requests destruction of the entity.
    ///
    /// The entity stays alive until the next [`Coordinator::update`].
    /// Calling this many times before that is the same as calling it once.
    ///
    pub fn destroy(&mut self, entity: Entity) {
        if !self.allocated.contains(&entity) {
            log::warn!("ignoring destruction of unknown entity {}", entity);
            return;
        }
        if self.to_be_destroyed.insert(entity) {
            log::debug!("entity {} scheduled for destruction", entity);
        }
    }

    /// Returns `true` if the entity was created, flushed and not destroyed yet.
    ///
    /// Entity scheduled for destruction is still alive until the flush.
    ///
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocated.contains(&entity) && !self.to_be_created.contains(&entity)
    }

    /// Count of allocated entities, pending ones included.
    pub fn entity_count(&self) -> usize {
        self.allocated.len()
    }

    /// Current signature of the entity.
    pub fn signature(&self, entity: Entity) -> Signature {
        self.signatures
            .get(entity.id())
            .copied()
            .unwrap_or_default()
    }

    /// Registers component type `T` ahead of its first use.
    ///
    /// # Errors
    ///
    /// An error is returned if too many component types are registered.
    ///
    pub fn register_component<T>(&self) -> Result<ComponentId>
    where
        T: Component,
    {
        ComponentId::try_of::<T>()
    }

    /// Attaches component of type `T` to the entity, replacing previous one.
    ///
    /// Takes effect immediately, but system membership of already alive
    /// entities is not re-evaluated: systems only pick up entities when
    /// their creation is flushed.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not allocated by this coordinator
    /// or if there is no room for one more component type.
    ///
    pub fn add_component<T>(&mut self, entity: Entity, component: T)
    where
        T: Component,
    {
        assert!(
            self.allocated.contains(&entity),
            "entity {} is not allocated by this coordinator",
            entity,
        );
        let id = ComponentId::of::<T>();
        self.pool_or_insert::<T>(id).set(entity, component);
        self.signatures[entity.id()].set(id);
        log::trace!(
            "component `{}` attached to entity {}",
            type_name::<T>(),
            entity,
        );
    }

    /// Detaches component of type `T` from the entity.
    ///
    /// Returns detached component, if any.
    ///
    pub fn remove_component<T>(&mut self, entity: Entity) -> Option<T>
    where
        T: Component,
    {
        let id = ComponentId::get::<T>()?;
        let pool = self.pool_mut::<T>()?;
        let component = pool.remove(entity);
        if let Some(signature) = self.signatures.get_mut(entity.id()) {
            signature.unset(id);
        }
        component
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn has_component<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        ComponentId::get::<T>().map_or(false, |id| self.signature(entity).test(id))
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no such component.
    ///
    pub fn get_component<T>(&self, entity: Entity) -> Result<&T>
    where
        T: Component,
    {
        self.pool::<T>()
            .and_then(|pool| pool.get(entity))
            .ok_or(Error::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no such component.
    ///
    pub fn get_component_mut<T>(&mut self, entity: Entity) -> Result<&mut T>
    where
        T: Component,
    {
        self.pool_mut::<T>()
            .and_then(|pool| pool.get_mut(entity))
            .ok_or(Error::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Pool with all components of type `T`, if any component of this type was ever attached.
    pub fn pool<T>(&self) -> Option<&Pool<T>>
    where
        T: Component,
    {
        let index = ComponentId::get::<T>()?.index();
        let pool = self.pools.get(index)?.as_ref()?;
        Some(AnyPool::as_any(&**pool).downcast_ref().expect("downcast error"))
    }

    fn pool_mut<T>(&mut self) -> Option<&mut Pool<T>>
    where
        T: Component,
    {
        let index = ComponentId::get::<T>()?.index();
        let pool = self.pools.get_mut(index)?.as_mut()?;
        Some(AnyPool::as_any_mut(&mut **pool).downcast_mut().expect("downcast error"))
    }

    fn pool_or_insert<T>(&mut self, id: ComponentId) -> &mut Pool<T>
    where
        T: Component,
    {
        let index = id.index();
        if index >= self.pools.len() {
            self.pools.resize_with(index + 1, || None);
        }
        let pool = self.pools[index].get_or_insert_with(|| {
            log::info!("pool created for component `{}`", type_name::<T>());
            Box::new(Pool::<T>::new()) as Box<dyn AnyPool>
        });
        AnyPool::as_any_mut(&mut **pool)
            .downcast_mut()
            .expect("downcast error")
    }

    /// Registers the system, replacing previous instance of the same type.
    ///
    /// The system only sees entities whose creation is flushed after this call.
    ///
    pub fn add_system<S>(&mut self, system: S)
    where
        S: System,
    {
        let previous = self.systems.insert(TypeId::of::<S>(), Box::new(system));
        if previous.is_some() {
            log::info!("system `{}` replaced", type_name::<S>());
        } else {
            log::info!("system `{}` registered", type_name::<S>());
        }
    }

    /// Unregisters the system of type `S`.
    pub fn remove_system<S>(&mut self)
    where
        S: System,
    {
        if self.systems.remove(&TypeId::of::<S>()).is_some() {
            log::info!("system `{}` removed", type_name::<S>());
        }
    }

    /// Returns `true` if the system of type `S` is registered.
    pub fn has_system<S>(&self) -> bool
    where
        S: System,
    {
        self.systems.contains_key(&TypeId::of::<S>())
    }

    /// Retrieves an immutable reference to the system of type `S`.
    ///
    /// # Errors
    ///
    /// An error is returned if the system is not registered.
    ///
    pub fn get_system<S>(&self) -> Result<&S>
    where
        S: System,
    {
        let system = self
            .systems
            .get(&TypeId::of::<S>())
            .ok_or(Error::MissingSystem(type_name::<S>()))?;
        Ok(AsAny::as_any(&**system).downcast_ref().expect("downcast error"))
    }

    /// Retrieves a mutable reference to the system of type `S`.
    ///
    /// # Errors
    ///
    /// An error is returned if the system is not registered.
    ///
    pub fn get_system_mut<S>(&mut self) -> Result<&mut S>
    where
        S: System,
    {
        let system = self
            .systems
            .get_mut(&TypeId::of::<S>())
            .ok_or(Error::MissingSystem(type_name::<S>()))?;
        Ok(AsAny::as_any_mut(&mut **system).downcast_mut().expect("downcast error"))
    }

    /// Runs one processing pass of the system of type `S`.
    ///
    /// The system is detached for the duration of the pass so that it can
    /// access this coordinator. If the pass registers another instance of `S`,
    /// that instance is kept and the running one is dropped.
    /// Calls to [`Coordinator::update`] made during the pass are ignored.
    ///
    pub fn run_system<S>(&mut self, delta_time: DeltaTime) -> SystemResult
    where
        S: System,
    {
        let type_id = TypeId::of::<S>();
        let mut system = self
            .systems
            .remove(&type_id)
            .ok_or(Error::MissingSystem(type_name::<S>()))?;
        self.running_systems += 1;
        let result = system.update(self, delta_time);
        self.running_systems -= 1;
        self.systems.entry(type_id).or_insert(system);
        result
    }

    /// Adds the entity to every system interested in its current signature.
    ///
    /// Systems which handle the entity already are left as is.
    ///
    pub fn add_entity_to_systems(&mut self, entity: Entity) {
        self.match_entity(entity, true);
    }

    fn match_entity(&mut self, entity: Entity, check_duplicates: bool) {
        let signature = match self.signatures.get(entity.id()) {
            Some(&signature) => signature,
            None => return,
        };
        for system in self.systems.values_mut() {
            let subscription = system.subscription_mut();
            if subscription.is_interested(signature) {
                if check_duplicates && subscription.contains(entity) {
                    continue;
                }
                subscription.add_entity(entity);
                log::trace!("entity {} matched signature {}", entity, subscription.signature());
            }
        }
    }

    /// Removes the entity from every system.
    pub fn remove_entity_from_systems(&mut self, entity: Entity) {
        for system in self.systems.values_mut() {
            system.subscription_mut().remove_entity(entity);
        }
    }

    /// Binds the tag to the entity.
    ///
    /// Does nothing if the tag is held by another entity already.
    ///
    pub fn tag_entity(&mut self, entity: Entity, tag: &str) {
        if !self.tags.insert(entity, tag) {
            log::warn!("tag `{}` is already bound to another entity", tag);
        }
    }

    /// Returns `true` if the entity holds the tag.
    pub fn entity_has_tag(&self, entity: Entity, tag: &str) -> bool {
        self.tags.contains(entity, tag)
    }

    /// Entity which holds the tag, if any.
    pub fn get_entity_by_tag(&self, tag: &str) -> Option<Entity> {
        self.tags.entity(tag)
    }

    /// Releases the tag of the entity, if any.
    pub fn remove_entity_tag(&mut self, entity: Entity) {
        self.tags.remove_entity(entity);
    }

    /// Releases the tag, whichever entity holds it.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.remove_tag(tag);
    }

    /// Adds the entity into the group.
    pub fn group_entity(&mut self, entity: Entity, group: &str) {
        self.groups.insert(entity, group);
    }

    /// Returns `true` if the entity belongs to the group.
    pub fn entity_belongs_to_group(&self, entity: Entity, group: &str) -> bool {
        self.groups.contains(entity, group)
    }

    /// Members of the group in ascending order.
    pub fn get_entities_by_group(&self, group: &str) -> Vec<Entity> {
        self.groups.entities(group)
    }

    /// Removes the entity from the group.
    pub fn remove_entity_group(&mut self, entity: Entity, group: &str) {
        self.groups.remove(entity, group);
    }

    /// Removes the entity from all of its groups.
    pub fn remove_entity_groups(&mut self, entity: Entity) {
        self.groups.remove_entity(entity);
    }

    /// Removes the group with all of its memberships.
    pub fn remove_group(&mut self, group: &str) {
        self.groups.remove_group(group);
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    pub fn groups(&self) -> &GroupIndex {
        &self.groups
    }

    /// Applies pending entity creation and destruction.
    ///
    /// Created entities are matched against all systems first, then destroyed
    /// entities are purged: system memberships, signature, components, tag and
    /// groups. Identifiers of destroyed entities become available for reuse.
    /// Both pending sets are processed in ascending identifier order.
    ///
    /// Does nothing while a system pass is running: detached systems would
    /// miss the membership changes. Pending changes wait for the next call.
    ///
    pub fn update(&mut self) {
        if self.running_systems > 0 {
            log::warn!("ignoring flush requested during a system pass");
            return;
        }

        // Pending creations form a set, so no entity is matched twice here.
        let created = mem::take(&mut self.to_be_created);
        for &entity in &created {
            self.match_entity(entity, false);
        }

        let destroyed = mem::take(&mut self.to_be_destroyed);
        for &entity in &destroyed {
            self.remove_entity_from_systems(entity);
            if let Some(signature) = self.signatures.get_mut(entity.id()) {
                signature.reset();
            }
            for pool in self.pools.iter_mut().flatten() {
                pool.remove_entity(entity);
            }
            self.tags.remove_entity(entity);
            self.groups.remove_entity(entity);

            self.allocated.remove(&entity);
            self.free_ids.push_back(entity.id());
        }

        if !created.is_empty() || !destroyed.is_empty() {
            log::debug!(
                "flushed {} created and {} destroyed entities",
                created.len(),
                destroyed.len(),
            );
        }
    }
}
