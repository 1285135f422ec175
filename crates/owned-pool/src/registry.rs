use std::collections::HashMap;

use pool_types::{ObjectId, PoolObject};

/// `objectId → PoolObject` for every object a [`Pool`](crate::Pool) owns.
///
/// Insertion order is not part of the contract ([`spec §3`]) except for one
/// place: [`Pool::split`](crate::Pool::split) must visit candidates
/// last-in-first-out, so the registry keeps a side list of insertion order
/// purely to make that snapshot possible.
#[derive(Debug, Default, Clone)]
pub struct ObjectRegistry {
    objects: HashMap<ObjectId, PoolObject>,
    order:   Vec<ObjectId>
}

impl ObjectRegistry {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&PoolObject> {
        self.objects.get(id)
    }

    pub fn insert(&mut self, obj: PoolObject) {
        if !self.objects.contains_key(&obj.object_id) {
            self.order.push(obj.object_id.clone());
        }
        self.objects.insert(obj.object_id.clone(), obj);
    }

    pub fn remove(&mut self, id: &str) -> Option<PoolObject> {
        self.order.retain(|existing| existing != id);
        self.objects.remove(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &PoolObject> {
        self.objects.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.keys()
    }

    pub fn as_map(&self) -> &HashMap<ObjectId, PoolObject> {
        &self.objects
    }

    /// Object ids in most-recently-inserted-first order, for
    /// [`Pool::split`](crate::Pool::split)'s candidate walk.
    pub fn lifo_snapshot(&self) -> Vec<ObjectId> {
        let mut snapshot = self.order.clone();
        snapshot.reverse();
        snapshot
    }

    /// The subset of `objects` whose type tag marks it as a gas coin.
    pub fn gas_coins(&self) -> HashMap<ObjectId, PoolObject> {
        self.objects
            .iter()
            .filter(|(_, obj)| obj.is_gas_coin())
            .map(|(id, obj)| (id.clone(), obj.clone()))
            .collect()
    }
}
