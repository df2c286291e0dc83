/* ************************************************************************
*   File: depot.rs                                       Part of DuskMUD  *
*  Usage: generation-checked arenas; stable ids instead of pointers       *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

/*
 * Every world entity (room, character, item, descriptor) lives in a Depot
 * and is referred to by its DepotId.  An id carries the generation of the
 * slot it was handed out for, so a reference kept across a removal is
 * detected instead of silently aliasing the slot's next tenant.
 */

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DepotId {
    index: u32,
    gen: u32,
}

pub trait HasId {
    fn id(&self) -> DepotId;
    fn set_id(&mut self, id: DepotId);
}

enum Slot<T> {
    Vacant { next_free: Option<u32> },
    Occupied { gen: u32, value: T },
}

pub struct Depot<T>
where
    T: HasId,
{
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
    gen: u32,
}

impl<T> Depot<T>
where
    T: HasId,
{
    pub fn new() -> Depot<T> {
        Depot {
            slots: vec![],
            free_head: None,
            len: 0,
            gen: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    pub fn push(&mut self, value: T) -> DepotId {
        self.gen += 1;
        let index;
        match self.free_head {
            Some(free) => {
                index = free;
                self.free_head = match self.slots[free as usize] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied { .. } => {
                        panic!("GURU MEDITATION free list points at occupied slot {}", free)
                    }
                };
                self.slots[free as usize] = Slot::Occupied {
                    gen: self.gen,
                    value,
                };
            }
            None => {
                index = self.slots.len() as u32;
                self.slots.push(Slot::Occupied {
                    gen: self.gen,
                    value,
                });
            }
        }
        self.len += 1;
        let id = DepotId {
            index,
            gen: self.gen,
        };
        self.get_mut(id).set_id(id);
        id
    }

    pub fn remove(&mut self, id: DepotId) -> T {
        self.check(id);
        let slot = std::mem::replace(
            &mut self.slots[id.index as usize],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id.index);
        self.len -= 1;
        match slot {
            Slot::Occupied { value, .. } => value,
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    pub fn contains(&self, id: DepotId) -> bool {
        match self.slots.get(id.index as usize) {
            Some(Slot::Occupied { gen, .. }) => *gen == id.gen,
            _ => false,
        }
    }

    pub fn get(&self, id: DepotId) -> &T {
        self.check(id);
        match &self.slots[id.index as usize] {
            Slot::Occupied { value, .. } => value,
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    pub fn get_mut(&mut self, id: DepotId) -> &mut T {
        self.check(id);
        match &mut self.slots[id.index as usize] {
            Slot::Occupied { value, .. } => value,
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    fn check(&self, id: DepotId) {
        match self.slots.get(id.index as usize) {
            None => panic!(
                "GURU MEDITATION depot index {} out of range ({} slots)",
                id.index,
                self.slots.len()
            ),
            Some(Slot::Vacant { .. }) => {
                panic!("GURU MEDITATION depot slot {} is vacant", id.index)
            }
            Some(Slot::Occupied { gen, .. }) if *gen != id.gen => panic!(
                "GURU MEDITATION stale depot id (slot {} gen {} vs {})",
                id.index, gen, id.gen
            ),
            Some(Slot::Occupied { .. }) => (),
        }
    }

    /* Snapshot of live ids; safe to hold across insertions and removals. */
    pub fn ids(&self) -> Vec<DepotId> {
        let mut ret = Vec::with_capacity(self.len);
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { gen, .. } = slot {
                ret.push(DepotId {
                    index: index as u32,
                    gen: *gen,
                });
            }
        }
        ret
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|s| match s {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        })
    }
}

impl<T> Default for Depot<T>
where
    T: HasId,
{
    fn default() -> Self {
        Depot::new()
    }
}
