/* ************************************************************************
*   File: handler.rs                                     Part of DuskMUD  *
*  Usage: internal funcs: moving and finding chars/objs                   *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use log::error;

use crate::db::World;
use crate::depot::DepotId;
use crate::interpreter::Token;
use crate::structs::{ItemLocation, Posture};

/* the first keyword of a keyword list, for messages */
pub fn fname(namelist: &str) -> &str {
    let end = namelist
        .find(|c: char| !c.is_alphanumeric() && c != '-')
        .unwrap_or(namelist.len());
    &namelist[..end]
}

/* does the searched-for word abbreviate any keyword in the list? */
pub fn isname(search: &str, namelist: &str) -> bool {
    if search.is_empty() {
        return false;
    }
    let search = search.to_lowercase();
    namelist
        .split_whitespace()
        .any(|word| word.to_lowercase().starts_with(search.as_str()))
}

/*
 * Containment is mutated in exactly one place: an item is detached from
 * wherever it is, then attached somewhere.  Nothing else touches the
 * room/inventory lists, so an item can never be claimed twice.
 */
pub fn detach_item(world: &mut World, oid: DepotId) {
    let location = world.obj(oid).location;
    match location {
        ItemLocation::Nowhere => (),
        ItemLocation::Room(rid) => {
            world.room_mut(rid).contents.retain(|&o| o != oid);
        }
        ItemLocation::Carried(chid) => {
            world.ch_mut(chid).carrying.retain(|&o| o != oid);
        }
    }
    world.obj_mut(oid).location = ItemLocation::Nowhere;
}

pub fn obj_to_room(world: &mut World, oid: DepotId, rid: DepotId) {
    detach_item(world, oid);
    world.room_mut(rid).contents.push(oid);
    world.obj_mut(oid).location = ItemLocation::Room(rid);
}

pub fn obj_to_char(world: &mut World, oid: DepotId, chid: DepotId) {
    detach_item(world, oid);
    world.ch_mut(chid).carrying.push(oid);
    world.obj_mut(oid).location = ItemLocation::Carried(chid);
}

pub fn extract_obj(world: &mut World, oid: DepotId) {
    detach_item(world, oid);
    world.objs.remove(oid);
}

pub fn char_from_room(world: &mut World, chid: DepotId) {
    match world.ch(chid).in_room {
        None => error!("SYSERR: char_from_room: {} is nowhere", world.ch(chid).pers()),
        Some(rid) => {
            world.room_mut(rid).people.retain(|&c| c != chid);
            world.ch_mut(chid).in_room = None;
        }
    }
}

pub fn char_to_room(world: &mut World, chid: DepotId, rid: DepotId) {
    if world.ch(chid).in_room.is_some() {
        char_from_room(world, chid);
    }
    world.room_mut(rid).people.push(chid);
    world.ch_mut(chid).in_room = Some(rid);
}

/*
 * Remove a character from the game entirely.  Whatever they carried
 * falls where they stood (or vanishes with them if they stood nowhere).
 */
pub fn extract_char(world: &mut World, chid: DepotId) {
    let in_room = world.ch(chid).in_room;
    let carried: Vec<DepotId> = world.ch(chid).carrying.clone();
    for oid in carried {
        match in_room {
            Some(rid) => obj_to_room(world, oid, rid),
            None => extract_obj(world, oid),
        }
    }
    if in_room.is_some() {
        char_from_room(world, chid);
    }
    /* nobody keeps aim on the departed */
    for other in world.chars.ids() {
        if world.ch(other).aimed_at == Some(chid) {
            world.ch_mut(other).aimed_at = None;
        }
    }
    world.chars.remove(chid);
}

pub fn carried_weight(world: &World, chid: DepotId) -> i32 {
    world
        .ch(chid)
        .carrying
        .iter()
        .map(|&oid| world.obj(oid).weight)
        .sum()
}

pub fn can_carry(world: &World, chid: DepotId, oid: DepotId) -> bool {
    carried_weight(world, chid) + world.obj(oid).weight <= world.ch(chid).carry_limit()
}

/*
 * Find the index-th item in a list whose keywords the token's content
 * abbreviates.  The token's ordinal is what "apple.2" turns into.
 */
pub fn get_obj_in_list(world: &World, token: &Token, list: &[DepotId]) -> Option<DepotId> {
    let mut countdown = token.index.max(1);
    for &oid in list {
        if isname(token.content(), &world.obj(oid).name) {
            countdown -= 1;
            if countdown == 0 {
                return Some(oid);
            }
        }
    }
    None
}

pub fn get_char_in_room(world: &World, rid: DepotId, token: &Token) -> Option<DepotId> {
    let mut countdown = token.index.max(1);
    for &chid in &world.room(rid).people {
        if world.ch(chid).posture == Posture::Dead {
            continue;
        }
        if isname(token.content(), &world.ch(chid).name) {
            countdown -= 1;
            if countdown == 0 {
                return Some(chid);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isname_matches_keyword_prefixes() {
        assert!(isname("swo", "sword iron"));
        assert!(isname("IRON", "sword iron"));
        assert!(!isname("axe", "sword iron"));
        assert!(!isname("", "sword iron"));
    }

    #[test]
    fn fname_takes_first_word() {
        assert_eq!(fname("trapdoor oak"), "trapdoor");
        assert_eq!(fname("bread"), "bread");
    }
}
