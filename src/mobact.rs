/* ************************************************************************
*   File: mobact.rs                                      Part of DuskMUD  *
*  Usage: functions for generating intelligent (?) behavior in mobiles    *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use crate::act_movement::start_move;
use crate::db::World;
use crate::depot::DepotId;
use crate::fight::start_fight;
use crate::game::{act, Game, TO_ROOM};
use crate::handler::{can_carry, obj_to_char};
use crate::structs::{Direction, ExitFlags, MobFlags, Posture, RoomFlags, DIRECTIONS};
use crate::util::rand_number;

pub fn mobile_activity(game: &mut Game, world: &mut World) {
    for chid in world.chars.ids() {
        if !world.chars.contains(chid) {
            continue;
        }
        let ch = world.ch(chid);
        if !ch.is_npc() || !ch.action.is_idle() || ch.posture < Posture::Standing {
            continue;
        }
        let rid = match ch.in_room {
            Some(rid) => rid,
            None => continue,
        };
        let flags = ch.mob_flags;

        if flags.contains(MobFlags::AGGRESSIVE)
            && !world.room(rid).flags.contains(RoomFlags::PEACEFUL)
        {
            let prey = world
                .room(rid)
                .people
                .iter()
                .copied()
                .find(|&other| !world.ch(other).is_npc() && world.ch(other).posture > Posture::Dead);
            if let Some(victim) = prey {
                act(
                    &mut game.descriptors,
                    world,
                    "$n snarls and goes for $N!",
                    chid,
                    None,
                    Some(victim),
                    TO_ROOM,
                );
                start_fight(game, world, chid, victim);
                continue;
            }
        }

        if flags.contains(MobFlags::SCAVENGER) && rand_number(0, 3) == 0 {
            let loot = world
                .room(rid)
                .contents
                .iter()
                .copied()
                .find(|&oid| world.obj(oid).can_take());
            if let Some(oid) = loot {
                if can_carry(world, chid, oid) {
                    obj_to_char(world, oid, chid);
                    act(
                        &mut game.descriptors,
                        world,
                        "$n gets $p.",
                        chid,
                        Some(oid),
                        None,
                        TO_ROOM,
                    );
                    continue;
                }
            }
        }

        /* wanderers drift, one step at a time, and never where barred */
        if !flags.contains(MobFlags::SENTINEL) && rand_number(0, 18) == 0 {
            let dir = DIRECTIONS[rand_number(0, DIRECTIONS.len() as u32 - 1) as usize];
            if mob_can_wander(world, rid, dir) {
                start_move(game, world, chid, dir);
            }
        }
    }
}

fn mob_can_wander(world: &World, rid: DepotId, dir: Direction) -> bool {
    match world.room(rid).exit(dir) {
        Some(exit) => {
            !exit.is_closed()
                && !exit.flags.contains(ExitFlags::NO_MOB)
                && !world.room(exit.to_room).flags.contains(RoomFlags::NO_MOB)
        }
        None => false,
    }
}
