/* ************************************************************************
*   File: act_offensive.rs                               Part of DuskMUD  *
*  Usage: player-level commands of an offensive nature                    *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use crate::action::Action;
use crate::config::NOPERSON;
use crate::db::World;
use crate::depot::DepotId;
use crate::fight::start_fight;
use crate::game::{act, send_to_char, Game, TO_CHAR, TO_NOTVICT, TO_ROOM, TO_VICT};
use crate::handler::{char_from_room, char_to_room, get_char_in_room};
use crate::interpreter::TokenHandler;
use crate::structs::{Posture, RoomFlags, DIRECTIONS};
use crate::util::rand_number;

pub fn do_kill(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    if args.is_empty() || args[0].is_empty() {
        send_to_char(&mut game.descriptors, world.ch(chid), "Kill who?\r\n");
        return false;
    }
    let rid = match world.ch(chid).in_room {
        Some(rid) => rid,
        None => return false,
    };
    if world.room(rid).flags.contains(RoomFlags::PEACEFUL) {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "A strange calm here stays your hand.\r\n",
        );
        return false;
    }
    let victim = match get_char_in_room(world, rid, &args[0]) {
        Some(v) => v,
        None => {
            send_to_char(&mut game.descriptors, world.ch(chid), NOPERSON);
            return false;
        }
    };
    if victim == chid {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "You hit yourself..  OUCH!\r\n",
        );
        return false;
    }
    if world.ch(chid).posture < Posture::Standing {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "On your feet first!\r\n",
        );
        return false;
    }
    act(
        &mut game.descriptors,
        world,
        "You square up against $N!",
        chid,
        None,
        Some(victim),
        TO_CHAR,
    );
    act(
        &mut game.descriptors,
        world,
        "$n squares up against $N!",
        chid,
        None,
        Some(victim),
        TO_NOTVICT,
    );
    start_fight(game, world, chid, victim);
    true
}

/*
 * The one sanctioned way out of a fight.  A random open exit, taken at
 * a dead run, no cooldown, no grace.
 */
pub fn do_flee(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let ch = world.ch(chid);
    if !ch.in_combat() {
        send_to_char(
            &mut game.descriptors,
            ch,
            "But nothing is chasing you.\r\n",
        );
        return false;
    }
    let rid = match ch.in_room {
        Some(rid) => rid,
        None => return false,
    };

    let open: Vec<_> = DIRECTIONS
        .iter()
        .copied()
        .filter(|&dir| {
            world.room(rid).exit(dir).map_or(false, |e| {
                !e.is_closed()
                    && !world
                        .room(e.to_room)
                        .flags
                        .contains(RoomFlags::NO_FLOOR)
            })
        })
        .collect();
    if open.is_empty() {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "PANIC!  You couldn't escape!\r\n",
        );
        return false;
    }
    let dir = open[rand_number(0, open.len() as u32 - 1) as usize];
    let dest = world.room(rid).exit(dir).unwrap().to_room;

    world.ch_mut(chid).action = Action::wait();
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        "You flee head over heels.\r\n",
    );
    act(
        &mut game.descriptors,
        world,
        &format!("$n panics, and flees {}!", dir.name()),
        chid,
        None,
        None,
        TO_ROOM,
    );
    char_from_room(world, chid);
    char_to_room(world, chid, dest);
    act(
        &mut game.descriptors,
        world,
        "$n bursts in, wild-eyed.",
        chid,
        None,
        None,
        TO_ROOM,
    );
    if world.ch(chid).desc.is_some() {
        crate::act_informative::look_at_room(game, world, chid);
    }
    true
}

/*
 * Lining up a shot is worth a real edge on the next swing, but any
 * movement before it lands throws the whole thing off.
 */
pub fn do_aim(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    if args.is_empty() || args[0].is_empty() {
        send_to_char(&mut game.descriptors, world.ch(chid), "Aim at who?\r\n");
        return false;
    }
    let rid = match world.ch(chid).in_room {
        Some(rid) => rid,
        None => return false,
    };
    let victim = match get_char_in_room(world, rid, &args[0]) {
        Some(v) => v,
        None => {
            send_to_char(&mut game.descriptors, world.ch(chid), NOPERSON);
            return false;
        }
    };
    if victim == chid {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "Aiming at yourself seems unwise.\r\n",
        );
        return false;
    }
    world.ch_mut(chid).aimed_at = Some(victim);
    act(
        &mut game.descriptors,
        world,
        "You take careful aim at $N.",
        chid,
        None,
        Some(victim),
        TO_CHAR,
    );
    act(
        &mut game.descriptors,
        world,
        "$n takes careful aim at you!",
        chid,
        None,
        Some(victim),
        TO_VICT,
    );
    true
}
