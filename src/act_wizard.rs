/* ************************************************************************
*   File: act_wizard.rs                                  Part of DuskMUD  *
*  Usage: staff-level commands and other goodies                          *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use log::info;

use crate::act_informative::look_at_room;
use crate::action::describe;
use crate::db::World;
use crate::depot::DepotId;
use crate::game::{act, send_to_char, Game, TO_ROOM};
use crate::handler::{carried_weight, char_from_room, char_to_room, isname};
use crate::interpreter::TokenHandler;

pub fn do_goto(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let vnum = match args.get(0).and_then(|t| t.content().parse::<i32>().ok()) {
        Some(vnum) => vnum,
        None => {
            send_to_char(
                &mut game.descriptors,
                world.ch(chid),
                "Usage: goto <room number>\r\n",
            );
            return false;
        }
    };
    let dest = match world.room_by_vnum(vnum) {
        Some(rid) => rid,
        None => {
            send_to_char(
                &mut game.descriptors,
                world.ch(chid),
                "No room exists with that number.\r\n",
            );
            return false;
        }
    };
    act(
        &mut game.descriptors,
        world,
        "$n disappears in a puff of smoke.",
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
        "$n appears with an ear-splitting bang.",
        chid,
        None,
        None,
        TO_ROOM,
    );
    look_at_room(game, world, chid);
    true
}

pub fn do_stat(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    if args.is_empty() || args[0].is_empty() {
        send_to_char(&mut game.descriptors, world.ch(chid), "Stat who?\r\n");
        return false;
    }
    let target = world
        .chars
        .ids()
        .into_iter()
        .find(|&other| isname(args[0].content(), &world.ch(other).name));
    let target = match target {
        Some(t) => t,
        None => {
            send_to_char(
                &mut game.descriptors,
                world.ch(chid),
                "Nobody around by that name.\r\n",
            );
            return false;
        }
    };
    let tch = world.ch(target);
    let out = format!(
        "Name: {}  [{}]\r\n\
         Room: {}  Posture: {}\r\n\
         Health: {}/{}  Stamina: {}/{}  Str: {}\r\n\
         Carried: {} kg in {} items\r\n\
         Action: {} ({:?})\r\n",
        tch.name,
        if tch.is_npc() { "MOB" } else { "PC" },
        tch.in_room.map_or(-1, |rid| world.room(rid).vnum),
        tch.posture.describe(),
        tch.health,
        tch.max_health,
        tch.stamina,
        tch.max_stamina,
        tch.strength,
        carried_weight(world, target),
        tch.carrying.len(),
        describe(&tch.action.kind, world),
        tch.action.state,
    );
    send_to_char(&mut game.descriptors, world.ch(chid), &out);
    true
}

/*
 * Registered both staff-only and exact-only; a privileged fumble at the
 * keyboard still should not bring the world down.
 */
pub fn do_shutdown(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    info!("(GC) Shutdown by {}.", world.ch(chid).name);
    send_to_char(&mut game.descriptors, world.ch(chid), "Shutting down.\r\n");
    game.shutdown = true;
    true
}
