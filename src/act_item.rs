/* ************************************************************************
*   File: act_item.rs                                    Part of DuskMUD  *
*  Usage: object handling routines -- get/drop/give                       *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use crate::config::NOPERSON;
use crate::db::World;
use crate::depot::DepotId;
use crate::game::{act, send_to_char, Game, TO_CHAR, TO_NOTVICT, TO_ROOM, TO_VICT};
use crate::handler::{can_carry, get_char_in_room, get_obj_in_list, obj_to_char, obj_to_room};
use crate::interpreter::TokenHandler;
use crate::util::an;

fn perform_get(game: &mut Game, world: &mut World, chid: DepotId, oid: DepotId) -> bool {
    if !world.obj(oid).can_take() {
        act(
            &mut game.descriptors,
            world,
            "$p: you can't take that!",
            chid,
            Some(oid),
            None,
            TO_CHAR,
        );
        return false;
    }
    if !can_carry(world, chid, oid) {
        act(
            &mut game.descriptors,
            world,
            "$p: you can't carry that much weight.",
            chid,
            Some(oid),
            None,
            TO_CHAR,
        );
        return false;
    }
    obj_to_char(world, oid, chid);
    act(&mut game.descriptors, world, "You get $p.", chid, Some(oid), None, TO_CHAR);
    act(&mut game.descriptors, world, "$n gets $p.", chid, Some(oid), None, TO_ROOM);
    true
}

/*
 * "get apple", "get 5*apple", "get apple.2" all land here; the token
 * carries the count and the ordinal.
 */
pub fn do_get(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    if args.is_empty() || args[0].is_empty() {
        send_to_char(&mut game.descriptors, world.ch(chid), "Get what?\r\n");
        return false;
    }
    let rid = match world.ch(chid).in_room {
        Some(rid) => rid,
        None => return false,
    };
    let token = args[0].clone();
    let mut taken = 0;
    for _ in 0..token.multiplier() {
        let oid = match get_obj_in_list(world, &token, &world.room(rid).contents) {
            Some(oid) => oid,
            None => break,
        };
        if !perform_get(game, world, chid, oid) {
            break;
        }
        taken += 1;
    }
    if taken == 0 {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            &format!(
                "You don't see {} {} here.\r\n",
                an(token.content()),
                token.content()
            ),
        );
        return false;
    }
    true
}

pub fn do_drop(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    if args.is_empty() || args[0].is_empty() {
        send_to_char(&mut game.descriptors, world.ch(chid), "Drop what?\r\n");
        return false;
    }
    let rid = match world.ch(chid).in_room {
        Some(rid) => rid,
        None => return false,
    };
    let token = args[0].clone();
    let mut dropped = 0;
    for _ in 0..token.multiplier() {
        let oid = match get_obj_in_list(world, &token, &world.ch(chid).carrying) {
            Some(oid) => oid,
            None => break,
        };
        obj_to_room(world, oid, rid);
        act(&mut game.descriptors, world, "You drop $p.", chid, Some(oid), None, TO_CHAR);
        act(&mut game.descriptors, world, "$n drops $p.", chid, Some(oid), None, TO_ROOM);
        dropped += 1;
    }
    if dropped == 0 {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            &format!(
                "You don't seem to have {} {}.\r\n",
                an(token.content()),
                token.content()
            ),
        );
        return false;
    }
    true
}

pub fn do_give(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    if args.len() < 2 {
        send_to_char(&mut game.descriptors, world.ch(chid), "Give what to whom?\r\n");
        return false;
    }
    let rid = match world.ch(chid).in_room {
        Some(rid) => rid,
        None => return false,
    };
    let what = args[0].clone();
    let whom = args[1].clone();

    let victim = match get_char_in_room(world, rid, &whom) {
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
            "What's the point of that?\r\n",
        );
        return false;
    }

    let mut given = 0;
    for _ in 0..what.multiplier() {
        let oid = match get_obj_in_list(world, &what, &world.ch(chid).carrying) {
            Some(oid) => oid,
            None => break,
        };
        if !can_carry(world, victim, oid) {
            act(
                &mut game.descriptors,
                world,
                "$N can't carry that much weight.",
                chid,
                Some(oid),
                Some(victim),
                TO_CHAR,
            );
            break;
        }
        obj_to_char(world, oid, victim);
        act(&mut game.descriptors, world, "You give $p to $N.", chid, Some(oid), Some(victim), TO_CHAR);
        act(&mut game.descriptors, world, "$n gives you $p.", chid, Some(oid), Some(victim), TO_VICT);
        act(&mut game.descriptors, world, "$n gives $p to $N.", chid, Some(oid), Some(victim), TO_NOTVICT);
        given += 1;
    }
    if given == 0 {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            &format!(
                "You don't seem to have {} {}.\r\n",
                an(what.content()),
                what.content()
            ),
        );
        return false;
    }
    true
}

pub fn do_inventory(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let ch = world.ch(chid);
    let mut out = String::from("You are carrying:\r\n");
    if ch.carrying.is_empty() {
        out.push_str(" Nothing.\r\n");
    } else {
        for &oid in &ch.carrying {
            out.push_str(&format!(" {}\r\n", world.obj(oid).short_desc));
        }
    }
    send_to_char(&mut game.descriptors, ch, &out);
    true
}
