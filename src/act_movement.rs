/* ************************************************************************
*   File: act_movement.rs                                Part of DuskMUD  *
*  Usage: movement commands, door handling, & sleep/rest/etc state        *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use crate::act_informative::look_at_room;
use crate::action::{Action, ActionKind};
use crate::config::DOOR_CLOSED_MSG;
use crate::db::World;
use crate::depot::DepotId;
use crate::game::{act, send_to_char, Game, TO_ROOM};
use crate::handler::{carried_weight, char_from_room, char_to_room, fname, isname};
use crate::interpreter::{TokenHandler, SCMD_CLOSE, SCMD_OPEN};
use crate::structs::{Direction, ExitFlags, Posture, RoomFlags};
use crate::util::{ability_modifier, fclamp_i32};

/*
 * A step costs stamina that grows with the log of how much is being
 * hauled, shrinks with strength, and halves when crawling; a big number
 * out of this math gets pinned instead of wrapping.
 */
pub fn move_stamina_cost(world: &World, chid: DepotId) -> i32 {
    let ch = world.ch(chid);
    let carried = carried_weight(world, chid);
    let base = 1.0 - ability_modifier(ch.strength) as f64
        + (ch.weight.max(1) as f64).log10()
        + (carried.max(1) as f64).log10();
    fclamp_i32(base * ch.posture.move_cost_factor(), 0, i32::MAX)
}

/*
 * Everything that has to hold before a step is taken.  It runs when the
 * player types the direction and again when the step matures, because
 * doors swing shut and fights start while you are mid-stride.  Each
 * refusal explains itself to the actor.
 */
pub fn can_move_to(game: &mut Game, world: &World, chid: DepotId, dir: Direction) -> bool {
    let ch = world.ch(chid);

    if ch.in_combat() {
        send_to_char(
            &mut game.descriptors,
            ch,
            "No way!  You're fighting for your life!\r\n",
        );
        return false;
    }
    if !ch.posture.allows_walking() {
        send_to_char(
            &mut game.descriptors,
            ch,
            "Maybe you should get on your feet first?\r\n",
        );
        return false;
    }
    let rid = match ch.in_room {
        Some(rid) => rid,
        None => return false,
    };
    let exit = match world.room(rid).exit(dir) {
        None => {
            send_to_char(
                &mut game.descriptors,
                ch,
                "Alas, you cannot go that way...\r\n",
            );
            return false;
        }
        Some(exit) => exit,
    };
    if exit.is_closed() {
        send_to_char(&mut game.descriptors, ch, DOOR_CLOSED_MSG);
        return false;
    }
    if world.room(exit.to_room).flags.contains(RoomFlags::NO_FLOOR)
        && !exit.flags.contains(ExitFlags::STAIRS)
    {
        send_to_char(
            &mut game.descriptors,
            ch,
            "There is nothing over there to stand on.\r\n",
        );
        return false;
    }
    if ch.is_npc()
        && (exit.flags.contains(ExitFlags::NO_MOB)
            || world.room(exit.to_room).flags.contains(RoomFlags::NO_MOB))
    {
        return false;
    }
    if ch.stamina < move_stamina_cost(world, chid) {
        send_to_char(&mut game.descriptors, ch, "You are too exhausted.\r\n");
        return false;
    }
    true
}

/*
 * Queue up one step.  The step itself lands when the cooldown runs out;
 * how long that is depends on how low to the ground you are.
 */
pub fn start_move(game: &mut Game, world: &mut World, chid: DepotId, dir: Direction) -> bool {
    if !can_move_to(game, world, chid, dir) {
        return false;
    }
    let ch = world.ch(chid);
    let rid = ch.in_room.unwrap();
    let dest = world.room(rid).exit(dir).unwrap().to_room;
    let ticks = ch.posture.move_ticks();
    world.ch_mut(chid).action = Action::new(ActionKind::Move { dest, dir }, ticks);
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("You start walking {}.\r\n", dir.name()),
    );
    true
}

/* The step has matured and been re-validated: make it so. */
pub fn perform_move_effect(game: &mut Game, world: &mut World, chid: DepotId, dir: Direction) {
    let cost = move_stamina_cost(world, chid);
    let ch = world.ch_mut(chid);
    ch.stamina -= cost;
    if ch.aimed_at.take().is_some() {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "Moving about has spoiled your aim.\r\n",
        );
    }

    let rid = world.ch(chid).in_room.unwrap();
    let dest = world.room(rid).exit(dir).unwrap().to_room;

    act(
        &mut game.descriptors,
        world,
        &format!("$n leaves {}.", dir.name()),
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
        &format!("$n arrives {}.", dir.from_phrase()),
        chid,
        None,
        None,
        TO_ROOM,
    );
    if world.ch(chid).desc.is_some() {
        look_at_room(game, world, chid);
    }
}

/*
 * Doors.  "open trapdoor", "open down", "open trapdoor down" all have
 * to find the same exit.
 */
fn find_door(
    game: &mut Game,
    world: &World,
    chid: DepotId,
    args: &TokenHandler,
    cmdname: &str,
) -> Option<Direction> {
    let ch = world.ch(chid);
    let rid = ch.in_room?;
    let type_ = &args[0];

    if let Some(dirtok) = args.get(1) {
        /* a direction was specified */
        let dir = match Direction::find(dirtok.content(), false) {
            Some(dir) => dir,
            None => {
                send_to_char(&mut game.descriptors, ch, "That's not a direction.\r\n");
                return None;
            }
        };
        return match world.room(rid).exit(dir) {
            Some(exit) if exit.keyword.is_empty() || isname(type_.content(), &exit.keyword) => {
                Some(dir)
            }
            Some(_) => {
                send_to_char(
                    &mut game.descriptors,
                    ch,
                    &format!("I see no {} there.\r\n", type_.content()),
                );
                None
            }
            None => {
                send_to_char(
                    &mut game.descriptors,
                    ch,
                    &format!("I really don't see how you can {} anything there.\r\n", cmdname),
                );
                None
            }
        };
    }

    /* the bare word may itself be a direction */
    if let Some(dir) = Direction::find(type_.content(), false) {
        return match world.room(rid).exit(dir) {
            Some(_) => Some(dir),
            None => {
                send_to_char(
                    &mut game.descriptors,
                    ch,
                    &format!("I really don't see how you can {} anything there.\r\n", cmdname),
                );
                None
            }
        };
    }

    /* otherwise hunt for a door by name */
    for dir in crate::structs::DIRECTIONS {
        if let Some(exit) = world.room(rid).exit(dir) {
            if !exit.keyword.is_empty() && isname(type_.content(), &exit.keyword) {
                return Some(dir);
            }
        }
    }
    send_to_char(
        &mut game.descriptors,
        ch,
        &format!("There doesn't seem to be {} here.\r\n", type_.content()),
    );
    None
}

fn open_both_sides(world: &mut World, rid: DepotId, dir: Direction, closed: bool) {
    let dest = {
        let exit = world.room_mut(rid).exit_mut(dir).unwrap();
        exit.flags.set(ExitFlags::CLOSED, closed);
        exit.to_room
    };
    /* the matching door on the far side swings with this one */
    if let Some(back) = world.room_mut(dest).exit_mut(dir.reverse()) {
        if back.to_room == rid {
            back.flags.set(ExitFlags::CLOSED, closed);
        }
    }
}

pub fn do_gen_door(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    subcmd: i32,
) -> bool {
    let cmdname = if subcmd == SCMD_OPEN { "open" } else { "close" };
    if args.is_empty() || args[0].is_empty() {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            &format!("{} what?\r\n", capitalize(cmdname)),
        );
        return false;
    }
    let dir = match find_door(game, world, chid, args, cmdname) {
        Some(dir) => dir,
        None => return false,
    };
    let rid = world.ch(chid).in_room.unwrap();
    let (has_door, closed, locked, keyword) = {
        let exit = world.room(rid).exit(dir).unwrap();
        (
            exit.flags.contains(ExitFlags::DOOR),
            exit.is_closed(),
            exit.is_locked(),
            exit.keyword.clone(),
        )
    };
    let doorname = if keyword.is_empty() {
        "door".to_string()
    } else {
        fname(&keyword).to_string()
    };

    if !has_door {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "You can't do that, I'm afraid.\r\n",
        );
        return false;
    }
    if subcmd == SCMD_OPEN {
        if !closed {
            send_to_char(&mut game.descriptors, world.ch(chid), "But it's already open!\r\n");
            return false;
        }
        if locked {
            send_to_char(&mut game.descriptors, world.ch(chid), "It seems to be locked.\r\n");
            return false;
        }
        open_both_sides(world, rid, dir, false);
    } else {
        if closed {
            send_to_char(&mut game.descriptors, world.ch(chid), "But it's already closed!\r\n");
            return false;
        }
        open_both_sides(world, rid, dir, true);
    }
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("You {} the {}.\r\n", cmdname, doorname),
    );
    act(
        &mut game.descriptors,
        world,
        &format!("$n {}s the {}.", cmdname, doorname),
        chid,
        None,
        None,
        TO_ROOM,
    );
    true
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/* ------------------------------------------------------------------ */
/* posture changes                                                     */
/* ------------------------------------------------------------------ */

fn change_posture(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    to: Posture,
    own_msg: &str,
    room_msg: &str,
) -> bool {
    world.ch_mut(chid).posture = to;
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("{}\r\n", own_msg),
    );
    if !room_msg.is_empty() {
        act(&mut game.descriptors, world, room_msg, chid, None, None, TO_ROOM);
    }
    true
}

pub fn do_stand(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    match world.ch(chid).posture {
        Posture::Standing => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You are already standing.\r\n");
            false
        }
        Posture::Sleeping => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You have to wake up first!\r\n");
            false
        }
        _ => change_posture(
            game,
            world,
            chid,
            Posture::Standing,
            "You clamber to your feet.",
            "$n clambers up.",
        ),
    }
}

pub fn do_crouch(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    match world.ch(chid).posture {
        Posture::Crouching => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You are already crouching.\r\n");
            false
        }
        Posture::Sleeping => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You have to wake up first!\r\n");
            false
        }
        _ => change_posture(
            game,
            world,
            chid,
            Posture::Crouching,
            "You drop to a crouch.",
            "$n drops to a crouch.",
        ),
    }
}

pub fn do_prone(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    match world.ch(chid).posture {
        Posture::Prone => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You are already flat on the ground.\r\n");
            false
        }
        Posture::Sleeping => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You have to wake up first!\r\n");
            false
        }
        _ => change_posture(
            game,
            world,
            chid,
            Posture::Prone,
            "You flatten yourself against the ground.",
            "$n flattens out on the ground.",
        ),
    }
}

pub fn do_sit(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    match world.ch(chid).posture {
        Posture::Sitting => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You're sitting already.\r\n");
            false
        }
        Posture::Sleeping => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You have to wake up first!\r\n");
            false
        }
        _ => change_posture(
            game,
            world,
            chid,
            Posture::Sitting,
            "You sit down.",
            "$n sits down.",
        ),
    }
}

pub fn do_rest(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    match world.ch(chid).posture {
        Posture::Resting => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You are already resting.\r\n");
            false
        }
        Posture::Sleeping => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You have to wake up first!\r\n");
            false
        }
        _ => change_posture(
            game,
            world,
            chid,
            Posture::Resting,
            "You sit down and rest your tired bones.",
            "$n sits down and rests.",
        ),
    }
}

pub fn do_sleep(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    match world.ch(chid).posture {
        Posture::Sleeping => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You are already sound asleep.\r\n");
            false
        }
        _ => change_posture(
            game,
            world,
            chid,
            Posture::Sleeping,
            "You go to sleep.",
            "$n lies down and falls asleep.",
        ),
    }
}

pub fn do_wake(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    match world.ch(chid).posture {
        Posture::Sleeping | Posture::Resting => change_posture(
            game,
            world,
            chid,
            Posture::Sitting,
            "You awaken, and sit up.",
            "$n awakens.",
        ),
        _ => {
            send_to_char(&mut game.descriptors, world.ch(chid), "You are already awake...\r\n");
            false
        }
    }
}
