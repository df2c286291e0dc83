/* ************************************************************************
*   File: fight.rs                                       Part of DuskMUD  *
*  Usage: combat rounds, damage, death and corpses                        *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use log::info;

use crate::action::{Action, ActionKind, ActionState};
use crate::config::{AIM_BONUS, COMBAT_ROUND_TICKS};
use crate::db::World;
use crate::depot::DepotId;
use crate::game::{act, send_to_char, Game, TO_CHAR, TO_NOTVICT, TO_ROOM, TO_VICT};
use crate::handler::{char_to_room, extract_char, obj_to_room};
use crate::structs::{ItemData, ItemKind, ItemLocation, Posture};
use crate::util::{ability_modifier, dice};

/*
 * Put the attacker on the offensive.  The victim is dragged into the
 * fight too unless they are already busy with something; whatever they
 * were doing otherwise is their problem to stop.
 */
pub fn start_fight(game: &mut Game, world: &mut World, chid: DepotId, victim: DepotId) {
    world.ch_mut(chid).action = Action::new(ActionKind::Combat { target: victim }, 0);
    if world.ch(victim).action.is_idle() {
        world.ch_mut(victim).action = Action::new(
            ActionKind::Combat { target: chid },
            COMBAT_ROUND_TICKS,
        );
        send_to_char(
            &mut game.descriptors,
            world.ch(victim),
            &format!("{} attacks you!\r\n", capitalize_first(world.ch(chid).pers())),
        );
    }
}

/*
 * One swing.  Returns the state the combat action should carry on in:
 * Running with a fresh deadline while both parties are upright, and a
 * terminal state once the opponent is gone one way or another.
 */
pub fn combat_round(game: &mut Game, world: &mut World, chid: DepotId, target: DepotId) -> ActionState {
    if !world.chars.contains(target)
        || world.ch(target).in_room != world.ch(chid).in_room
        || world.ch(target).posture == Posture::Dead
    {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "Your opponent is gone; the fight is over.\r\n",
        );
        return ActionState::Finished;
    }

    hit(game, world, chid, target);

    if !world.chars.contains(target) || world.ch(target).posture == Posture::Dead {
        return ActionState::Finished;
    }

    /* re-arm for the next round */
    let next = Action::new(ActionKind::Combat { target }, COMBAT_ROUND_TICKS);
    let ch = world.ch_mut(chid);
    ch.action.deadline = next.deadline;
    ch.action.state = ActionState::Running;
    ActionState::Running
}

fn wielded_weapon(world: &World, chid: DepotId) -> Option<&ItemData> {
    world
        .ch(chid)
        .carrying
        .iter()
        .map(|&oid| world.obj(oid))
        .find(|o| matches!(o.kind, ItemKind::Weapon { .. }))
}

pub fn hit(game: &mut Game, world: &mut World, chid: DepotId, victim: DepotId) {
    let str_mod = ability_modifier(world.ch(chid).strength);
    let mut attack = dice(1, 20) + str_mod;
    if world.ch(chid).aimed_at == Some(victim) {
        attack += AIM_BONUS;
        world.ch_mut(chid).aimed_at = None;
    }

    if attack < 10 {
        act(
            &mut game.descriptors,
            world,
            "$n swings at $N and misses.",
            chid,
            None,
            Some(victim),
            TO_NOTVICT,
        );
        act(
            &mut game.descriptors,
            world,
            "You swing at $N and miss.",
            chid,
            None,
            Some(victim),
            TO_CHAR,
        );
        act(
            &mut game.descriptors,
            world,
            "$n swings at you and misses.",
            chid,
            None,
            Some(victim),
            TO_VICT,
        );
        return;
    }

    let dmg = match wielded_weapon(world, chid) {
        Some(weapon) => match weapon.kind {
            ItemKind::Weapon { hit_num, hit_size } => dice(hit_num, hit_size),
            _ => dice(1, 4),
        },
        None => dice(1, 4),
    } + (str_mod / 2).max(0);

    act(
        &mut game.descriptors,
        world,
        "$n strikes $N, hard.",
        chid,
        None,
        Some(victim),
        TO_NOTVICT,
    );
    act(
        &mut game.descriptors,
        world,
        "You strike $N, hard.",
        chid,
        None,
        Some(victim),
        TO_CHAR,
    );
    act(
        &mut game.descriptors,
        world,
        "$n strikes you, hard.",
        chid,
        None,
        Some(victim),
        TO_VICT,
    );
    damage(game, world, victim, dmg.max(1));
}

pub fn damage(game: &mut Game, world: &mut World, victim: DepotId, dmg: i32) {
    let ch = world.ch_mut(victim);
    ch.health -= dmg;
    if ch.health <= 0 {
        die(game, world, victim);
    }
}

pub fn die(game: &mut Game, world: &mut World, chid: DepotId) {
    act(
        &mut game.descriptors,
        world,
        "$n is dead!  R.I.P.",
        chid,
        None,
        None,
        TO_ROOM,
    );
    send_to_char(&mut game.descriptors, world.ch(chid), "You are dead!  Sorry...\r\n");
    info!("{} killed in room {:?}.", world.ch(chid).pers(), world.ch(chid).in_room);

    make_corpse(world, chid);

    if world.ch(chid).is_npc() {
        extract_char(world, chid);
        return;
    }

    /* players get another dawn: back to the square, shaken and sore */
    let start = world.start_room.expect("no start room");
    let ch = world.ch_mut(chid);
    ch.health = (ch.max_health / 2).max(1);
    ch.stamina = ch.max_stamina / 2;
    ch.posture = Posture::Standing;
    ch.action = Action::wait();
    char_to_room(world, chid, start);
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        "\r\nYou come to your senses on the cold flagstones of the square.\r\n",
    );
    act(
        &mut game.descriptors,
        world,
        "$n staggers in out of nothing, pale as ash.",
        chid,
        None,
        None,
        TO_ROOM,
    );
}

/*
 * A fresh corpse keeps the dead creature's part list; that list is what
 * butchering consumes.  Whatever was carried spills onto the floor.
 */
pub fn make_corpse(world: &mut World, chid: DepotId) -> Option<DepotId> {
    let rid = world.ch(chid).in_room?;
    let carried: Vec<DepotId> = world.ch(chid).carrying.clone();
    for oid in carried {
        obj_to_room(world, oid, rid);
    }
    let ch = world.ch(chid);
    let pers = ch.pers().to_string();
    let corpse = ItemData {
        vnum: -1,
        name: format!("corpse {}", ch.name),
        short_desc: format!("the corpse of {}", pers),
        ground_desc: format!("The corpse of {} is lying here.", pers),
        weight: ch.weight,
        kind: ItemKind::Corpse {
            of: pers,
            parts: ch.parts.clone(),
        },
        location: ItemLocation::Nowhere,
        ..Default::default()
    };
    let oid = world.objs.push(corpse);
    obj_to_room(world, oid, rid);
    Some(oid)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
