/* ************************************************************************
*   File: act_informative.rs                             Part of DuskMUD  *
*  Usage: player-level commands of an informative nature                  *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use chrono::Local;

use crate::action::describe;
use crate::db::World;
use crate::depot::DepotId;
use crate::game::{send_to_char, ConState, Game};
use crate::handler::{carried_weight, get_char_in_room, get_obj_in_list};
use crate::interpreter::TokenHandler;
use crate::structs::{ItemKind, Posture, DIRECTIONS};
use crate::util::ctime;

pub fn look_at_room(game: &mut Game, world: &World, chid: DepotId) {
    let ch = world.ch(chid);
    let rid = match ch.in_room {
        Some(rid) => rid,
        None => return,
    };
    let room = world.room(rid);

    let mut out = format!("{}\r\n{}\r\n", room.name, room.description);

    let exits: Vec<&str> = DIRECTIONS
        .iter()
        .filter(|d| room.exit(**d).map_or(false, |e| !e.is_closed()))
        .map(|d| d.name())
        .collect();
    out.push_str(&format!(
        "[ Exits: {} ]\r\n",
        if exits.is_empty() {
            "none".to_string()
        } else {
            exits.join(" ")
        }
    ));

    for &oid in &room.contents {
        out.push_str(&format!("{}\r\n", world.obj(oid).ground_desc));
    }
    for &other in &room.people {
        if other == chid {
            continue;
        }
        let och = world.ch(other);
        match &och.long_desc {
            Some(ld) if och.posture == Posture::Standing => {
                out.push_str(&format!("{}\r\n", ld));
            }
            _ => out.push_str(&format!(
                "{} is {} here.\r\n",
                capitalize(och.pers()),
                och.posture.describe()
            )),
        }
    }
    send_to_char(&mut game.descriptors, ch, &out);
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn do_look(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    if args.is_empty() || args[0].is_empty() {
        look_at_room(game, world, chid);
        return true;
    }
    let rid = match world.ch(chid).in_room {
        Some(rid) => rid,
        None => return false,
    };
    let token = args[0].clone();

    if let Some(other) = get_char_in_room(world, rid, &token) {
        let och = world.ch(other);
        let mut out = match &och.long_desc {
            Some(ld) => format!("{}\r\n", ld),
            None => format!("You see nothing special about {}.\r\n", och.pers()),
        };
        out.push_str(&format!(
            "{} is {}.\r\n",
            capitalize(och.pers()),
            och.posture.describe()
        ));
        send_to_char(&mut game.descriptors, world.ch(chid), &out);
        return true;
    }

    let found = get_obj_in_list(world, &token, &world.room(rid).contents)
        .or_else(|| get_obj_in_list(world, &token, &world.ch(chid).carrying));
    if let Some(oid) = found {
        let obj = world.obj(oid);
        let mut out = format!("You look at {}.\r\n", obj.short_desc);
        if let ItemKind::Corpse { of, parts } = &obj.kind {
            if parts.is_empty() {
                out.push_str(&format!(
                    "What is left of {} has been picked clean.\r\n",
                    of
                ));
            } else {
                let names: Vec<&str> = parts.iter().map(|p| p.name).collect();
                out.push_str(&format!("Still usable: {}.\r\n", names.join(", ")));
            }
        }
        send_to_char(&mut game.descriptors, world.ch(chid), &out);
        return true;
    }

    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        "You do not see that here.\r\n",
    );
    false
}

pub fn do_exits(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let ch = world.ch(chid);
    let rid = match ch.in_room {
        Some(rid) => rid,
        None => return false,
    };
    let mut out = String::from("Obvious exits:\r\n");
    let mut any = false;
    for dir in DIRECTIONS {
        if let Some(exit) = world.room(rid).exit(dir) {
            any = true;
            if exit.is_closed() {
                out.push_str(&format!("{:5} - (closed)\r\n", dir.name()));
            } else {
                out.push_str(&format!(
                    "{:5} - {}\r\n",
                    dir.name(),
                    world.room(exit.to_room).name
                ));
            }
        }
    }
    if !any {
        out.push_str(" None.\r\n");
    }
    send_to_char(&mut game.descriptors, ch, &out);
    true
}

pub fn do_commands(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let staff = world.ch(chid).is_staff();
    let names: Vec<&str> = game
        .registry
        .iter()
        .filter(|c| staff || !c.staff_only)
        .map(|c| c.command)
        .collect();
    let mut out = String::from("Commands known to you:\r\n");
    for chunk in names.chunks(5) {
        for name in chunk {
            out.push_str(&format!("{:12}", name));
        }
        out.push_str("\r\n");
    }
    send_to_char(&mut game.descriptors, world.ch(chid), &out);
    true
}

pub fn do_help(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    if args.is_empty() || args[0].is_empty() {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "Type 'commands' for a list of commands, or 'help <command>' for details.\r\n",
        );
        return true;
    }
    let wanted = args[0].content().to_string();
    let staff = world.ch(chid).is_staff();
    let found = game
        .registry
        .iter()
        .filter(|c| staff || !c.staff_only)
        .find(|c| c.command.starts_with(wanted.as_str()))
        .map(|c| (c.command, c.help, c.usage));
    match found {
        Some((command, help, usage)) => {
            send_to_char(
                &mut game.descriptors,
                world.ch(chid),
                &format!("{}\r\n  {}\r\n  Usage: {}\r\n", command, help, usage),
            );
            true
        }
        None => {
            send_to_char(
                &mut game.descriptors,
                world.ch(chid),
                "There is no help on that word.\r\n",
            );
            false
        }
    }
}

pub fn do_who(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let mut out = String::from("Souls abroad in the dusk:\r\n");
    let mut count = 0;
    for d_id in game.descriptors.ids() {
        let desc = game.desc(d_id);
        if desc.state != ConState::ConPlaying {
            continue;
        }
        if let Some(other) = desc.character {
            if world.chars.contains(other) {
                count += 1;
                let och = world.ch(other);
                out.push_str(&format!(
                    " {}{}\r\n",
                    och.name,
                    if och.is_staff() { " (staff)" } else { "" }
                ));
            }
        }
    }
    out.push_str(&format!("\r\n{} visible.\r\n", count));
    send_to_char(&mut game.descriptors, world.ch(chid), &out);
    true
}

pub fn do_score(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let ch = world.ch(chid);
    let out = format!(
        "You are {}.\r\n\
         Health: {}/{}  Stamina: {}/{}\r\n\
         You are {} and currently {}.\r\n\
         You carry {} kg (limit {} kg).\r\n",
        ch.name,
        ch.health,
        ch.max_health,
        ch.stamina,
        ch.max_stamina,
        ch.posture.describe(),
        describe(&ch.action.kind, world),
        carried_weight(world, chid),
        ch.carry_limit(),
    );
    send_to_char(&mut game.descriptors, world.ch(chid), &out);
    true
}

pub fn do_time(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let out = format!(
        "Server time: {}\r\nUp since:    {}\r\n",
        ctime(Local::now()),
        ctime(game.boot_time)
    );
    send_to_char(&mut game.descriptors, world.ch(chid), &out);
    true
}
