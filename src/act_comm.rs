/* ************************************************************************
*   File: act_comm.rs                                    Part of DuskMUD  *
*  Usage: player-level communication commands                             *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use crate::db::World;
use crate::depot::DepotId;
use crate::game::{act, send_to_char, ConState, Game, TO_ROOM};
use crate::interpreter::TokenHandler;

/*
 * Free-form text commands lean on substr() so the player's spacing and
 * capitalization survive the trip.
 */
pub fn do_say(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let text = args.substr(0).trim().to_string();
    if text.is_empty() || args.is_empty() {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "Yes, but WHAT do you want to say?\r\n",
        );
        return false;
    }
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("You say, '{}'\r\n", text),
    );
    act(
        &mut game.descriptors,
        world,
        &format!("$n says, '{}'", text),
        chid,
        None,
        None,
        TO_ROOM,
    );
    true
}

pub fn do_shout(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let text = args.substr(0).trim().to_string();
    if text.is_empty() || args.is_empty() {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "Yes, but WHAT do you want to shout?\r\n",
        );
        return false;
    }
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("You shout, '{}'\r\n", text),
    );
    let name = world.ch(chid).pers().to_string();
    let own_desc = world.ch(chid).desc;
    let msg = format!("{} shouts, '{}'\r\n", name, text);
    for d_id in game.descriptors.ids() {
        if Some(d_id) != own_desc && game.desc(d_id).state == ConState::ConPlaying {
            game.desc_mut(d_id).output.extend_from_slice(msg.as_bytes());
        }
    }
    true
}

pub fn do_emote(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let text = args.substr(0).trim().to_string();
    if text.is_empty() || args.is_empty() {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "Yes.. but what?\r\n",
        );
        return false;
    }
    let msg = format!("$n {}", text);
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("{} {}\r\n", world.ch(chid).pers(), text),
    );
    act(&mut game.descriptors, world, &msg, chid, None, None, TO_ROOM);
    true
}
