/* ************************************************************************
*   File: act_other.rs                                   Part of DuskMUD  *
*  Usage: miscellaneous player-level commands                             *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use crate::action::{stop_message, Action};
use crate::db::World;
use crate::depot::DepotId;
use crate::game::{send_to_char, ConState, Game};
use crate::interpreter::TokenHandler;

/*
 * Deliberate cancellation.  Fights are exempt here exactly as they are
 * from the implicit interrupt: flee is the only door out of a fight.
 */
pub fn do_stop(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let ch = world.ch(chid);
    if ch.in_combat() {
        send_to_char(
            &mut game.descriptors,
            ch,
            "You are fighting for your life!  Flee if you want out.\r\n",
        );
        return false;
    }
    if ch.action.is_idle() {
        send_to_char(
            &mut game.descriptors,
            ch,
            "But you aren't doing anything right now.\r\n",
        );
        return false;
    }
    let msg = stop_message(&ch.action.kind, world);
    world.ch_mut(chid).action = Action::wait();
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("{}\r\n", msg),
    );
    true
}

pub fn do_wait(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        "You wait, and the dusk waits with you.\r\n",
    );
    true
}

/*
 * Registered exact-only: "qui" will not log anybody out by accident.
 */
pub fn do_quit(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    _args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let ch = world.ch(chid);
    if ch.is_npc() {
        return false;
    }
    let d_id = match ch.desc {
        Some(d_id) => d_id,
        None => return false,
    };
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        "Goodbye, friend.. come back soon!\r\n",
    );
    game.desc_mut(d_id).state = ConState::ConClose;
    true
}
