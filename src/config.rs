/* ************************************************************************
*   File: config.rs                                      Part of DuskMUD  *
*  Usage: configuration of various aspects of DuskMUD operation           *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use std::time::Duration;

/* GAME PLAY OPTIONS */

/* default port the server listens on when none is given */
pub const DFLT_PORT: u16 = 4000;

/* maximum simultaneous connections */
pub const MAX_PLAYING: usize = 300;

/* max length per *line* of input */
pub const MAX_INPUT_LENGTH: usize = 256;

/*
 * The main loop runs at ten pulses per second; gameplay time is counted
 * in ticks of one second.  Action cooldowns are absolute deadlines
 * (creation time plus a number of ticks), so a pulse that arrives late
 * does not stretch them.
 */
pub const OPT_USEC: u32 = 100_000;
pub const PASSES_PER_SEC: u32 = 1_000_000 / OPT_USEC;
pub const ACTION_TICK: Duration = Duration::from_secs(1);

/* heartbeat cadences, in pulses */
pub const PULSE_ACTION: u128 = PASSES_PER_SEC as u128; /* 1 second */
pub const PULSE_MOBILE: u128 = 4 * PASSES_PER_SEC as u128;
pub const PULSE_POINTS: u128 = 30 * PASSES_PER_SEC as u128;

/* butchering a corpse always takes this long, whatever your posture */
pub const BUTCHER_TICKS: u32 = 3;

/* seconds between swings once a fight has started */
pub const COMBAT_ROUND_TICKS: u32 = 2;

/* kilograms a character can carry per point of strength */
pub const CARRY_KG_PER_STR: i32 = 5;

/* bonus to the next attack roll after a successful 'aim' */
pub const AIM_BONUS: i32 = 4;

/* stamina regained per slow pulse, before the posture bonus */
pub const STAMINA_REGEN: i32 = 3;
pub const HEALTH_REGEN: i32 = 1;

/* "okay" etc. */
pub const OK: &str = "Okay.\r\n";
pub const HUH: &str = "Huh?!?\r\n";
pub const NOPERSON: &str = "No-one by that name here.\r\n";
pub const IN_COMBAT_MSG: &str = "You cannot do that in combat.\r\n";
pub const TYPE_IT_ALL_MSG: &str = "You will need to type it completely to do that.\r\n";
pub const DOOR_CLOSED_MSG: &str = "Maybe you have to open that door first.\r\n";
pub const CORPSE_EMPTY_MSG: &str = "does not contain anything useful.";

pub const WELC_MESSG: &str = "\r\nWelcome to the lands of Dusk.  May your visit here be dark.\r\n\r\n";

pub const GREETINGS: &str = "\r
                             Dusk falls.\r
\r
By what name do you wish to be known? ";
