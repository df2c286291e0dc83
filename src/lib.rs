/* ************************************************************************
*   File: lib.rs                                         Part of DuskMUD  *
*  Usage: library root; module list and common re-exports                 *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

pub mod act_comm;
pub mod act_craft;
pub mod act_informative;
pub mod act_item;
pub mod act_movement;
pub mod act_offensive;
pub mod act_other;
pub mod act_wizard;
pub mod action;
pub mod config;
pub mod db;
pub mod depot;
pub mod fight;
pub mod game;
pub mod handler;
pub mod interpreter;
pub mod limits;
pub mod mobact;
pub mod structs;
pub mod util;

pub use crate::db::World;
pub use crate::depot::{Depot, DepotId, HasId};
pub use crate::game::{act, send_to_char, send_to_room, Game};
pub use crate::game::{TO_CHAR, TO_NOTVICT, TO_ROOM, TO_VICT};
pub use crate::interpreter::{command_interpreter, Token, TokenHandler};
