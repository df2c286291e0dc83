/* ************************************************************************
*   File: action.rs                                      Part of DuskMUD  *
*  Usage: time-delayed activities and the per-tick poll driver            *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use std::time::Instant;

use crate::act_craft::{
    build_check, build_effect, butcher_check, butcher_effect, craft_check, craft_effect,
    profession_of, BUILD_PLANS, RECIPES,
};
use crate::act_movement::{can_move_to, perform_move_effect};
use crate::config::ACTION_TICK;
use crate::db::World;
use crate::depot::DepotId;
use crate::fight;
use crate::game::{send_to_char, Game};
use crate::structs::Direction;

/*
 * Anything a character does that takes time is one of these.  The
 * character always holds exactly one; Wait is the "nothing is
 * happening" value and is never polled to completion.
 */
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionKind {
    Wait,
    Move { dest: DepotId, dir: Direction },
    Combat { target: DepotId },
    Dismember { corpse: DepotId },
    Craft { recipe: usize },
    Build { plan: usize },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionState {
    Pending,
    Running,
    Finished,
    Error,
}

/*
 * The cooldown is an absolute deadline stamped at construction, so a
 * late pulse never stretches it.  The effect fires on the first poll at
 * or past the deadline, exactly once; afterwards the state is terminal
 * and the update loop swaps the action back to Wait.
 */
#[derive(Clone, Copy, Debug)]
pub struct Action {
    pub kind: ActionKind,
    pub state: ActionState,
    pub deadline: Instant,
}

impl Action {
    pub fn wait() -> Action {
        Action {
            kind: ActionKind::Wait,
            state: ActionState::Running,
            deadline: Instant::now(),
        }
    }

    pub fn new(kind: ActionKind, ticks: u32) -> Action {
        Action {
            kind,
            state: ActionState::Pending,
            deadline: Instant::now() + ACTION_TICK * ticks,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.kind == ActionKind::Wait
    }

    pub fn in_combat(&self) -> bool {
        matches!(self.kind, ActionKind::Combat { .. })
    }

    pub fn ready(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/* what 'score' and 'stat' show for the current activity */
pub fn describe(kind: &ActionKind, world: &World) -> String {
    match kind {
        ActionKind::Wait => "standing around".to_string(),
        ActionKind::Move { dir, .. } => format!("walking {}", dir.name()),
        ActionKind::Combat { target } => {
            if world.chars.contains(*target) {
                format!("fighting {}", world.ch(*target).pers())
            } else {
                "fighting".to_string()
            }
        }
        ActionKind::Dismember { .. } => "butchering a corpse".to_string(),
        ActionKind::Craft { recipe } => match profession_of(&RECIPES[*recipe]) {
            Some(p) => format!("{} {}", p.gerund, RECIPES[*recipe].name),
            None => "crafting".to_string(),
        },
        ActionKind::Build { plan } => format!("building {}", BUILD_PLANS[*plan].name),
    }
}

/*
 * The message handed to the player when an activity is cut short.
 * Cancellation never runs the validity check or the effect.
 */
pub fn stop_message(kind: &ActionKind, world: &World) -> String {
    match kind {
        ActionKind::Wait => String::new(),
        ActionKind::Move { dir, .. } => format!("You stop walking {}.", dir.name()),
        ActionKind::Combat { target } => {
            if world.chars.contains(*target) {
                format!("You break off your fight with {}.", world.ch(*target).pers())
            } else {
                "You break off the fight.".to_string()
            }
        }
        ActionKind::Dismember { .. } => "You stop butchering the corpse.".to_string(),
        ActionKind::Craft { recipe } => match profession_of(&RECIPES[*recipe]) {
            Some(p) => format!("You stop {}.", p.gerund),
            None => "You stop working.".to_string(),
        },
        ActionKind::Build { plan } => format!("You stop building {}.", BUILD_PLANS[*plan].name),
    }
}

/*
 * Issuing any command implicitly abandons whatever was underway.
 * Fights are exempt (flee is the way out of those) and Wait has
 * nothing to abandon.
 */
pub fn interrupt_action(game: &mut Game, world: &mut World, chid: DepotId) {
    let kind = world.ch(chid).action.kind;
    match kind {
        ActionKind::Wait | ActionKind::Combat { .. } => return,
        _ => (),
    }
    let msg = stop_message(&kind, world);
    world.ch_mut(chid).action = Action::wait();
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("{}\r\n", msg),
    );
}

/*
 * One poll.  Before the deadline this is a no-op returning Running.  At
 * or past it, preconditions are re-checked (the world may have shifted
 * since the action was queued); a failure has already told the player
 * why and concludes in Error.  Otherwise the effect fires exactly once.
 * Combat is the multi-poll case: each concluded round re-arms the
 * deadline and stays Running.
 */
pub fn poll_action(game: &mut Game, world: &mut World, chid: DepotId) -> ActionState {
    let action = world.ch(chid).action;
    match action.state {
        ActionState::Finished | ActionState::Error => return action.state,
        _ => (),
    }
    if action.is_idle() {
        return ActionState::Running;
    }
    if !action.ready() {
        return ActionState::Running;
    }

    let state = match action.kind {
        ActionKind::Wait => ActionState::Running,
        ActionKind::Move { dir, .. } => {
            if can_move_to(game, world, chid, dir) {
                perform_move_effect(game, world, chid, dir);
                ActionState::Finished
            } else {
                ActionState::Error
            }
        }
        ActionKind::Combat { target } => fight::combat_round(game, world, chid, target),
        ActionKind::Dismember { corpse } => {
            if butcher_check(game, world, chid, corpse) {
                butcher_effect(game, world, chid, corpse);
                ActionState::Finished
            } else {
                ActionState::Error
            }
        }
        ActionKind::Craft { recipe } => {
            if craft_check(game, world, chid, recipe) {
                craft_effect(game, world, chid, recipe);
                ActionState::Finished
            } else {
                ActionState::Error
            }
        }
        ActionKind::Build { plan } => {
            if build_check(game, world, chid, plan) {
                build_effect(game, world, chid, plan);
                ActionState::Finished
            } else {
                ActionState::Error
            }
        }
    };

    /* the effect may have removed the actor (death, quit) */
    if world.chars.contains(chid) {
        world.ch_mut(chid).action.state = state;
    }
    state
}

/*
 * Called once per tick by the heartbeat.  Every actor with something
 * underway gets one poll; concluded actions are retired to Wait.
 */
pub fn update_actions(game: &mut Game, world: &mut World) {
    for chid in world.chars.ids() {
        if !world.chars.contains(chid) {
            continue; /* removed earlier this tick */
        }
        if world.ch(chid).action.is_idle() {
            continue;
        }
        match poll_action(game, world, chid) {
            ActionState::Finished | ActionState::Error => {
                if world.chars.contains(chid) {
                    world.ch_mut(chid).action = Action::wait();
                }
            }
            ActionState::Pending | ActionState::Running => (),
        }
    }
}
