//! The action state machine: cooldown gating, single-shot effects,
//! revalidation at maturity, cancellation, and the move / butcher /
//! combat / craft scenarios.

mod common;

use std::time::Instant;

use common::enter_player;

use duskmud::action::{poll_action, update_actions, ActionKind, ActionState};
use duskmud::db::{
    ITEM_HAMMER, ITEM_HIDE, ITEM_INGOT, ROOM_FORGE, ROOM_LEDGE, ROOM_MARKET, ROOM_PIT,
    ROOM_SQUARE,
};
use duskmud::handler::obj_to_char;
use duskmud::interpreter::command_interpreter;
use duskmud::structs::{BodyPart, ItemData, ItemKind, Posture};

/* pull the deadline into the past so the next poll matures the action */
fn mature(s: &mut common::Setup) {
    s.world.ch_mut(s.player).action.deadline = Instant::now();
}

#[test]
fn polling_before_the_deadline_does_nothing() {
    let mut s = enter_player("Asha");
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "north"));
    let stamina_before = s.world.ch(s.player).stamina;
    s.output();

    for _ in 0..5 {
        assert_eq!(
            poll_action(&mut s.game, &mut s.world, s.player),
            ActionState::Running
        );
    }
    /* no side effects: same room, same stamina, no narration */
    assert_eq!(s.room_vnum(), ROOM_SQUARE);
    assert_eq!(s.world.ch(s.player).stamina, stamina_before);
    assert!(s.output().is_empty());
}

#[test]
fn the_effect_fires_exactly_once() {
    let mut s = enter_player("Asha");
    command_interpreter(&mut s.game, &mut s.world, s.player, "north");
    let stamina_before = s.world.ch(s.player).stamina;
    mature(&mut s);

    assert_eq!(
        poll_action(&mut s.game, &mut s.world, s.player),
        ActionState::Finished
    );
    assert_eq!(s.room_vnum(), ROOM_MARKET);
    let stamina_after = s.world.ch(s.player).stamina;
    assert!(stamina_after < stamina_before);

    /* terminal states are sticky; nothing happens again */
    assert_eq!(
        poll_action(&mut s.game, &mut s.world, s.player),
        ActionState::Finished
    );
    assert_eq!(s.room_vnum(), ROOM_MARKET);
    assert_eq!(s.world.ch(s.player).stamina, stamina_after);
}

#[test]
fn the_update_loop_retires_finished_actions_to_wait() {
    let mut s = enter_player("Asha");
    command_interpreter(&mut s.game, &mut s.world, s.player, "north");
    mature(&mut s);
    update_actions(&mut s.game, &mut s.world);
    assert!(s.world.ch(s.player).action.is_idle());
    assert_eq!(s.room_vnum(), ROOM_MARKET);
}

#[test]
fn move_success_narrates_both_ends() {
    let mut s = enter_player("Asha");
    s.output();
    command_interpreter(&mut s.game, &mut s.world, s.player, "north");
    mature(&mut s);
    update_actions(&mut s.game, &mut s.world);
    let out = s.output();
    assert!(out.contains("You start walking north."));
    assert!(out.contains("Market Way"));
}

#[test]
fn move_cooldown_stretches_as_posture_drops() {
    let mut s = enter_player("Asha");
    s.world.ch_mut(s.player).posture = Posture::Crouching;
    command_interpreter(&mut s.game, &mut s.world, s.player, "north");
    match s.world.ch(s.player).action.kind {
        ActionKind::Move { .. } => (),
        other => panic!("expected a move action, got {:?}", other),
    }
    /* crouched steps take four ticks; the deadline must be well out */
    let remaining = s.world.ch(s.player).action.deadline - Instant::now();
    assert!(remaining.as_secs_f64() > 3.0);
}

#[test]
fn move_blocked_by_closed_door_constructs_no_action() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_FORGE);
    s.output();
    let handled = command_interpreter(&mut s.game, &mut s.world, s.player, "down");
    assert!(!handled);
    assert!(s
        .output()
        .contains("Maybe you have to open that door first."));
    assert!(s.world.ch(s.player).action.is_idle());
}

#[test]
fn opening_the_door_clears_the_way() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_FORGE);
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "open trapdoor"));
    assert!(s.output().contains("You open the trapdoor."));
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "down"));
    assert!(matches!(
        s.world.ch(s.player).action.kind,
        ActionKind::Move { .. }
    ));
}

#[test]
fn a_door_closed_mid_walk_turns_the_step_into_an_error() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_FORGE);
    command_interpreter(&mut s.game, &mut s.world, s.player, "open trapdoor");
    command_interpreter(&mut s.game, &mut s.world, s.player, "down");
    /* someone slams it shut while the step is pending */
    let rid = s.world.ch(s.player).in_room.unwrap();
    s.world
        .room_mut(rid)
        .exit_mut(duskmud::structs::Direction::Down)
        .unwrap()
        .flags
        .insert(duskmud::structs::ExitFlags::CLOSED);
    mature(&mut s);
    s.output();
    assert_eq!(
        poll_action(&mut s.game, &mut s.world, s.player),
        ActionState::Error
    );
    assert!(s
        .output()
        .contains("Maybe you have to open that door first."));
    assert_eq!(s.room_vnum(), ROOM_FORGE);
}

#[test]
fn missing_floor_blocks_the_step_unless_there_are_stairs() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_LEDGE);
    s.output();
    assert!(!command_interpreter(&mut s.game, &mut s.world, s.player, "down"));
    assert!(s.output().contains("nothing over there to stand on"));
    assert!(s.world.ch(s.player).action.is_idle());

    /* the square's cut stair into the same pit is fine */
    s.move_player(ROOM_SQUARE);
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "down"));
    mature(&mut s);
    update_actions(&mut s.game, &mut s.world);
    assert_eq!(s.room_vnum(), ROOM_PIT);
}

#[test]
fn exhaustion_refuses_the_step() {
    let mut s = enter_player("Asha");
    s.world.ch_mut(s.player).stamina = 0;
    s.output();
    assert!(!command_interpreter(&mut s.game, &mut s.world, s.player, "north"));
    assert!(s.output().contains("You are too exhausted."));
    assert!(s.world.ch(s.player).action.is_idle());
}

#[test]
fn sitting_people_do_not_walk() {
    let mut s = enter_player("Asha");
    s.world.ch_mut(s.player).posture = Posture::Sitting;
    s.output();
    assert!(!command_interpreter(&mut s.game, &mut s.world, s.player, "north"));
    assert!(s.output().contains("get on your feet first"));
}

#[test]
fn a_new_command_interrupts_a_pending_walk() {
    let mut s = enter_player("Asha");
    command_interpreter(&mut s.game, &mut s.world, s.player, "north");
    s.output();
    command_interpreter(&mut s.game, &mut s.world, s.player, "look");
    let out = s.output();
    assert!(out.contains("You stop walking north."));
    assert!(s.world.ch(s.player).action.is_idle());
}

#[test]
fn stop_cancels_without_running_the_effect() {
    let mut s = enter_player("Asha");
    command_interpreter(&mut s.game, &mut s.world, s.player, "north");
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "stop"));
    assert!(s.output().contains("You stop walking north."));
    assert!(s.world.ch(s.player).action.is_idle());
    assert_eq!(s.room_vnum(), ROOM_SQUARE);
}

/* ---------------- butchery ---------------- */

fn plant_corpse(s: &mut common::Setup, parts: Vec<BodyPart>) -> duskmud::depot::DepotId {
    let start = s.world.start_room.unwrap();
    let mut corpse = ItemData::default();
    corpse.name = "corpse deer".to_string();
    corpse.short_desc = "the corpse of a deer".to_string();
    corpse.ground_desc = "The corpse of a deer is lying here.".to_string();
    corpse.weight = 40;
    corpse.kind = ItemKind::Corpse {
        of: "a deer".to_string(),
        parts,
    };
    let oid = s.world.objs.push(corpse);
    duskmud::handler::obj_to_room(&mut s.world, oid, start);
    oid
}

#[test]
fn butchering_exhausts_the_corpse() {
    let mut s = enter_player("Asha");
    let corpse = plant_corpse(
        &mut s,
        vec![BodyPart {
            name: "hide",
            resource: ITEM_HIDE,
            quantity: 1,
        }],
    );
    s.output();

    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "butcher corpse"));
    assert!(matches!(
        s.world.ch(s.player).action.kind,
        ActionKind::Dismember { .. }
    ));
    mature(&mut s);
    update_actions(&mut s.game, &mut s.world);

    let out = s.output();
    assert!(out.contains("You carve the hide"));
    let ch = s.world.ch(s.player);
    assert_eq!(ch.carrying.len(), 1);
    assert_eq!(s.world.obj(ch.carrying[0]).vnum, ITEM_HIDE);
    match &s.world.obj(corpse).kind {
        ItemKind::Corpse { parts, .. } => assert!(parts.is_empty()),
        other => panic!("corpse changed kind: {:?}", other),
    }

    /* a second attempt has nothing left to take */
    assert!(!command_interpreter(&mut s.game, &mut s.world, s.player, "butcher corpse"));
    assert!(s.output().contains("does not contain anything useful."));
}

#[test]
fn butchery_practice_accumulates() {
    let mut s = enter_player("Asha");
    plant_corpse(
        &mut s,
        vec![BodyPart {
            name: "hide",
            resource: ITEM_HIDE,
            quantity: 1,
        }],
    );
    command_interpreter(&mut s.game, &mut s.world, s.player, "butcher corpse");
    mature(&mut s);
    update_actions(&mut s.game, &mut s.world);
    assert_eq!(
        s.world
            .ch(s.player)
            .skills
            .get(duskmud::structs::Skill::Butchery),
        1
    );
}

#[test]
fn too_heavy_yields_fall_to_the_floor() {
    let mut s = enter_player("Asha");
    plant_corpse(
        &mut s,
        vec![BodyPart {
            name: "hide",
            resource: ITEM_HIDE,
            quantity: 1,
        }],
    );
    s.world.ch_mut(s.player).strength = 0; /* can carry nothing */
    command_interpreter(&mut s.game, &mut s.world, s.player, "butcher corpse");
    mature(&mut s);
    s.output();
    update_actions(&mut s.game, &mut s.world);
    assert!(s.output().contains("tumbles to the ground"));
    assert!(s.world.ch(s.player).carrying.is_empty());
    let start = s.world.start_room.unwrap();
    let on_floor = s
        .world
        .room(start)
        .contents
        .iter()
        .any(|&oid| s.world.obj(oid).vnum == ITEM_HIDE);
    assert!(on_floor);
}

/* ---------------- combat ---------------- */

#[test]
fn combat_restricted_commands_do_not_touch_the_fight() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_MARKET);
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "kill deer"));
    assert!(s.world.ch(s.player).in_combat());
    let kind_before = s.world.ch(s.player).action.kind;

    /* "ge" abbreviates "get", which is not usable in combat */
    assert!(!command_interpreter(&mut s.game, &mut s.world, s.player, "ge bread"));
    assert!(s.output().contains("You cannot do that in combat."));
    assert_eq!(s.world.ch(s.player).action.kind, kind_before);
}

#[test]
fn victims_are_dragged_into_the_fight() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_MARKET);
    command_interpreter(&mut s.game, &mut s.world, s.player, "kill deer");
    let deer = s
        .world
        .chars
        .ids()
        .into_iter()
        .find(|&c| s.world.ch(c).name.contains("deer"))
        .unwrap();
    assert!(s.world.ch(deer).in_combat());
}

#[test]
fn combat_rounds_rearm_instead_of_finishing() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_MARKET);
    command_interpreter(&mut s.game, &mut s.world, s.player, "kill deer");
    /* keep the deer alive through one round */
    let deer = s
        .world
        .chars
        .ids()
        .into_iter()
        .find(|&c| s.world.ch(c).name.contains("deer"))
        .unwrap();
    s.world.ch_mut(deer).health = 10_000;
    s.world.ch_mut(deer).max_health = 10_000;

    mature(&mut s);
    assert_eq!(
        poll_action(&mut s.game, &mut s.world, s.player),
        ActionState::Running
    );
    assert!(s.world.ch(s.player).in_combat());
    /* and the deadline moved into the future */
    assert!(s.world.ch(s.player).action.deadline > Instant::now());
}

#[test]
fn flee_is_the_door_out_of_a_fight() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_MARKET);
    command_interpreter(&mut s.game, &mut s.world, s.player, "kill deer");
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "flee"));
    assert!(s.output().contains("You flee head over heels."));
    assert!(!s.world.ch(s.player).in_combat());
    assert_ne!(s.room_vnum(), ROOM_MARKET);
}

#[test]
fn stop_refuses_to_end_a_fight() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_MARKET);
    command_interpreter(&mut s.game, &mut s.world, s.player, "kill deer");
    s.output();
    assert!(!command_interpreter(&mut s.game, &mut s.world, s.player, "stop"));
    assert!(s.output().contains("Flee if you want out."));
    assert!(s.world.ch(s.player).in_combat());
}

#[test]
fn a_dead_opponent_leaves_a_corpse_with_parts() {
    let mut s = enter_player("Asha");
    s.move_player(ROOM_MARKET);
    command_interpreter(&mut s.game, &mut s.world, s.player, "kill deer");
    let deer = s
        .world
        .chars
        .ids()
        .into_iter()
        .find(|&c| s.world.ch(c).name.contains("deer"))
        .unwrap();
    s.world.ch_mut(deer).health = 1;
    s.world.ch_mut(s.player).strength = 25; /* make sure the blow lands hard */

    /* swing until the deer drops; misses are possible */
    for _ in 0..50 {
        if !s.world.chars.contains(deer) {
            break;
        }
        mature(&mut s);
        let state = poll_action(&mut s.game, &mut s.world, s.player);
        if state == ActionState::Finished {
            break;
        }
    }
    assert!(!s.world.chars.contains(deer));

    let rid = s.world.ch(s.player).in_room.unwrap();
    let corpse = s
        .world
        .room(rid)
        .contents
        .iter()
        .copied()
        .find(|&oid| s.world.obj(oid).is_corpse());
    let corpse = corpse.expect("the deer should have left a corpse");
    match &s.world.obj(corpse).kind {
        ItemKind::Corpse { parts, .. } => assert!(!parts.is_empty()),
        _ => unreachable!(),
    }
}

/* ---------------- crafting ---------------- */

#[test]
fn forging_consumes_materials_and_keeps_the_tool() {
    let mut s = enter_player("Asha");
    let ingot = s.world.read_object(ITEM_INGOT).unwrap();
    let hammer = s.world.read_object(ITEM_HAMMER).unwrap();
    obj_to_char(&mut s.world, ingot, s.player);
    obj_to_char(&mut s.world, hammer, s.player);
    s.output();

    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "forge dagger"));
    assert!(s.output().contains("You begin forging dagger"));
    assert!(matches!(
        s.world.ch(s.player).action.kind,
        ActionKind::Craft { .. }
    ));

    mature(&mut s);
    update_actions(&mut s.game, &mut s.world);

    let vnums: Vec<i32> = s
        .world
        .ch(s.player)
        .carrying
        .iter()
        .map(|&oid| s.world.obj(oid).vnum)
        .collect();
    assert!(vnums.contains(&duskmud::db::ITEM_DAGGER));
    assert!(vnums.contains(&ITEM_HAMMER));
    assert!(!vnums.contains(&ITEM_INGOT));
}

#[test]
fn crafting_rechecks_materials_at_maturity() {
    let mut s = enter_player("Asha");
    let ingot = s.world.read_object(ITEM_INGOT).unwrap();
    let hammer = s.world.read_object(ITEM_HAMMER).unwrap();
    obj_to_char(&mut s.world, ingot, s.player);
    obj_to_char(&mut s.world, hammer, s.player);
    command_interpreter(&mut s.game, &mut s.world, s.player, "forge dagger");

    /* the ingot vanishes while the work is pending */
    duskmud::handler::extract_obj(&mut s.world, ingot);
    mature(&mut s);
    s.output();
    assert_eq!(
        poll_action(&mut s.game, &mut s.world, s.player),
        ActionState::Error
    );
    assert!(s.output().contains("no longer have the materials"));
}

#[test]
fn wait_is_never_polled_to_completion() {
    let mut s = enter_player("Asha");
    assert!(s.world.ch(s.player).action.is_idle());
    for _ in 0..3 {
        assert_eq!(
            poll_action(&mut s.game, &mut s.world, s.player),
            ActionState::Running
        );
    }
    assert!(s.world.ch(s.player).action.is_idle());
}
