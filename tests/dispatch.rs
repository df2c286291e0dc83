//! Resolution and dispatch behavior: prefix matching, registration-order
//! tie-breaks, privilege/combat/exact gating, and the interpreter's
//! direction and profession fallbacks.

mod common;

use common::enter_player;

use duskmud::action::{Action, ActionKind};
use duskmud::db::{World, ITEM_APPLE, ROOM_MARKET};
use duskmud::depot::DepotId;
use duskmud::game::{ConState, Game};
use duskmud::handler::{obj_to_char, obj_to_room};
use duskmud::interpreter::{
    command_interpreter, CommandRegistry, Resolution, TokenHandler,
};
use duskmud::structs::{CharData, ItemData};

fn noop(_: &mut Game, _: &mut World, _: DepotId, _: &mut TokenHandler, _: i32) -> bool {
    true
}

fn toy_registry(order: &[&'static str]) -> CommandRegistry {
    let mut reg = CommandRegistry::new();
    for verb in order {
        reg.register(verb, noop, "", "", false, true, false, 0);
    }
    reg
}

fn resolved_verb(reg: &CommandRegistry, typed: &str, ch: &CharData) -> Option<&'static str> {
    match reg.resolve(typed, ch) {
        Resolution::Command(i) => Some(reg.get(i).command),
        _ => None,
    }
}

#[test]
fn registration_order_breaks_prefix_ties() {
    let ch = CharData::default();

    let reg = toy_registry(&["look", "load"]);
    assert_eq!(resolved_verb(&reg, "lo", &ch), Some("look"));

    let reg = toy_registry(&["load", "look"]);
    assert_eq!(resolved_verb(&reg, "lo", &ch), Some("load"));
}

#[test]
fn resolution_is_deterministic() {
    let ch = CharData::default();
    let reg = toy_registry(&["look", "load", "lock"]);
    let first = resolved_verb(&reg, "lo", &ch);
    for _ in 0..10 {
        assert_eq!(resolved_verb(&reg, "lo", &ch), first);
    }
}

#[test]
fn matching_is_case_insensitive_prefix() {
    let ch = CharData::default();
    let reg = toy_registry(&["north", "nimble"]);
    assert_eq!(resolved_verb(&reg, "N", &ch), Some("north"));
    assert_eq!(resolved_verb(&reg, "NIM", &ch), Some("nimble"));
    assert_eq!(resolved_verb(&reg, "x", &ch), None);
}

#[test]
fn privileged_commands_are_invisible_to_mortals() {
    let mut reg = CommandRegistry::new();
    reg.register("gecho", noop, "", "", true, true, false, 0);
    reg.register("get", noop, "", "", false, true, false, 0);

    let mortal = CharData::default();
    /* the staff command is skipped as though it were not there */
    assert_eq!(resolved_verb(&reg, "ge", &mortal), Some("get"));

    let mut staff = CharData::default();
    staff.staff = true;
    assert_eq!(resolved_verb(&reg, "ge", &staff), Some("gecho"));
}

#[test]
fn exact_only_commands_reject_prefixes() {
    let ch = CharData::default();
    let mut reg = CommandRegistry::new();
    reg.register("quit", noop, "", "", false, true, true, 0);

    assert!(matches!(reg.resolve("qui", &ch), Resolution::ExactRequired(_)));
    assert!(matches!(reg.resolve("quit", &ch), Resolution::Command(_)));
}

#[test]
fn combat_gate_stops_the_scan_at_the_first_match() {
    let mut reg = CommandRegistry::new();
    reg.register("get", noop, "", "", false, false, false, 0);
    /* a combat-safe command sharing the prefix, registered later */
    reg.register("gem", noop, "", "", false, true, false, 0);

    let mut fighting = CharData::default();
    fighting.action = Action::new(
        ActionKind::Combat {
            target: DepotId::default(),
        },
        1,
    );
    /* no silent fall-through to "gem" */
    assert!(matches!(
        reg.resolve("ge", &fighting),
        Resolution::CombatRestricted(_)
    ));
    /* the combat-safe one still works when named precisely enough */
    assert!(matches!(reg.resolve("gem", &fighting), Resolution::Command(_)));

    let calm = CharData::default();
    assert_eq!(resolved_verb(&reg, "ge", &calm), Some("get"));
}

/* ---------------- full-interpreter behavior ---------------- */

#[test]
fn empty_input_is_rejected_with_huh() {
    let mut s = enter_player("Asha");
    s.output();
    let handled = command_interpreter(&mut s.game, &mut s.world, s.player, "   ");
    assert!(!handled);
    assert!(s.output().contains("Huh?!?"));
}

#[test]
fn unknown_verb_is_rejected_with_huh() {
    let mut s = enter_player("Asha");
    s.output();
    let handled = command_interpreter(&mut s.game, &mut s.world, s.player, "xyzzy");
    assert!(!handled);
    assert!(s.output().contains("Huh?!?"));
}

#[test]
fn every_exchange_ends_with_a_separator() {
    let mut s = enter_player("Asha");
    s.output();
    command_interpreter(&mut s.game, &mut s.world, s.player, "score");
    assert!(s.output().ends_with("\r\n\r\n"));
    command_interpreter(&mut s.game, &mut s.world, s.player, "notacommand");
    assert!(s.output().ends_with("\r\n\r\n"));
}

#[test]
fn verb_is_consumed_before_the_handler_sees_arguments() {
    let mut s = enter_player("Asha");
    s.output();
    let handled =
        command_interpreter(&mut s.game, &mut s.world, s.player, "say   Hello   THERE");
    assert!(handled);
    /* spacing and casing of the trailing text survive */
    assert!(s.output().contains("You say, 'Hello   THERE'"));
}

#[test]
fn quote_is_a_one_character_say() {
    let mut s = enter_player("Asha");
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "'hello"));
    assert!(s.output().contains("You say, 'hello'"));
}

#[test]
fn unknown_verbs_fall_back_to_directions() {
    let mut s = enter_player("Asha");
    s.output();
    let handled = command_interpreter(&mut s.game, &mut s.world, s.player, "n");
    assert!(handled);
    assert!(s.output().contains("You start walking north."));
    assert!(matches!(
        s.world.ch(s.player).action.kind,
        ActionKind::Move { .. }
    ));
}

#[test]
fn unknown_verbs_fall_back_to_professions_last() {
    let mut s = enter_player("Asha");
    s.output();
    let handled = command_interpreter(&mut s.game, &mut s.world, s.player, "cook");
    assert!(handled);
    let out = s.output();
    assert!(out.contains("you know how to make"));
    assert!(out.contains("roast"));
}

#[test]
fn mortals_cannot_reach_staff_commands() {
    let mut s = enter_player("Asha");
    s.world.ch_mut(s.player).staff = false;
    s.output();
    let handled = command_interpreter(&mut s.game, &mut s.world, s.player, "goto 3002");
    assert!(!handled);
    assert!(s.output().contains("Huh?!?"));
    assert_eq!(s.room_vnum(), 3001);
}

#[test]
fn staff_can_reach_staff_commands() {
    let mut s = enter_player("Asha");
    s.world.ch_mut(s.player).staff = true;
    s.output();
    let handled = command_interpreter(&mut s.game, &mut s.world, s.player, "goto 3002");
    assert!(handled);
    assert_eq!(s.room_vnum(), ROOM_MARKET);
}

#[test]
fn quit_demands_to_be_typed_in_full() {
    let mut s = enter_player("Asha");
    s.output();
    let handled = command_interpreter(&mut s.game, &mut s.world, s.player, "qui");
    assert!(!handled);
    assert!(s.output().contains("type it completely"));
    assert_eq!(s.game.desc(s.desc).state, ConState::ConPlaying);

    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "quit"));
    assert_eq!(s.game.desc(s.desc).state, ConState::ConClose);
}

#[test]
fn help_and_usage_come_from_the_registry() {
    let mut s = enter_player("Asha");
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "help butcher"));
    let out = s.output();
    assert!(out.contains("Carve a corpse for its usable parts."));
    assert!(out.contains("Usage: butcher"));
}

#[test]
fn get_honors_the_multiplier() {
    let mut s = enter_player("Asha");
    let start = s.world.start_room.unwrap();
    for _ in 0..3 {
        let oid = s.world.read_object(ITEM_APPLE).unwrap();
        obj_to_room(&mut s.world, oid, start);
    }
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "get 2*apple"));
    let carried = s.world.ch(s.player).carrying.len();
    assert_eq!(carried, 2);
}

#[test]
fn item_index_selects_among_same_named_objects() {
    let mut s = enter_player("Asha");
    let start = s.world.start_room.unwrap();
    for color in ["red", "blue"] {
        let mut gem = ItemData::default();
        gem.name = format!("gem {}", color);
        gem.short_desc = format!("a {} gem", color);
        gem.ground_desc = format!("A {} gem glints here.", color);
        gem.weight = 1;
        let oid = s.world.objs.push(gem);
        obj_to_room(&mut s.world, oid, start);
    }
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "get gem.2"));
    let ch = s.world.ch(s.player);
    assert_eq!(ch.carrying.len(), 1);
    assert_eq!(s.world.obj(ch.carrying[0]).short_desc, "a blue gem");
}

#[test]
fn give_moves_items_between_characters() {
    let mut s = enter_player("Asha");
    /* a second player to receive the goods */
    let other = duskmud::db::create_player(&mut s.world, "Brin");
    let start = s.world.start_room.unwrap();
    duskmud::handler::char_to_room(&mut s.world, other, start);

    let oid = s.world.read_object(ITEM_APPLE).unwrap();
    obj_to_char(&mut s.world, oid, s.player);
    s.output();
    assert!(command_interpreter(&mut s.game, &mut s.world, s.player, "give apple brin"));
    assert!(s.world.ch(s.player).carrying.is_empty());
    assert_eq!(s.world.ch(other).carrying.len(), 1);
}
