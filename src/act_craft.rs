/* ************************************************************************
*   File: act_craft.rs                                   Part of DuskMUD  *
*  Usage: professions, recipes, building, and corpse butchery             *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use crate::action::{Action, ActionKind};
use crate::config::{BUTCHER_TICKS, CORPSE_EMPTY_MSG};
use crate::db::{World, ITEM_CLUB, ITEM_DAGGER, ITEM_HAMMER, ITEM_INGOT, ITEM_LEANTO, ITEM_LOG, ITEM_ROAST, ITEM_VENISON};
use crate::depot::DepotId;
use crate::game::{act, send_to_char, Game, TO_CHAR, TO_ROOM};
use crate::handler::{can_carry, extract_obj, get_obj_in_list, obj_to_char, obj_to_room};
use crate::interpreter::TokenHandler;
use crate::structs::{ItemKind, ItemLocation, ItemVnum, Posture, Skill};

pub struct Profession {
    pub command: &'static str, /* the verb players type */
    pub name: &'static str,
    pub gerund: &'static str,
    pub skill: Skill,
}

/*
 * Professions are not in the command registry; the interpreter tries
 * them last, after commands and directions have both come up empty.
 */
pub const PROFESSIONS: &[Profession] = &[
    Profession {
        command: "forge",
        name: "smith",
        gerund: "forging",
        skill: Skill::Smithing,
    },
    Profession {
        command: "cook",
        name: "cook",
        gerund: "cooking",
        skill: Skill::Cooking,
    },
    Profession {
        command: "carve",
        name: "carpenter",
        gerund: "carving",
        skill: Skill::Carpentry,
    },
];

pub fn find_profession(verb: &str) -> Option<&'static Profession> {
    let verb = verb.to_lowercase();
    PROFESSIONS.iter().find(|p| p.command == verb)
}

pub struct Recipe {
    pub profession: &'static str,
    pub name: &'static str,
    pub ingredients: &'static [(ItemVnum, u32)],
    pub tool: Option<ItemVnum>,
    pub output: ItemVnum,
    pub quantity: u32,
    pub ticks: u32,
}

pub const RECIPES: &[Recipe] = &[
    Recipe {
        profession: "forge",
        name: "dagger",
        ingredients: &[(ITEM_INGOT, 1)],
        tool: Some(ITEM_HAMMER),
        output: ITEM_DAGGER,
        quantity: 1,
        ticks: 4,
    },
    Recipe {
        profession: "cook",
        name: "roast",
        ingredients: &[(ITEM_VENISON, 1)],
        tool: None,
        output: ITEM_ROAST,
        quantity: 1,
        ticks: 3,
    },
    Recipe {
        profession: "carve",
        name: "club",
        ingredients: &[(ITEM_LOG, 1)],
        tool: None,
        output: ITEM_CLUB,
        quantity: 1,
        ticks: 3,
    },
];

pub fn profession_of(recipe: &Recipe) -> Option<&'static Profession> {
    PROFESSIONS.iter().find(|p| p.command == recipe.profession)
}

/* building works the same way but plants its product in the room */
pub struct BuildPlan {
    pub name: &'static str,
    pub components: &'static [(ItemVnum, u32)],
    pub output: ItemVnum,
    pub ticks: u32,
}

pub const BUILD_PLANS: &[BuildPlan] = &[BuildPlan {
    name: "lean-to",
    components: &[(ITEM_LOG, 2)],
    output: ITEM_LEANTO,
    ticks: 6,
}];

/* does the character hold `count` items instantiated from `vnum`? */
fn has_components(world: &World, chid: DepotId, wanted: &[(ItemVnum, u32)]) -> bool {
    wanted.iter().all(|&(vnum, count)| {
        world
            .ch(chid)
            .carrying
            .iter()
            .filter(|&&oid| world.obj(oid).vnum == vnum)
            .count() as u32
            >= count
    })
}

fn consume_components(world: &mut World, chid: DepotId, wanted: &[(ItemVnum, u32)]) {
    for &(vnum, count) in wanted {
        for _ in 0..count {
            if let Some(&oid) = world
                .ch(chid)
                .carrying
                .iter()
                .find(|&&oid| world.obj(oid).vnum == vnum)
            {
                extract_obj(world, oid);
            }
        }
    }
}

/*
 * A profession verb on its own lists what its practitioner knows;
 * followed by a recipe name it queues the work up.
 */
pub fn do_profession(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    prof: &'static Profession,
) -> bool {
    if args.is_empty() || args[0].is_empty() {
        let mut out = format!("As a {} you know how to make:\r\n", prof.name);
        for recipe in RECIPES.iter().filter(|r| r.profession == prof.command) {
            out.push_str(&format!("  {}\r\n", recipe.name));
        }
        send_to_char(&mut game.descriptors, world.ch(chid), &out);
        return true;
    }

    let wanted = args[0].content();
    let ri = match RECIPES
        .iter()
        .position(|r| r.profession == prof.command && r.name.starts_with(wanted))
    {
        Some(ri) => ri,
        None => {
            send_to_char(
                &mut game.descriptors,
                world.ch(chid),
                &format!("You don't know how to {} that.\r\n", prof.command),
            );
            return false;
        }
    };

    if !craft_check(game, world, chid, ri) {
        return false;
    }

    let recipe = &RECIPES[ri];
    world.ch_mut(chid).action = Action::new(ActionKind::Craft { recipe: ri }, recipe.ticks);
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("You begin {} {}.\r\n", prof.gerund, recipe.name),
    );
    act(
        &mut game.descriptors,
        world,
        &format!("$n begins {}.", prof.gerund),
        chid,
        None,
        None,
        TO_ROOM,
    );
    true
}

/*
 * Re-checked when the work matures: the materials may have been
 * dropped, given away, or burned in the meantime.
 */
pub fn craft_check(game: &mut Game, world: &World, chid: DepotId, ri: usize) -> bool {
    let recipe = &RECIPES[ri];
    let ch = world.ch(chid);
    if ch.posture < Posture::Sitting {
        send_to_char(
            &mut game.descriptors,
            ch,
            "You are in no state for that kind of work.\r\n",
        );
        return false;
    }
    if !has_components(world, chid, recipe.ingredients) {
        send_to_char(
            &mut game.descriptors,
            ch,
            "You no longer have the materials for that.\r\n",
        );
        return false;
    }
    if let Some(tool) = recipe.tool {
        if !world
            .ch(chid)
            .carrying
            .iter()
            .any(|&oid| world.obj(oid).vnum == tool)
        {
            send_to_char(
                &mut game.descriptors,
                world.ch(chid),
                "You lack the tool for that.\r\n",
            );
            return false;
        }
    }
    true
}

pub fn craft_effect(game: &mut Game, world: &mut World, chid: DepotId, ri: usize) {
    let recipe = &RECIPES[ri];
    consume_components(world, chid, recipe.ingredients);
    for _ in 0..recipe.quantity {
        if let Some(oid) = world.read_object(recipe.output) {
            if can_carry(world, chid, oid) {
                obj_to_char(world, oid, chid);
            } else if let Some(rid) = world.ch(chid).in_room {
                obj_to_room(world, oid, rid);
            }
        }
    }
    if let Some(prof) = profession_of(recipe) {
        world.ch_mut(chid).skills.improve(prof.skill, 1);
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            &format!("You finish {} {}.\r\n", prof.gerund, recipe.name),
        );
        act(
            &mut game.descriptors,
            world,
            &format!("$n finishes {}.", prof.gerund),
            chid,
            None,
            None,
            TO_ROOM,
        );
    }
}

pub fn do_build(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    if args.is_empty() || args[0].is_empty() {
        let mut out = String::from("You know how to put together:\r\n");
        for plan in BUILD_PLANS {
            out.push_str(&format!("  {}\r\n", plan.name));
        }
        send_to_char(&mut game.descriptors, world.ch(chid), &out);
        return true;
    }
    let wanted = args[0].content();
    let pi = match BUILD_PLANS.iter().position(|p| p.name.starts_with(wanted)) {
        Some(pi) => pi,
        None => {
            send_to_char(
                &mut game.descriptors,
                world.ch(chid),
                "You don't know how to build that.\r\n",
            );
            return false;
        }
    };
    if !build_check(game, world, chid, pi) {
        return false;
    }
    let plan = &BUILD_PLANS[pi];
    world.ch_mut(chid).action = Action::new(ActionKind::Build { plan: pi }, plan.ticks);
    send_to_char(
        &mut game.descriptors,
        world.ch(chid),
        &format!("You set about building {}.\r\n", plan.name),
    );
    act(
        &mut game.descriptors,
        world,
        "$n sets about building something.",
        chid,
        None,
        None,
        TO_ROOM,
    );
    true
}

pub fn build_check(game: &mut Game, world: &World, chid: DepotId, pi: usize) -> bool {
    let plan = &BUILD_PLANS[pi];
    let ch = world.ch(chid);
    if ch.posture < Posture::Standing {
        send_to_char(
            &mut game.descriptors,
            ch,
            "You will have to stand up to build anything.\r\n",
        );
        return false;
    }
    if !has_components(world, chid, plan.components) {
        send_to_char(
            &mut game.descriptors,
            ch,
            "You no longer have the components for that.\r\n",
        );
        return false;
    }
    true
}

pub fn build_effect(game: &mut Game, world: &mut World, chid: DepotId, pi: usize) {
    let plan = &BUILD_PLANS[pi];
    consume_components(world, chid, plan.components);
    let rid = match world.ch(chid).in_room {
        Some(rid) => rid,
        None => return,
    };
    if let Some(oid) = world.read_object(plan.output) {
        obj_to_room(world, oid, rid);
        world.ch_mut(chid).skills.improve(Skill::Carpentry, 1);
        act(
            &mut game.descriptors,
            world,
            "You finish building $p.",
            chid,
            Some(oid),
            None,
            TO_CHAR,
        );
        act(
            &mut game.descriptors,
            world,
            "$n finishes building $p.",
            chid,
            Some(oid),
            None,
            TO_ROOM,
        );
    }
}

/* ------------------------------------------------------------------ */
/* butchery                                                            */
/* ------------------------------------------------------------------ */

fn find_corpse(world: &World, chid: DepotId, args: &TokenHandler) -> Option<DepotId> {
    let rid = world.ch(chid).in_room?;
    if let Some(token) = args.get(0) {
        if !token.is_empty() {
            return get_obj_in_list(world, token, &world.room(rid).contents)
                .or_else(|| get_obj_in_list(world, token, &world.ch(chid).carrying));
        }
    }
    /* no argument: the nearest corpse will do */
    world
        .room(rid)
        .contents
        .iter()
        .copied()
        .find(|&oid| world.obj(oid).is_corpse())
}

pub fn do_butcher(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    args: &mut TokenHandler,
    _subcmd: i32,
) -> bool {
    let corpse = match find_corpse(world, chid, args) {
        Some(oid) => oid,
        None => {
            send_to_char(
                &mut game.descriptors,
                world.ch(chid),
                "There is nothing here you could butcher.\r\n",
            );
            return false;
        }
    };
    if !butcher_check(game, world, chid, corpse) {
        return false;
    }
    world.ch_mut(chid).action = Action::new(ActionKind::Dismember { corpse }, BUTCHER_TICKS);
    act(
        &mut game.descriptors,
        world,
        "You crouch over $p and set to work with your knife.",
        chid,
        Some(corpse),
        None,
        TO_CHAR,
    );
    act(
        &mut game.descriptors,
        world,
        "$n crouches over $p and sets to work.",
        chid,
        Some(corpse),
        None,
        TO_ROOM,
    );
    true
}

/*
 * Holds at queue time and again when the knife actually comes down;
 * another butcher may have stripped the corpse in between.
 */
pub fn butcher_check(game: &mut Game, world: &World, chid: DepotId, corpse: DepotId) -> bool {
    if !world.objs.contains(corpse) {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "The corpse is gone.\r\n",
        );
        return false;
    }
    let obj = world.obj(corpse);
    let nearby = match obj.location {
        ItemLocation::Room(rid) => world.ch(chid).in_room == Some(rid),
        ItemLocation::Carried(holder) => holder == chid,
        ItemLocation::Nowhere => false,
    };
    if !nearby {
        send_to_char(
            &mut game.descriptors,
            world.ch(chid),
            "The corpse is gone.\r\n",
        );
        return false;
    }
    match &obj.kind {
        ItemKind::Corpse { parts, .. } if !parts.is_empty() => true,
        ItemKind::Corpse { .. } => {
            act(
                &mut game.descriptors,
                world,
                &format!("$p {}", CORPSE_EMPTY_MSG),
                chid,
                Some(corpse),
                None,
                TO_CHAR,
            );
            false
        }
        _ => {
            act(
                &mut game.descriptors,
                world,
                "$p is not something you can butcher.",
                chid,
                Some(corpse),
                None,
                TO_CHAR,
            );
            false
        }
    }
}

/*
 * One part comes off per job: it is taken off the corpse's list, its
 * yield is conjured into the butcher's hands (or dropped at their feet
 * when too heavy), and the practice sinks in.
 */
pub fn butcher_effect(game: &mut Game, world: &mut World, chid: DepotId, corpse: DepotId) {
    let part = match &mut world.obj_mut(corpse).kind {
        ItemKind::Corpse { parts, .. } if !parts.is_empty() => parts.remove(0),
        _ => return,
    };

    act(
        &mut game.descriptors,
        world,
        &format!("You carve the {} from $p.", part.name),
        chid,
        Some(corpse),
        None,
        TO_CHAR,
    );
    act(
        &mut game.descriptors,
        world,
        "$n carves something off $p.",
        chid,
        Some(corpse),
        None,
        TO_ROOM,
    );

    for _ in 0..part.quantity {
        if let Some(oid) = world.read_object(part.resource) {
            if can_carry(world, chid, oid) {
                obj_to_char(world, oid, chid);
            } else {
                let short = world.obj(oid).short_desc.clone();
                if let Some(rid) = world.ch(chid).in_room {
                    obj_to_room(world, oid, rid);
                    send_to_char(
                        &mut game.descriptors,
                        world.ch(chid),
                        &format!("You can't carry {}; it tumbles to the ground.\r\n", short),
                    );
                } else {
                    extract_obj(world, oid);
                }
            }
        }
    }

    world.ch_mut(chid).skills.improve(Skill::Butchery, 1);
}
