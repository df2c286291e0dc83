/* ************************************************************************
*   File: db.rs                                          Part of DuskMUD  *
*  Usage: the world container, booting the world, vnum lookups            *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use log::{error, info};

use crate::action::Action;
use crate::depot::{Depot, DepotId, HasId};
use crate::handler::{char_to_room, obj_to_room};
use crate::structs::{
    BodyPart, CharData, Direction, ExitData, ExitFlags, ItemData, ItemFlags, ItemKind,
    ItemLocation, ItemProto, ItemVnum, Material, MobFlags, Posture, RoomData, RoomFlags, RoomVnum,
    SkillSet,
};

/* room vnums referenced while booting */
pub const ROOM_SQUARE: RoomVnum = 3001;
pub const ROOM_MARKET: RoomVnum = 3002;
pub const ROOM_FORGE: RoomVnum = 3003;
pub const ROOM_CELLAR: RoomVnum = 3004;
pub const ROOM_LEDGE: RoomVnum = 3005;
pub const ROOM_PIT: RoomVnum = 3006;
pub const ROOM_GROVE: RoomVnum = 3007;

/* item vnums */
pub const ITEM_BREAD: ItemVnum = 100;
pub const ITEM_APPLE: ItemVnum = 101;
pub const ITEM_SWORD: ItemVnum = 102;
pub const ITEM_VENISON: ItemVnum = 110;
pub const ITEM_HIDE: ItemVnum = 111;
pub const ITEM_BONE: ItemVnum = 112;
pub const ITEM_HAMMER: ItemVnum = 120;
pub const ITEM_INGOT: ItemVnum = 121;
pub const ITEM_DAGGER: ItemVnum = 122;
pub const ITEM_ROAST: ItemVnum = 123;
pub const ITEM_LOG: ItemVnum = 130;
pub const ITEM_LEANTO: ItemVnum = 131;
pub const ITEM_CLUB: ItemVnum = 132;

pub struct World {
    pub rooms: Depot<RoomData>,
    pub chars: Depot<CharData>,
    pub objs: Depot<ItemData>,
    pub obj_protos: Vec<ItemProto>,
    pub start_room: Option<DepotId>,
}

impl World {
    pub fn new() -> World {
        World {
            rooms: Depot::new(),
            chars: Depot::new(),
            objs: Depot::new(),
            obj_protos: vec![],
            start_room: None,
        }
    }

    pub fn ch(&self, chid: DepotId) -> &CharData {
        self.chars.get(chid)
    }

    pub fn ch_mut(&mut self, chid: DepotId) -> &mut CharData {
        self.chars.get_mut(chid)
    }

    pub fn room(&self, rid: DepotId) -> &RoomData {
        self.rooms.get(rid)
    }

    pub fn room_mut(&mut self, rid: DepotId) -> &mut RoomData {
        self.rooms.get_mut(rid)
    }

    pub fn obj(&self, oid: DepotId) -> &ItemData {
        self.objs.get(oid)
    }

    pub fn obj_mut(&mut self, oid: DepotId) -> &mut ItemData {
        self.objs.get_mut(oid)
    }

    pub fn room_by_vnum(&self, vnum: RoomVnum) -> Option<DepotId> {
        self.rooms.iter().find(|r| r.vnum == vnum).map(|r| r.id())
    }

    pub fn proto(&self, vnum: ItemVnum) -> Option<&ItemProto> {
        self.obj_protos.iter().find(|p| p.vnum == vnum)
    }

    /*
     * Instantiate an item from its prototype.  The new item is attached
     * nowhere; the caller decides where it lands.
     */
    pub fn read_object(&mut self, vnum: ItemVnum) -> Option<DepotId> {
        let proto = match self.proto(vnum) {
            Some(p) => p,
            None => {
                error!("SYSERR: read_object: no item prototype with vnum {}", vnum);
                return None;
            }
        };
        let item = ItemData {
            vnum: proto.vnum,
            name: proto.name.to_string(),
            short_desc: proto.short_desc.to_string(),
            ground_desc: proto.ground_desc.to_string(),
            weight: proto.weight,
            flags: proto.flags,
            kind: proto.kind.clone(),
            location: ItemLocation::Nowhere,
            ..Default::default()
        };
        Some(self.objs.push(item))
    }

    fn create_room(
        &mut self,
        vnum: RoomVnum,
        name: &str,
        description: &str,
        flags: RoomFlags,
    ) -> DepotId {
        self.rooms.push(RoomData {
            vnum,
            name: name.to_string(),
            description: description.to_string(),
            flags,
            exits: Default::default(),
            people: vec![],
            contents: vec![],
            ..Default::default()
        })
    }
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

fn one_way_exit(
    world: &mut World,
    from: DepotId,
    dir: Direction,
    to: DepotId,
    flags: ExitFlags,
    keyword: &str,
) {
    world.room_mut(from).exits[dir.index()] = Some(ExitData {
        to_room: to,
        keyword: keyword.to_string(),
        flags,
    });
}

/* exits come in pairs unless the builder says otherwise */
fn link_rooms(
    world: &mut World,
    from: DepotId,
    dir: Direction,
    to: DepotId,
    flags: ExitFlags,
    keyword: &str,
) {
    one_way_exit(world, from, dir, to, flags, keyword);
    one_way_exit(world, to, dir.reverse(), from, flags, keyword);
}

pub fn create_player(world: &mut World, name: &str) -> DepotId {
    world.chars.push(CharData {
        name: name.to_string(),
        short_desc: None,
        long_desc: None,
        weight: 80,
        strength: 12,
        health: 50,
        max_health: 50,
        stamina: 100,
        max_stamina: 100,
        posture: Posture::Standing,
        staff: false,
        mob_flags: MobFlags::empty(),
        parts: humanoid_parts(),
        in_room: None,
        carrying: vec![],
        action: Action::wait(),
        aimed_at: None,
        skills: SkillSet::default(),
        desc: None,
        ..Default::default()
    })
}

#[allow(clippy::too_many_arguments)]
pub fn create_npc(
    world: &mut World,
    keywords: &str,
    short_desc: &str,
    long_desc: &str,
    room: DepotId,
    flags: MobFlags,
    parts: Vec<BodyPart>,
    weight: i32,
    strength: i8,
) -> DepotId {
    let chid = world.chars.push(CharData {
        name: keywords.to_string(),
        short_desc: Some(short_desc.to_string()),
        long_desc: Some(long_desc.to_string()),
        weight,
        strength,
        health: 30,
        max_health: 30,
        stamina: 100,
        max_stamina: 100,
        posture: Posture::Standing,
        staff: false,
        mob_flags: flags | MobFlags::IS_NPC,
        parts,
        in_room: None,
        carrying: vec![],
        action: Action::wait(),
        aimed_at: None,
        skills: SkillSet::default(),
        desc: None,
        ..Default::default()
    });
    char_to_room(world, chid, room);
    chid
}

fn humanoid_parts() -> Vec<BodyPart> {
    vec![BodyPart {
        name: "hide",
        resource: ITEM_HIDE,
        quantity: 1,
    }]
}

fn item_protos() -> Vec<ItemProto> {
    vec![
        ItemProto {
            vnum: ITEM_BREAD,
            name: "bread loaf",
            short_desc: "a loaf of bread",
            ground_desc: "A loaf of bread sits here going stale.",
            weight: 1,
            flags: ItemFlags::empty(),
            kind: ItemKind::Food,
        },
        ItemProto {
            vnum: ITEM_APPLE,
            name: "apple",
            short_desc: "a waxy red apple",
            ground_desc: "A waxy red apple has rolled to a stop here.",
            weight: 1,
            flags: ItemFlags::empty(),
            kind: ItemKind::Food,
        },
        ItemProto {
            vnum: ITEM_SWORD,
            name: "sword iron",
            short_desc: "an iron sword",
            ground_desc: "An iron sword lies discarded here.",
            weight: 3,
            flags: ItemFlags::empty(),
            kind: ItemKind::Weapon {
                hit_num: 1,
                hit_size: 8,
            },
        },
        ItemProto {
            vnum: ITEM_VENISON,
            name: "venison haunch meat",
            short_desc: "a haunch of venison",
            ground_desc: "A haunch of raw venison lies here.",
            weight: 2,
            flags: ItemFlags::empty(),
            kind: ItemKind::Resource {
                material: Material::Flesh,
            },
        },
        ItemProto {
            vnum: ITEM_HIDE,
            name: "hide pelt",
            short_desc: "a rough hide",
            ground_desc: "A rough animal hide is spread out here.",
            weight: 2,
            flags: ItemFlags::empty(),
            kind: ItemKind::Resource {
                material: Material::Hide,
            },
        },
        ItemProto {
            vnum: ITEM_BONE,
            name: "bone",
            short_desc: "a long bone",
            ground_desc: "A gnawed bone lies here.",
            weight: 1,
            flags: ItemFlags::empty(),
            kind: ItemKind::Resource {
                material: Material::Bone,
            },
        },
        ItemProto {
            vnum: ITEM_HAMMER,
            name: "hammer smith",
            short_desc: "a smith's hammer",
            ground_desc: "A well-worn smith's hammer rests here.",
            weight: 2,
            flags: ItemFlags::empty(),
            kind: ItemKind::Plain,
        },
        ItemProto {
            vnum: ITEM_INGOT,
            name: "ingot iron",
            short_desc: "an iron ingot",
            ground_desc: "A dull iron ingot lies here.",
            weight: 4,
            flags: ItemFlags::empty(),
            kind: ItemKind::Resource {
                material: Material::Iron,
            },
        },
        ItemProto {
            vnum: ITEM_DAGGER,
            name: "dagger iron",
            short_desc: "an iron dagger",
            ground_desc: "An iron dagger is stuck in the ground here.",
            weight: 1,
            flags: ItemFlags::empty(),
            kind: ItemKind::Weapon {
                hit_num: 1,
                hit_size: 4,
            },
        },
        ItemProto {
            vnum: ITEM_ROAST,
            name: "venison roast",
            short_desc: "a venison roast",
            ground_desc: "A glistening venison roast sits here.",
            weight: 2,
            flags: ItemFlags::empty(),
            kind: ItemKind::Food,
        },
        ItemProto {
            vnum: ITEM_LOG,
            name: "log wooden",
            short_desc: "a wooden log",
            ground_desc: "A heavy wooden log lies here.",
            weight: 8,
            flags: ItemFlags::empty(),
            kind: ItemKind::Resource {
                material: Material::Wood,
            },
        },
        ItemProto {
            vnum: ITEM_LEANTO,
            name: "lean-to shelter",
            short_desc: "a crude lean-to",
            ground_desc: "A crude lean-to of lashed logs stands here.",
            weight: 50,
            flags: ItemFlags::NOTAKE,
            kind: ItemKind::Structure,
        },
        ItemProto {
            vnum: ITEM_CLUB,
            name: "club wooden",
            short_desc: "a wooden club",
            ground_desc: "A stout wooden club lies here.",
            weight: 3,
            flags: ItemFlags::empty(),
            kind: ItemKind::Weapon {
                hit_num: 1,
                hit_size: 6,
            },
        },
    ]
}

pub fn boot_world(world: &mut World) {
    info!("Creating item prototypes.");
    world.obj_protos = item_protos();

    info!("Creating rooms.");
    let square = world.create_room(
        ROOM_SQUARE,
        "Dusk Square",
        "Grey flagstones stretch beneath a sky that never quite decides on night.",
        RoomFlags::empty(),
    );
    let market = world.create_room(
        ROOM_MARKET,
        "Market Way",
        "Shuttered stalls line a muddy lane.  Something small rustles under the boards.",
        RoomFlags::empty(),
    );
    let forge = world.create_room(
        ROOM_FORGE,
        "The Old Forge",
        "The coals still glow faintly.  Soot blackens every surface.",
        RoomFlags::INDOORS,
    );
    let cellar = world.create_room(
        ROOM_CELLAR,
        "Forge Cellar",
        "A cramped cellar smelling of iron filings and damp.",
        RoomFlags::INDOORS | RoomFlags::DARK,
    );
    let ledge = world.create_room(
        ROOM_LEDGE,
        "Crumbling Ledge",
        "A narrow ledge juts over blackness.  Loose mortar trickles from the edge.",
        RoomFlags::empty(),
    );
    let pit = world.create_room(
        ROOM_PIT,
        "Bottom of the Pit",
        "Cold air pools down here.  The walls go straight up into darkness.",
        RoomFlags::NO_FLOOR | RoomFlags::DARK,
    );
    let grove = world.create_room(
        ROOM_GROVE,
        "Quiet Grove",
        "Pale trees close in on a soft carpet of needles.  Nothing hunts here.",
        RoomFlags::PEACEFUL | RoomFlags::NO_MOB,
    );

    info!("Linking exits.");
    link_rooms(world, square, Direction::North, market, ExitFlags::empty(), "");
    link_rooms(world, square, Direction::East, forge, ExitFlags::empty(), "");
    link_rooms(world, square, Direction::West, grove, ExitFlags::empty(), "");
    link_rooms(
        world,
        forge,
        Direction::Down,
        cellar,
        ExitFlags::DOOR | ExitFlags::CLOSED,
        "trapdoor",
    );
    link_rooms(world, market, Direction::East, ledge, ExitFlags::empty(), "");
    /* the square has a cut stair into the pit */
    link_rooms(world, square, Direction::Down, pit, ExitFlags::STAIRS, "");
    /* the ledge also overhangs the pit, but nothing to climb down on */
    one_way_exit(world, ledge, Direction::Down, pit, ExitFlags::empty(), "");

    world.start_room = Some(square);

    info!("Placing items.");
    for (vnum, room) in [
        (ITEM_BREAD, square),
        (ITEM_SWORD, square),
        (ITEM_APPLE, market),
        (ITEM_APPLE, market),
        (ITEM_HAMMER, forge),
        (ITEM_INGOT, forge),
        (ITEM_INGOT, cellar),
        (ITEM_LOG, grove),
        (ITEM_LOG, grove),
        (ITEM_LOG, grove),
    ] {
        if let Some(oid) = world.read_object(vnum) {
            obj_to_room(world, oid, room);
        }
    }

    info!("Loading mobiles.");
    create_npc(
        world,
        "deer doe",
        "a slender deer",
        "A slender deer noses at the mud between the stalls.",
        market,
        MobFlags::empty(),
        vec![
            BodyPart {
                name: "hide",
                resource: ITEM_HIDE,
                quantity: 1,
            },
            BodyPart {
                name: "haunch",
                resource: ITEM_VENISON,
                quantity: 2,
            },
            BodyPart {
                name: "bones",
                resource: ITEM_BONE,
                quantity: 2,
            },
        ],
        60,
        8,
    );
    create_npc(
        world,
        "rat cellar",
        "a cellar rat",
        "A fat cellar rat watches you with beady eyes.",
        cellar,
        MobFlags::SCAVENGER,
        vec![BodyPart {
            name: "pelt",
            resource: ITEM_HIDE,
            quantity: 1,
        }],
        2,
        4,
    );
    create_npc(
        world,
        "boar bristling",
        "a bristling boar",
        "A bristling boar paces the pit floor, furious at everything.",
        pit,
        MobFlags::AGGRESSIVE,
        vec![
            BodyPart {
                name: "hide",
                resource: ITEM_HIDE,
                quantity: 1,
            },
            BodyPart {
                name: "haunch",
                resource: ITEM_VENISON,
                quantity: 3,
            },
        ],
        90,
        14,
    );

    info!(
        "World booted: {} rooms, {} mobiles, {} items.",
        world.rooms.len(),
        world.chars.len(),
        world.objs.len()
    );
}

/*
 * Sanity pass for --check mode: every exit must lead to a live room and
 * every vnum referenced by a prototype, recipe or body part must exist.
 */
pub fn check_world(world: &World) -> bool {
    let mut ok = true;
    for room in world.rooms.iter() {
        for dir in crate::structs::DIRECTIONS {
            if let Some(exit) = room.exit(dir) {
                if !world.rooms.contains(exit.to_room) {
                    error!(
                        "SYSERR: room {} exit {} leads nowhere",
                        room.vnum,
                        dir.name()
                    );
                    ok = false;
                }
            }
        }
    }
    for ch in world.chars.iter() {
        for part in &ch.parts {
            if world.proto(part.resource).is_none() {
                error!(
                    "SYSERR: {} body part '{}' yields unknown item {}",
                    ch.pers(),
                    part.name,
                    part.resource
                );
                ok = false;
            }
        }
    }
    for recipe in crate::act_craft::RECIPES {
        if world.proto(recipe.output).is_none() {
            error!("SYSERR: recipe '{}' produces unknown item", recipe.name);
            ok = false;
        }
        for (vnum, _) in recipe.ingredients {
            if world.proto(*vnum).is_none() {
                error!("SYSERR: recipe '{}' wants unknown item {}", recipe.name, vnum);
                ok = false;
            }
        }
    }
    for plan in crate::act_craft::BUILD_PLANS {
        if world.proto(plan.output).is_none() {
            error!("SYSERR: build plan '{}' produces unknown item", plan.name);
            ok = false;
        }
        for (vnum, _) in plan.components {
            if world.proto(*vnum).is_none() {
                error!("SYSERR: build plan '{}' wants unknown item {}", plan.name, vnum);
                ok = false;
            }
        }
    }
    if world.start_room.is_none() {
        error!("SYSERR: no start room");
        ok = false;
    }
    ok
}
