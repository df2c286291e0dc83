/* ************************************************************************
*   File: structs.rs                                     Part of DuskMUD  *
*  Usage: core structures for rooms, characters, items and their flags    *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use bitflags::bitflags;

use crate::action::Action;
use crate::depot::{DepotId, HasId};

pub type RoomVnum = i32;
pub type ItemVnum = i32;

pub const NOWHERE: RoomVnum = -1;

/*
 * Postures are ordered: everything below Prone rules walking out, and a
 * few commands ask for "at least sitting" the same way.
 */
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Posture {
    Dead,
    Sleeping,
    Resting,
    Sitting,
    Prone,
    Crouching,
    Standing,
}

impl Posture {
    pub fn describe(&self) -> &'static str {
        match self {
            Posture::Dead => "lying here, dead",
            Posture::Sleeping => "sleeping",
            Posture::Resting => "resting",
            Posture::Sitting => "sitting",
            Posture::Prone => "lying prone",
            Posture::Crouching => "crouching",
            Posture::Standing => "standing",
        }
    }

    pub fn allows_walking(&self) -> bool {
        *self >= Posture::Prone
    }

    /* stamina spent on a step scales down as you get lower */
    pub fn move_cost_factor(&self) -> f64 {
        match self {
            Posture::Standing => 1.0,
            Posture::Crouching => 0.75,
            Posture::Prone => 0.5,
            _ => 0.0,
        }
    }

    /* and the step itself takes longer */
    pub fn move_ticks(&self) -> u32 {
        match self {
            Posture::Standing => 2,
            Posture::Crouching => 4,
            _ => 6,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

pub const DIRECTIONS: [Direction; 6] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::Up,
    Direction::Down,
];

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /* where an arriving walker appears to come from */
    pub fn from_phrase(&self) -> &'static str {
        match self {
            Direction::North => "from the south",
            Direction::East => "from the west",
            Direction::South => "from the north",
            Direction::West => "from the east",
            Direction::Up => "from below",
            Direction::Down => "from above",
        }
    }

    pub fn find(arg: &str, exact: bool) -> Option<Direction> {
        if arg.is_empty() {
            return None;
        }
        let arg = arg.to_lowercase();
        DIRECTIONS.iter().copied().find(|d| {
            if exact {
                d.name() == arg
            } else {
                d.name().starts_with(arg.as_str())
            }
        })
    }
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct RoomFlags: u32 {
        const PEACEFUL = 1 << 0;  /* no violence here */
        const DARK     = 1 << 1;
        const NO_MOB   = 1 << 2;  /* mobiles never wander in */
        const NO_FLOOR = 1 << 3;  /* entering from above needs stairs */
        const INDOORS  = 1 << 4;
    }
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct ExitFlags: u32 {
        const DOOR   = 1 << 0;
        const CLOSED = 1 << 1;
        const LOCKED = 1 << 2;
        const STAIRS = 1 << 3;
        const NO_MOB = 1 << 4;    /* mobiles never use this exit */
    }
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct ItemFlags: u32 {
        const NOTAKE = 1 << 0;
    }
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct MobFlags: u32 {
        const IS_NPC     = 1 << 0;
        const SENTINEL   = 1 << 1;  /* stays where it was loaded */
        const SCAVENGER  = 1 << 2;  /* picks up stuff on the ground */
        const AGGRESSIVE = 1 << 3;  /* attacks players on sight */
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Material {
    Flesh,
    Bone,
    Hide,
    Wood,
    Stone,
    Iron,
    Cloth,
}

impl Material {
    pub fn name(&self) -> &'static str {
        match self {
            Material::Flesh => "flesh",
            Material::Bone => "bone",
            Material::Hide => "hide",
            Material::Wood => "wood",
            Material::Stone => "stone",
            Material::Iron => "iron",
            Material::Cloth => "cloth",
        }
    }
}

/*
 * What a corpse still has to offer.  Parts are consumed front to back;
 * each yields `quantity` copies of the resource item.
 */
#[derive(Clone, Debug)]
pub struct BodyPart {
    pub name: &'static str,
    pub resource: ItemVnum,
    pub quantity: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Skill {
    Butchery,
    Smithing,
    Cooking,
    Carpentry,
}

pub const NUM_SKILLS: usize = 4;

#[derive(Clone, Copy, Default, Debug)]
pub struct SkillSet([u32; NUM_SKILLS]);

impl SkillSet {
    pub fn get(&self, skill: Skill) -> u32 {
        self.0[skill as usize]
    }

    pub fn improve(&mut self, skill: Skill, by: u32) {
        let v = &mut self.0[skill as usize];
        *v = v.saturating_add(by);
    }
}

#[derive(Clone, Debug)]
pub enum ItemKind {
    Plain,
    Weapon { hit_num: i32, hit_size: i32 },
    Resource { material: Material },
    Food,
    Corpse { of: String, parts: Vec<BodyPart> },
    Structure,
}

/* Exactly one place may hold an item; handler.rs enforces the swap. */
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ItemLocation {
    Nowhere,
    Room(DepotId),
    Carried(DepotId),
}

pub struct ItemProto {
    pub vnum: ItemVnum,
    pub name: &'static str, /* keyword list */
    pub short_desc: &'static str,
    pub ground_desc: &'static str,
    pub weight: i32, /* kilograms */
    pub flags: ItemFlags,
    pub kind: ItemKind,
}

pub struct ItemData {
    pub(crate) id: DepotId,
    pub vnum: ItemVnum,
    pub name: String, /* keyword list */
    pub short_desc: String,
    pub ground_desc: String,
    pub weight: i32,
    pub flags: ItemFlags,
    pub kind: ItemKind,
    pub location: ItemLocation,
}

impl HasId for ItemData {
    fn id(&self) -> DepotId {
        self.id
    }
    fn set_id(&mut self, id: DepotId) {
        self.id = id;
    }
}

impl Default for ItemData {
    fn default() -> Self {
        ItemData {
            id: DepotId::default(),
            vnum: -1,
            name: String::new(),
            short_desc: String::new(),
            ground_desc: String::new(),
            weight: 0,
            flags: ItemFlags::empty(),
            kind: ItemKind::Plain,
            location: ItemLocation::Nowhere,
        }
    }
}

impl ItemData {
    pub fn is_corpse(&self) -> bool {
        matches!(self.kind, ItemKind::Corpse { .. })
    }

    pub fn can_take(&self) -> bool {
        !self.flags.contains(ItemFlags::NOTAKE)
    }
}

pub struct ExitData {
    pub to_room: DepotId,
    pub keyword: String, /* door name; empty when there is no door */
    pub flags: ExitFlags,
}

impl ExitData {
    pub fn is_closed(&self) -> bool {
        self.flags.contains(ExitFlags::CLOSED)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(ExitFlags::LOCKED)
    }
}

pub struct RoomData {
    pub(crate) id: DepotId,
    pub vnum: RoomVnum,
    pub name: String,
    pub description: String,
    pub flags: RoomFlags,
    pub exits: [Option<ExitData>; 6],
    pub people: Vec<DepotId>,
    pub contents: Vec<DepotId>,
}

impl HasId for RoomData {
    fn id(&self) -> DepotId {
        self.id
    }
    fn set_id(&mut self, id: DepotId) {
        self.id = id;
    }
}

impl Default for RoomData {
    fn default() -> Self {
        RoomData {
            id: DepotId::default(),
            vnum: NOWHERE,
            name: String::new(),
            description: String::new(),
            flags: RoomFlags::empty(),
            exits: Default::default(),
            people: vec![],
            contents: vec![],
        }
    }
}

impl RoomData {
    pub fn exit(&self, dir: Direction) -> Option<&ExitData> {
        self.exits[dir.index()].as_ref()
    }

    pub fn exit_mut(&mut self, dir: Direction) -> Option<&mut ExitData> {
        self.exits[dir.index()].as_mut()
    }
}

pub struct CharData {
    pub(crate) id: DepotId,
    pub name: String, /* player name; keyword list for NPCs */
    pub short_desc: Option<String>, /* for NPC 'actions' */
    pub long_desc: Option<String>,  /* for 'look' */
    pub weight: i32, /* kilograms, gear not included */
    pub strength: i8,
    pub health: i32,
    pub max_health: i32,
    pub stamina: i32,
    pub max_stamina: i32,
    pub posture: Posture,
    pub staff: bool,
    pub mob_flags: MobFlags,
    pub parts: Vec<BodyPart>, /* what a corpse of this creature yields */
    pub in_room: Option<DepotId>,
    pub carrying: Vec<DepotId>,
    pub action: Action,
    pub aimed_at: Option<DepotId>,
    pub skills: SkillSet,
    pub desc: Option<DepotId>, /* None for mobiles */
}

impl HasId for CharData {
    fn id(&self) -> DepotId {
        self.id
    }
    fn set_id(&mut self, id: DepotId) {
        self.id = id;
    }
}

impl Default for CharData {
    fn default() -> Self {
        CharData {
            id: DepotId::default(),
            name: String::new(),
            short_desc: None,
            long_desc: None,
            weight: 80,
            strength: 10,
            health: 50,
            max_health: 50,
            stamina: 100,
            max_stamina: 100,
            posture: Posture::Standing,
            staff: false,
            mob_flags: MobFlags::empty(),
            parts: vec![],
            in_room: None,
            carrying: vec![],
            action: Action::wait(),
            aimed_at: None,
            skills: SkillSet::default(),
            desc: None,
        }
    }
}

impl CharData {
    pub fn is_npc(&self) -> bool {
        self.mob_flags.contains(MobFlags::IS_NPC)
    }

    pub fn is_staff(&self) -> bool {
        self.staff
    }

    pub fn in_combat(&self) -> bool {
        self.action.in_combat()
    }

    /* display name: players go by name, mobiles by their short description */
    pub fn pers(&self) -> &str {
        match &self.short_desc {
            Some(sd) if self.is_npc() => sd,
            _ => &self.name,
        }
    }

    pub fn carry_limit(&self) -> i32 {
        self.strength as i32 * crate::config::CARRY_KG_PER_STR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posture_ordering_gates_walking() {
        assert!(Posture::Standing.allows_walking());
        assert!(Posture::Crouching.allows_walking());
        assert!(Posture::Prone.allows_walking());
        assert!(!Posture::Sitting.allows_walking());
        assert!(!Posture::Sleeping.allows_walking());
    }

    #[test]
    fn direction_prefix_lookup() {
        assert_eq!(Direction::find("n", false), Some(Direction::North));
        assert_eq!(Direction::find("so", false), Some(Direction::South));
        assert_eq!(Direction::find("DOWN", false), Some(Direction::Down));
        assert_eq!(Direction::find("nor", true), None);
        assert_eq!(Direction::find("north", true), Some(Direction::North));
        assert_eq!(Direction::find("", false), None);
    }
}
