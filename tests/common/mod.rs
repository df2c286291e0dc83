//! Shared scaffolding for the integration tests: a booted world plus one
//! connected (socketless) player standing in the starting square.

use duskmud::db::{boot_world, create_player, World};
use duskmud::depot::DepotId;
use duskmud::game::{ConState, DescriptorData, Game};
use duskmud::handler::char_to_room;

pub struct Setup {
    pub game: Game,
    pub world: World,
    pub player: DepotId,
    pub desc: DepotId,
}

pub fn enter_player(name: &str) -> Setup {
    let mut world = World::new();
    boot_world(&mut world);
    let mut game = Game::new();

    let desc = game.descriptors.push(DescriptorData::detached());
    let player = create_player(&mut world, name);
    world.ch_mut(player).desc = Some(desc);
    game.desc_mut(desc).character = Some(player);
    game.desc_mut(desc).state = ConState::ConPlaying;

    let start = world.start_room.expect("world must have a start room");
    char_to_room(&mut world, player, start);

    Setup {
        game,
        world,
        player,
        desc,
    }
}

impl Setup {
    /// Drain and return everything the player has been shown so far.
    pub fn output(&mut self) -> String {
        self.game.desc_mut(self.desc).take_output()
    }

    pub fn room_vnum(&self) -> i32 {
        let rid = self.world.ch(self.player).in_room.unwrap();
        self.world.room(rid).vnum
    }

    pub fn move_player(&mut self, vnum: i32) {
        let rid = self.world.room_by_vnum(vnum).unwrap();
        char_to_room(&mut self.world, self.player, rid);
    }
}
