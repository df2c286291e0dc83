/* ************************************************************************
*   File: limits.rs                                      Part of DuskMUD  *
*  Usage: regeneration of health and stamina on the slow pulse            *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use crate::config::{HEALTH_REGEN, STAMINA_REGEN};
use crate::db::World;
use crate::structs::Posture;

/* the lower you get, the faster you mend */
fn regen_factor(posture: Posture) -> i32 {
    match posture {
        Posture::Sleeping => 3,
        Posture::Resting => 2,
        Posture::Sitting => 2,
        _ => 1,
    }
}

pub fn point_update(world: &mut World) {
    for chid in world.chars.ids() {
        let ch = world.ch_mut(chid);
        if ch.posture == Posture::Dead {
            continue;
        }
        let factor = regen_factor(ch.posture);
        ch.stamina = (ch.stamina + STAMINA_REGEN * factor).min(ch.max_stamina);
        ch.health = (ch.health + HEALTH_REGEN * factor).min(ch.max_health);
    }
}
