/* ************************************************************************
*   File: util.rs                                        Part of DuskMUD  *
*  Usage: various internal functions of a utility nature                  *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use chrono::{DateTime, Local};
use log::error;
use rand::Rng;

pub fn rand_number(from: u32, to: u32) -> u32 {
    /* error checking in case people call this incorrectly */
    let mut from = from;
    let mut to = to;
    if from > to {
        std::mem::swap(&mut from, &mut to);
        error!(
            "SYSERR: rand_number() should be called with lowest, then highest. ({}, {}), not ({}, {}).",
            from, to, to, from
        );
    }

    rand::thread_rng().gen_range(from..=to)
}

/* simulates dice roll: dice(2, 6) makes 2d6 */
pub fn dice(num: i32, size: i32) -> i32 {
    let mut sum: i32 = 0;
    if size <= 0 || num <= 0 {
        return 0;
    }

    for _ in 0..num {
        sum += rand_number(1, size as u32) as i32;
    }

    sum
}

/*
 * Stamina and damage figures come out of float math; pin the result into
 * integer range without wrapping.  NaN and negative values come out as
 * the minimum.
 */
pub fn fclamp_i32(value: f64, min: i32, max: i32) -> i32 {
    if !value.is_finite() {
        return min;
    }
    if value <= min as f64 {
        min
    } else if value >= max as f64 {
        max
    } else {
        value as i32
    }
}

/* classic table-free ability modifier: 10 is average, every 2 points is +-1 */
pub fn ability_modifier(score: i8) -> i32 {
    (score as i32 - 10) / 2
}

pub fn ctime(when: DateTime<Local>) -> String {
    when.format("%a %b %e %H:%M:%S %Y").to_string()
}

/* an A or an AN, depending on the first letter that follows */
pub fn an(word: &str) -> &'static str {
    match word.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => "an",
        _ => "a",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dice_stays_in_bounds() {
        for _ in 0..100 {
            let roll = dice(2, 6);
            assert!((2..=12).contains(&roll));
        }
        assert_eq!(dice(0, 6), 0);
        assert_eq!(dice(2, 0), 0);
    }

    #[test]
    fn fclamp_pins_edges() {
        assert_eq!(fclamp_i32(-3.5, 0, 100), 0);
        assert_eq!(fclamp_i32(4.9, 0, 100), 4);
        assert_eq!(fclamp_i32(1e12, 0, 100), 100);
        assert_eq!(fclamp_i32(f64::NAN, 0, 100), 0);
    }
}
