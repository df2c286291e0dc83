/* ************************************************************************
*   File: interpreter.rs                                 Part of DuskMUD  *
*  Usage: tokenize player input, resolve verbs, call command functions    *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use std::ops::Index;

use log::error;

use crate::act_comm::{do_emote, do_say, do_shout};
use crate::act_craft::{do_build, do_butcher, do_profession, find_profession};
use crate::act_informative::{
    do_commands, do_exits, do_help, do_look, do_score, do_time, do_who,
};
use crate::act_item::{do_drop, do_get, do_give, do_inventory};
use crate::act_movement::{
    do_crouch, do_gen_door, do_prone, do_rest, do_sit, do_sleep, do_stand, do_wake, start_move,
};
use crate::act_offensive::{do_aim, do_flee, do_kill};
use crate::act_other::{do_quit, do_stop, do_wait};
use crate::act_wizard::{do_goto, do_shutdown, do_stat};
use crate::action::interrupt_action;
use crate::config::{HUH, IN_COMBAT_MSG, TYPE_IT_ALL_MSG};
use crate::db::World;
use crate::depot::DepotId;
use crate::game::{send_to_char, Game};
use crate::structs::{CharData, Direction};

/*
 * One whitespace-delimited word of player input.  A word may carry a
 * leading quantity ("5*apple") and a trailing ordinal ("apple.2"); both
 * are stripped exactly once at construction, quantity first, then the
 * ordinal on whatever remained.  A word that is nothing but a number is
 * left alone (it is an argument in its own right, not a modified name).
 */
#[derive(Debug, Clone)]
pub struct Token {
    original: String,
    content: String,
    multiplier: u32,
    /* some commands walk this forward while disambiguating, so it stays open */
    pub index: i32,
    offset: usize,
}

impl Token {
    pub fn new(raw: &str) -> Token {
        Token::at_offset(raw, 0)
    }

    fn at_offset(raw: &str, offset: usize) -> Token {
        let mut content = raw.to_lowercase();
        let mut multiplier: u32 = 1;
        let mut index: i32 = 1;

        if raw.parse::<i32>().is_err() {
            if let Some(star) = content.find('*') {
                let head = &content[..star];
                if !head.is_empty() {
                    if let Ok(n) = head.parse::<i32>() {
                        /* out-of-range or senseless counts leave the word untouched */
                        if n > 0 {
                            multiplier = n as u32;
                            content = content[star + 1..].to_string();
                        }
                    }
                }
            }
            if let Some(dot) = content.find('.') {
                let tail = &content[dot + 1..];
                if let Ok(n) = tail.parse::<i32>() {
                    if n > 0 {
                        index = n;
                        content.truncate(dot);
                    }
                }
            }
        }

        Token {
            original: raw.to_string(),
            content,
            multiplier,
            index,
            offset,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/*
 * The tokenized form of one input line.  The untouched line is kept
 * around so trailing free-form text (says, emotes) comes back with its
 * original spacing and casing.
 */
pub struct TokenHandler {
    original: String,
    tokens: Vec<Token>,
}

impl TokenHandler {
    pub fn new(line: &str) -> TokenHandler {
        let mut tokens = vec![];
        let mut rest = line;
        let mut base = 0usize;
        loop {
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                break;
            }
            base += rest.len() - trimmed.len();
            let end = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            tokens.push(Token::at_offset(&trimmed[..end], base));
            base += end;
            rest = &trimmed[end..];
        }
        TokenHandler {
            original: line.to_string(),
            tokens,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Token> {
        self.tokens.get_mut(i)
    }

    /*
     * The original line from the i-th token onward, spacing and casing
     * intact.  Out of range hands back the whole line; callers use that
     * when "the rest" legitimately may be everything.
     */
    pub fn substr(&self, from: usize) -> &str {
        match self.tokens.get(from) {
            Some(t) => &self.original[t.offset..],
            None => &self.original,
        }
    }

    /* drop token i; later tokens shift down one position */
    pub fn erase(&mut self, i: usize) -> Option<Token> {
        if i < self.tokens.len() {
            Some(self.tokens.remove(i))
        } else {
            None
        }
    }
}

impl Index<usize> for TokenHandler {
    type Output = Token;

    /* unchecked by design; hot-path code validates len() once up front */
    fn index(&self, i: usize) -> &Token {
        &self.tokens[i]
    }
}

pub type CommandHandler =
    fn(&mut Game, &mut World, DepotId, &mut TokenHandler, i32) -> bool;

/* do_gen_door */
pub const SCMD_OPEN: i32 = 0;
pub const SCMD_CLOSE: i32 = 1;

#[derive(Clone, Copy)]
pub struct CommandInfo {
    pub command: &'static str,
    pub handler: CommandHandler,
    pub help: &'static str,
    pub usage: &'static str,
    pub staff_only: bool,
    pub usable_in_combat: bool,
    pub exact_only: bool,
    pub subcmd: i32,
}

pub enum Resolution {
    Command(usize),
    CombatRestricted(usize),
    ExactRequired(usize),
    Unknown,
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandInfo>,
}

impl CommandRegistry {
    pub fn new() -> CommandRegistry {
        CommandRegistry { commands: vec![] }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn register(
        &mut self,
        command: &'static str,
        handler: CommandHandler,
        help: &'static str,
        usage: &'static str,
        staff_only: bool,
        usable_in_combat: bool,
        exact_only: bool,
        subcmd: i32,
    ) {
        if self.commands.iter().any(|c| c.command == command) {
            error!("SYSERR: duplicate command registration: {}", command);
            return;
        }
        self.commands.push(CommandInfo {
            command,
            handler,
            help,
            usage,
            staff_only,
            usable_in_combat,
            exact_only,
            subcmd,
        });
    }

    pub fn get(&self, i: usize) -> CommandInfo {
        self.commands[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandInfo> {
        self.commands.iter()
    }

    /*
     * Registration order is the priority order: the first command the
     * typed verb is a prefix of wins, which is why frequently-typed
     * commands sit near the top of the master list.  Commands the actor
     * is not privileged for are passed over as if they did not exist.
     * The combat and exact-match gates, on the other hand, apply to the
     * first command that matched and end the scan: a fighting player who
     * types an abbreviation gets told off rather than silently handed
     * some later command sharing the prefix.
     */
    pub fn resolve(&self, verb: &str, ch: &CharData) -> Resolution {
        if verb.is_empty() {
            return Resolution::Unknown;
        }
        let typed = verb.to_lowercase();
        for (i, cmd) in self.commands.iter().enumerate() {
            if !cmd.command.starts_with(typed.as_str()) {
                continue;
            }
            if cmd.staff_only && !ch.is_staff() {
                continue;
            }
            if ch.in_combat() && !cmd.usable_in_combat {
                return Resolution::CombatRestricted(i);
            }
            if cmd.exact_only && typed != cmd.command {
                return Resolution::ExactRequired(i);
            }
            return Resolution::Command(i);
        }
        Resolution::Unknown
    }
}

/* This is the Master Command List(tm).
 *
 * The order of registration is the order of precedence for abbreviated
 * input: to make "k" mean "kill" instead of some other k-command, put
 * "kill" first.  Utility commands people type constantly belong high up;
 * dangerous or rarely-used commands belong low, and the truly
 * destructive ones are registered exact-only so a slipped prefix never
 * fires them.
 */
pub fn assign_commands(reg: &mut CommandRegistry) {
    reg.register("look", do_look, "Look around, or at something in particular.", "look [target]", false, true, false, 0);
    reg.register("get", do_get, "Pick something up.", "get [<n>*]<item>[.<n>]", false, false, false, 0);
    reg.register("take", do_get, "Pick something up.", "take [<n>*]<item>[.<n>]", false, false, false, 0);
    reg.register("drop", do_drop, "Put something down.", "drop [<n>*]<item>[.<n>]", false, false, false, 0);
    reg.register("give", do_give, "Hand something to someone.", "give [<n>*]<item> <person>", false, false, false, 0);
    reg.register("inventory", do_inventory, "List what you are carrying.", "inventory", false, true, false, 0);
    reg.register("say", do_say, "Say something out loud.", "say <message>", false, true, false, 0);
    reg.register("'", do_say, "Say something out loud.", "'<message>", false, true, false, 0);
    reg.register("shout", do_shout, "Shout something to the whole world.", "shout <message>", false, true, false, 0);
    reg.register("emote", do_emote, "Show everyone what you are doing.", "emote <action>", false, true, false, 0);
    reg.register("exits", do_exits, "List the obvious exits.", "exits", false, true, false, 0);
    reg.register("who", do_who, "List who is playing.", "who", false, true, false, 0);
    reg.register("score", do_score, "Show your vital statistics.", "score", false, true, false, 0);
    reg.register("time", do_time, "Show the server time and uptime.", "time", false, true, false, 0);
    reg.register("help", do_help, "Get help on a command.", "help [command]", false, true, false, 0);
    reg.register("commands", do_commands, "List the commands you can use.", "commands", false, true, false, 0);
    reg.register("stand", do_stand, "Stand up.", "stand", false, false, false, 0);
    reg.register("crouch", do_crouch, "Drop to a crouch.", "crouch", false, false, false, 0);
    reg.register("prone", do_prone, "Lie flat on the ground.", "prone", false, false, false, 0);
    reg.register("sit", do_sit, "Sit down.", "sit", false, false, false, 0);
    reg.register("rest", do_rest, "Sit down and rest your bones.", "rest", false, false, false, 0);
    reg.register("sleep", do_sleep, "Go to sleep.", "sleep", false, false, false, 0);
    reg.register("wake", do_wake, "Wake up, or stop resting.", "wake", false, false, false, 0);
    reg.register("open", do_gen_door, "Open a door.", "open <door> [direction]", false, false, false, SCMD_OPEN);
    reg.register("close", do_gen_door, "Close a door.", "close <door> [direction]", false, false, false, SCMD_CLOSE);
    reg.register("kill", do_kill, "Attack someone.", "kill <victim>", false, false, false, 0);
    reg.register("flee", do_flee, "Get out of a fight, fast.", "flee", false, true, false, 0);
    reg.register("aim", do_aim, "Take careful aim at someone.", "aim <victim>", false, true, false, 0);
    reg.register("butcher", do_butcher, "Carve a corpse for its usable parts.", "butcher [corpse]", false, false, false, 0);
    reg.register("build", do_build, "Assemble a structure from components.", "build [plan]", false, false, false, 0);
    reg.register("stop", do_stop, "Stop whatever you are doing.", "stop", false, true, false, 0);
    reg.register("wait", do_wait, "Do nothing for a moment.", "wait", false, false, false, 0);
    reg.register("quit", do_quit, "Leave the game.", "quit", false, false, true, 0);
    /* staff commands stay at the bottom; mortals scan straight past them */
    reg.register("goto", do_goto, "Jump to a room by number.", "goto <vnum>", true, false, false, 0);
    reg.register("stat", do_stat, "Inspect the innards of a character.", "stat <name>", true, true, false, 0);
    reg.register("shutdown", do_shutdown, "Shut the game down.", "shutdown", true, false, true, 0);
}

/*
 * The main entry point for player input while playing.  Returns true
 * when some command function ran, whatever its in-game outcome; false
 * when the line was rejected at resolution.  Either way the exchange is
 * closed with a blank separator line, which clients rely on.
 */
pub fn command_interpreter(
    game: &mut Game,
    world: &mut World,
    chid: DepotId,
    argument: &str,
) -> bool {
    let argument = argument.trim_start();

    /*
     * One-character, non-alphanumeric commands ("'hello") split before
     * tokenization so the quote itself becomes the verb.
     */
    let (verb, mut args) = match argument.chars().next() {
        None => {
            send_to_char(&mut game.descriptors, world.ch(chid), HUH);
            finish(game, world, chid);
            return false;
        }
        Some(c) if !c.is_alphanumeric() => (
            c.to_string(),
            TokenHandler::new(&argument[c.len_utf8()..]),
        ),
        Some(_) => {
            let mut th = TokenHandler::new(argument);
            let verb = th[0].content().to_string();
            th.erase(0);
            (verb, th)
        }
    };

    let handled = match game.registry.resolve(&verb, world.ch(chid)) {
        Resolution::Command(i) => {
            let cmd = game.registry.get(i);
            interrupt_action(game, world, chid);
            (cmd.handler)(game, world, chid, &mut args, cmd.subcmd)
        }
        Resolution::CombatRestricted(_) => {
            send_to_char(&mut game.descriptors, world.ch(chid), IN_COMBAT_MSG);
            false
        }
        Resolution::ExactRequired(_) => {
            send_to_char(&mut game.descriptors, world.ch(chid), TYPE_IT_ALL_MSG);
            false
        }
        Resolution::Unknown => {
            if let Some(dir) = Direction::find(&verb, false) {
                /* movement does its own gatekeeping (combat lock, posture, stamina) */
                interrupt_action(game, world, chid);
                start_move(game, world, chid, dir)
            } else if let Some(prof) = find_profession(&verb) {
                interrupt_action(game, world, chid);
                do_profession(game, world, chid, &mut args, prof)
            } else {
                send_to_char(&mut game.descriptors, world.ch(chid), HUH);
                false
            }
        }
    };

    finish(game, world, chid);
    handled
}

fn finish(game: &mut Game, world: &World, chid: DepotId) {
    send_to_char(&mut game.descriptors, world.ch(chid), "\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_plain_word() {
        let t = Token::new("Sword");
        assert_eq!(t.content(), "sword");
        assert_eq!(t.original(), "Sword");
        assert_eq!(t.multiplier(), 1);
        assert_eq!(t.index, 1);
    }

    #[test]
    fn token_full_grammar() {
        let t = Token::new("3*sword.2");
        assert_eq!(t.content(), "sword");
        assert_eq!(t.multiplier(), 3);
        assert_eq!(t.index, 2);
    }

    #[test]
    fn token_multiplier_only() {
        let t = Token::new("5*apple");
        assert_eq!(t.content(), "apple");
        assert_eq!(t.multiplier(), 5);
        assert_eq!(t.index, 1);
    }

    #[test]
    fn token_index_only() {
        let t = Token::new("apple.2");
        assert_eq!(t.content(), "apple");
        assert_eq!(t.multiplier(), 1);
        assert_eq!(t.index, 2);
    }

    #[test]
    fn token_pure_number_is_left_alone() {
        let t = Token::new("42");
        assert_eq!(t.content(), "42");
        assert_eq!(t.multiplier(), 1);
        assert_eq!(t.index, 1);
    }

    #[test]
    fn token_overflow_degrades_to_literal() {
        let t = Token::new("99999999999*sword");
        assert_eq!(t.content(), "99999999999*sword");
        assert_eq!(t.multiplier(), 1);
    }

    #[test]
    fn token_empty_content_is_legal() {
        let t = Token::new("5*");
        assert_eq!(t.content(), "");
        assert_eq!(t.multiplier(), 5);
        assert!(t.is_empty());
    }

    #[test]
    fn token_construction_is_idempotent() {
        let first = Token::new("7*bread.4");
        let again = Token::new(first.content());
        assert_eq!(again.content(), first.content());
        assert_eq!(again.multiplier(), 1);
        assert_eq!(again.index, 1);
    }

    #[test]
    fn handler_splits_and_counts() {
        let th = TokenHandler::new("get 2*bread.3 sack");
        assert_eq!(th.len(), 3);
        assert_eq!(th[0].content(), "get");
        assert_eq!(th[1].content(), "bread");
        assert_eq!(th[1].multiplier(), 2);
        assert_eq!(th[1].index, 3);
        assert_eq!(th[2].content(), "sack");
    }

    #[test]
    fn handler_substr_preserves_spacing_and_case() {
        let th = TokenHandler::new("say   Hello   THERE  friend");
        assert_eq!(th.substr(1), "Hello   THERE  friend");
        assert_eq!(th.substr(3), "friend");
    }

    #[test]
    fn handler_substr_out_of_range_returns_whole_line() {
        let th = TokenHandler::new("one two");
        assert_eq!(th.substr(5), "one two");
    }

    #[test]
    fn handler_erase_shifts_positions() {
        let mut th = TokenHandler::new("kill the rat");
        assert!(th.erase(0).is_some());
        assert_eq!(th.len(), 2);
        assert_eq!(th[0].content(), "the");
        assert_eq!(th.substr(0), "the rat");
        assert!(th.erase(9).is_none());
    }
}
