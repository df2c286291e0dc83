/* ************************************************************************
*   File: game.rs                                        Part of DuskMUD  *
*  Usage: communication, socket handling, central game loop               *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use log::{error, info};
use regex::Regex;

use crate::act_informative::look_at_room;
use crate::action::update_actions;
use crate::config::{
    GREETINGS, MAX_INPUT_LENGTH, MAX_PLAYING, OPT_USEC, PASSES_PER_SEC, PULSE_ACTION,
    PULSE_MOBILE, PULSE_POINTS, WELC_MESSG,
};
use crate::db::{create_player, World};
use crate::depot::{Depot, DepotId, HasId};
use crate::handler::{char_to_room, extract_char};
use crate::interpreter::{assign_commands, command_interpreter, CommandRegistry};
use crate::limits::point_update;
use crate::mobact::mobile_activity;
use crate::structs::{CharData, Posture};

pub const TO_ROOM: i32 = 1;
pub const TO_VICT: i32 = 2;
pub const TO_NOTVICT: i32 = 3;
pub const TO_CHAR: i32 = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConState {
    ConGetName,
    ConPlaying,
    ConClose,
}

pub struct DescriptorData {
    id: DepotId,
    pub stream: Option<TcpStream>,
    pub host: String,
    pub state: ConState,
    pub character: Option<DepotId>,
    inbuf: String,
    input: VecDeque<String>,
    pub output: Vec<u8>,
}

impl HasId for DescriptorData {
    fn id(&self) -> DepotId {
        self.id
    }
    fn set_id(&mut self, id: DepotId) {
        self.id = id;
    }
}

impl DescriptorData {
    fn new(stream: Option<TcpStream>, host: String) -> DescriptorData {
        DescriptorData {
            id: DepotId::default(),
            stream,
            host,
            state: ConState::ConGetName,
            character: None,
            inbuf: String::new(),
            input: VecDeque::new(),
            output: vec![],
        }
    }

    /* a descriptor with no socket behind it; output just accumulates */
    pub fn detached() -> DescriptorData {
        DescriptorData::new(None, "<detached>".to_string())
    }

    pub fn queue_command(&mut self, line: &str) {
        self.input.push_back(line.to_string());
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).to_string()
    }

    pub fn take_output(&mut self) -> String {
        let out = self.output_str();
        self.output.clear();
        out
    }

    fn write_to_output(&mut self, msg: &str) {
        self.output.extend_from_slice(msg.as_bytes());
    }
}

pub struct Game {
    pub descriptors: Depot<DescriptorData>,
    pub registry: CommandRegistry,
    pub shutdown: bool,
    pub boot_time: DateTime<Local>,
    listener: Option<TcpListener>,
    name_rule: Regex,
}

impl Game {
    pub fn new() -> Game {
        let mut registry = CommandRegistry::new();
        assign_commands(&mut registry);
        Game {
            descriptors: Depot::new(),
            registry,
            shutdown: false,
            boot_time: Local::now(),
            listener: None,
            name_rule: Regex::new("^[A-Za-z][A-Za-z'-]{1,11}$").unwrap(),
        }
    }

    pub fn desc(&self, d_id: DepotId) -> &DescriptorData {
        self.descriptors.get(d_id)
    }

    pub fn desc_mut(&mut self, d_id: DepotId) -> &mut DescriptorData {
        self.descriptors.get_mut(d_id)
    }

    pub fn set_listener(&mut self, listener: TcpListener) {
        self.listener = Some(listener);
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

/* ------------------------------------------------------------------ */
/* output plumbing                                                     */
/* ------------------------------------------------------------------ */

pub fn send_to_char(descs: &mut Depot<DescriptorData>, ch: &CharData, msg: &str) {
    if let Some(d_id) = ch.desc {
        descs.get_mut(d_id).write_to_output(msg);
    }
}

pub fn send_to_room(descs: &mut Depot<DescriptorData>, world: &World, rid: DepotId, msg: &str) {
    for &chid in &world.room(rid).people {
        let ch = world.ch(chid);
        if ch.posture > Posture::Sleeping {
            send_to_char(descs, ch, msg);
        }
    }
}

pub fn send_to_all(descs: &mut Depot<DescriptorData>, msg: &str) {
    for d_id in descs.ids() {
        if descs.get(d_id).state == ConState::ConPlaying {
            descs.get_mut(d_id).write_to_output(msg);
        }
    }
}

/*
 * The workhorse narration function.  Substitutions: $n actor, $N
 * victim, $p item, $$ a literal dollar sign.  The finished sentence is
 * capitalized and delivered to the audience picked by `to`.
 */
pub fn act(
    descs: &mut Depot<DescriptorData>,
    world: &World,
    msg: &str,
    chid: DepotId,
    oid: Option<DepotId>,
    vict: Option<DepotId>,
    to: i32,
) {
    let mut out = String::with_capacity(msg.len() + 16);
    let mut rest = msg;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];
        match rest.chars().next() {
            Some('n') => out.push_str(world.ch(chid).pers()),
            Some('N') => match vict {
                Some(v) => out.push_str(world.ch(v).pers()),
                None => error!("SYSERR: act: $N with no victim: {}", msg),
            },
            Some('p') => match oid {
                Some(o) => out.push_str(&world.obj(o).short_desc),
                None => error!("SYSERR: act: $p with no object: {}", msg),
            },
            Some('$') => out.push('$'),
            Some(c) => error!("SYSERR: act: unknown code ${}: {}", c, msg),
            None => break,
        }
        rest = &rest[rest.chars().next().map_or(0, |c| c.len_utf8())..];
    }
    out.push_str(rest);

    /* sentence case, plus the line ending every client expects */
    if let Some(first) = out.chars().next() {
        if first.is_ascii_lowercase() {
            out.replace_range(..1, &first.to_ascii_uppercase().to_string());
        }
    }
    out.push_str("\r\n");

    match to {
        TO_CHAR => send_to_char(descs, world.ch(chid), &out),
        TO_VICT => {
            if let Some(v) = vict {
                send_to_char(descs, world.ch(v), &out);
            }
        }
        TO_ROOM | TO_NOTVICT => {
            if let Some(rid) = world.ch(chid).in_room {
                for &other in &world.room(rid).people {
                    if other == chid {
                        continue;
                    }
                    if to == TO_NOTVICT && Some(other) == vict {
                        continue;
                    }
                    let och = world.ch(other);
                    if och.posture > Posture::Sleeping {
                        send_to_char(descs, och, &out);
                    }
                }
            }
        }
        _ => error!("SYSERR: act: bad target {}", to),
    }
}

/* ------------------------------------------------------------------ */
/* the main loop and its satellites                                    */
/* ------------------------------------------------------------------ */

impl Game {
    /*
     * Cycles ten times a second.  All gameplay mutation happens on this
     * one thread: input is parsed and dispatched here, and the same
     * pulse counter drives the heartbeat that polls pending actions.
     * When the loop oversleeps it runs the missed pulses back to back
     * rather than letting the world drift.
     */
    pub fn game_loop(&mut self, world: &mut World, halt: &Arc<AtomicBool>) {
        let opt_time = Duration::from_micros(OPT_USEC as u64);
        let mut pulse: u128 = 0;
        let mut last_time = Instant::now();

        while !self.shutdown && !halt.load(Ordering::Relaxed) {
            let now = Instant::now();
            let since = now.duration_since(last_time);
            if since < opt_time {
                thread::sleep(opt_time - since);
            }

            let mut missed_pulses =
                (Instant::now().duration_since(last_time).as_micros() / OPT_USEC as u128).max(1);
            if missed_pulses > (30 * PASSES_PER_SEC) as u128 {
                error!(
                    "SYSERR: Missed {} seconds worth of pulses.",
                    missed_pulses / PASSES_PER_SEC as u128
                );
                missed_pulses = (30 * PASSES_PER_SEC) as u128;
            }
            last_time += opt_time * missed_pulses as u32;

            self.accept_new_connections();

            for d_id in self.descriptors.ids() {
                self.process_input(d_id);
            }

            /* one queued command per descriptor per pulse */
            for d_id in self.descriptors.ids() {
                let line = match self.desc_mut(d_id).input.pop_front() {
                    Some(line) => line,
                    None => continue,
                };
                match self.desc(d_id).state {
                    ConState::ConGetName => nanny(self, world, d_id, &line),
                    ConState::ConPlaying => {
                        if let Some(chid) = self.desc(d_id).character {
                            command_interpreter(self, world, chid, &line);
                        }
                    }
                    ConState::ConClose => (),
                }
            }

            for d_id in self.descriptors.ids() {
                self.process_output(d_id);
            }

            for d_id in self.descriptors.ids() {
                if self.desc(d_id).state == ConState::ConClose {
                    self.close_socket(world, d_id);
                }
            }

            while missed_pulses > 0 {
                pulse += 1;
                self.heartbeat(world, pulse);
                missed_pulses -= 1;
            }

            /* roll pulse over after 10 hours */
            if pulse >= 10 * 60 * 60 * PASSES_PER_SEC as u128 {
                pulse = 0;
            }
        }
    }

    pub fn heartbeat(&mut self, world: &mut World, pulse: u128) {
        if pulse % PULSE_ACTION == 0 {
            update_actions(self, world);
        }
        if pulse % PULSE_MOBILE == 0 {
            mobile_activity(self, world);
        }
        if pulse % PULSE_POINTS == 0 {
            point_update(world);
        }
    }

    fn accept_new_connections(&mut self) {
        loop {
            let accept_result = match &self.listener {
                Some(l) => l.accept(),
                None => return,
            };
            match accept_result {
                Ok((stream, addr)) => {
                    if self.descriptors.len() >= MAX_PLAYING {
                        let mut stream = stream;
                        let _ = stream.write_all(b"Sorry, the game is full right now.\r\n");
                        continue;
                    }
                    if let Err(e) = stream.set_nonblocking(true) {
                        error!("SYSERR: could not set socket non-blocking: {}", e);
                        continue;
                    }
                    let host = dns_lookup::lookup_addr(&addr.ip())
                        .unwrap_or_else(|_| addr.ip().to_string());
                    info!("New connection from {}.", host);
                    let d_id = self
                        .descriptors
                        .push(DescriptorData::new(Some(stream), host));
                    self.desc_mut(d_id).write_to_output(GREETINGS);
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    error!("SYSERR: could not accept client: {}", e);
                    break;
                }
            }
        }
    }

    fn process_input(&mut self, d_id: DepotId) {
        let mut buf = [0u8; 512];
        loop {
            let desc = self.desc_mut(d_id);
            let stream = match desc.stream.as_mut() {
                Some(s) => s,
                None => break,
            };
            match stream.read(&mut buf) {
                Ok(0) => {
                    desc.state = ConState::ConClose;
                    break;
                }
                Ok(n) => {
                    for &b in &buf[..n] {
                        let c = b as char;
                        if c == '\n' || c.is_ascii_graphic() || c == ' ' || c == '\t' {
                            desc.inbuf.push(c);
                        }
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    error!("SYSERR: read from {} failed: {}", desc.host, e);
                    desc.state = ConState::ConClose;
                    break;
                }
            }
        }

        /* peel off finished lines */
        let desc = self.desc_mut(d_id);
        while let Some(nl) = desc.inbuf.find('\n') {
            let mut line: String = desc.inbuf.drain(..=nl).collect();
            line.truncate(line.trim_end().len());
            line.truncate(MAX_INPUT_LENGTH);
            desc.input.push_back(line);
        }
    }

    fn process_output(&mut self, d_id: DepotId) {
        let prompt = self.make_prompt(d_id);
        let desc = self.desc_mut(d_id);
        if desc.output.is_empty() {
            return;
        }
        let mut out = std::mem::take(&mut desc.output);
        out.extend_from_slice(prompt.as_bytes());
        if let Some(stream) = desc.stream.as_mut() {
            if let Err(e) = stream.write_all(&out) {
                error!("SYSERR: write to {} failed: {}", desc.host, e);
                desc.state = ConState::ConClose;
            }
        } else {
            /* no socket: keep accumulating for whoever is watching */
            desc.output = out;
        }
    }

    fn make_prompt(&self, d_id: DepotId) -> String {
        match self.desc(d_id).state {
            ConState::ConPlaying => "> ".to_string(),
            _ => String::new(),
        }
    }

    pub fn close_socket(&mut self, world: &mut World, d_id: DepotId) {
        let host = self.desc(d_id).host.clone();
        if let Some(chid) = self.desc(d_id).character {
            if world.chars.contains(chid) {
                let name = world.ch(chid).name.clone();
                info!("Closing link to: {} ({}).", name, host);
                act(
                    &mut self.descriptors,
                    world,
                    "$n has left the game.",
                    chid,
                    None,
                    None,
                    TO_ROOM,
                );
                extract_char(world, chid);
            }
        } else {
            info!("Losing descriptor without char ({}).", host);
        }
        self.descriptors.remove(d_id);
    }
}

/*
 * The login conversation.  There are no accounts to look up; a valid,
 * unused name walks straight into the square.
 */
pub fn nanny(game: &mut Game, world: &mut World, d_id: DepotId, arg: &str) {
    let arg = arg.trim();
    if arg.is_empty() {
        game.desc_mut(d_id)
            .write_to_output("By what name do you wish to be known? ");
        return;
    }
    if !game.name_rule.is_match(arg) {
        game.desc_mut(d_id)
            .write_to_output("Invalid name, please try another.\r\nName: ");
        return;
    }
    let name = {
        let mut chars = arg.chars();
        let first = chars.next().unwrap().to_ascii_uppercase();
        format!("{}{}", first, chars.as_str().to_ascii_lowercase())
    };
    let taken = world
        .chars
        .iter()
        .any(|ch| !ch.is_npc() && ch.name == name);
    if taken {
        game.desc_mut(d_id)
            .write_to_output("That name is already in use.  Try another.\r\nName: ");
        return;
    }

    info!("{} [{}] has entered the game.", name, game.desc(d_id).host);
    let chid = create_player(world, &name);
    /* the very first soul through the door keeps the keys */
    let staff = !world.chars.iter().any(|ch| !ch.is_npc() && ch.staff);
    world.ch_mut(chid).staff = staff;
    world.ch_mut(chid).desc = Some(d_id);
    game.desc_mut(d_id).character = Some(chid);
    game.desc_mut(d_id).state = ConState::ConPlaying;

    let start = world.start_room.expect("world not booted");
    char_to_room(world, chid, start);
    game.desc_mut(d_id).write_to_output(WELC_MESSG);
    act(
        &mut game.descriptors,
        world,
        "$n steps out of the gloom.",
        chid,
        None,
        None,
        TO_ROOM,
    );
    look_at_room(game, world, chid);
}
