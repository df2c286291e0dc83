/* ************************************************************************
*   File: main.rs                                        Part of DuskMUD  *
*  Usage: command line parsing, logging setup, boot and run               *
*                                                                         *
*  All rights reserved.                                                   *
*                                                                         *
*  Copyright (C) 2025, 2026 by the DuskMUD project                        *
************************************************************************ */

use std::net::{SocketAddr, TcpListener};
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use duskmud::config::DFLT_PORT;
use duskmud::db::{boot_world, check_world, World};
use duskmud::game::Game;

const DUSKMUD_VERSION: &str = "DuskMUD, version 0.1.0";

#[derive(Parser)]
#[command(name = "duskmud", about = "DuskMUD game server", version)]
struct Args {
    /// port to listen on (must be above 1024)
    #[arg(default_value_t = DFLT_PORT)]
    port: u16,

    /// boot the world, verify its cross references, and exit
    #[arg(short, long)]
    check: bool,

    /// write the log to <FILE> as well as the console
    #[arg(short = 'o', long = "logfile")]
    logfile: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_log(args.logfile.as_deref());
    info!("{}", DUSKMUD_VERSION);

    if !args.check && args.port <= 1024 {
        error!("SYSERR: Illegal port number {}.", args.port);
        return ExitCode::FAILURE;
    }

    let mut world = World::new();
    info!("Booting world.");
    boot_world(&mut world);

    if args.check {
        info!("Syntax check mode enabled.");
        return if check_world(&world) {
            info!("World check passed.");
            ExitCode::SUCCESS
        } else {
            error!("World check FAILED.");
            ExitCode::FAILURE
        };
    }

    let halt = Arc::new(AtomicBool::new(false));
    for sig in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        if let Err(e) = signal_hook::flag::register(sig, Arc::clone(&halt)) {
            error!("SYSERR: could not register signal handler: {}", e);
        }
    }

    let mut game = Game::new();
    info!("Running game on port {}.", args.port);
    match init_socket(args.port) {
        Ok(listener) => game.set_listener(listener),
        Err(e) => {
            error!("SYSERR: Error creating socket: {}", e);
            return ExitCode::FAILURE;
        }
    }

    info!("Entering game loop.");
    game.game_loop(&mut world, &halt);

    info!("Closing all sockets.");
    for d_id in game.descriptors.ids() {
        game.close_socket(&mut world, d_id);
    }

    info!("Normal termination of game.");
    ExitCode::SUCCESS
}

/*
 * The mother descriptor: bound, listening, and non-blocking so the
 * game loop can poll it between pulses.
 */
fn init_socket(port: u16) -> std::io::Result<TcpListener> {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let listener = TcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    Ok(listener)
}

fn setup_log(logfile: Option<&str>) {
    let stdout = ConsoleAppender::builder().build();

    let mut config_builder = log4rs::config::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)));
    let mut root_builder = Root::builder().appender("stdout");

    if let Some(logfile) = logfile {
        match FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d} - {m}{n}")))
            .build(logfile)
        {
            Ok(file) => {
                config_builder =
                    config_builder.appender(Appender::builder().build("file", Box::new(file)));
                root_builder = root_builder.appender("file");
            }
            Err(e) => eprintln!("SYSERR: cannot open log file {}: {}", logfile, e),
        }
    }

    let config = config_builder
        .build(root_builder.build(LevelFilter::Info))
        .unwrap();
    log4rs::init_config(config).unwrap();
}
