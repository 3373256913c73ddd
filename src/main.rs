use std::{
    error::Error,
    io::{self, BufRead},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
};

use chrono::{NaiveTime, Timelike};
use clap::{Parser, Subcommand};
use log::{error, info};
use rooster_alarm::{
    alarm::{parse_time, AlarmState},
    clock::{Clock, SystemClock},
    communication,
    config::Config,
    session::{Notice, Session},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}
#[derive(Subcommand)]
enum Command {
    /// write the default config file
    Init {
        #[clap(long, short)]
        force: bool,
    },
    /// show how long until HH:MM and exit
    Until {
        #[clap(value_parser = parse_time)]
        time: NaiveTime,
    },
    /// set the alarm for HH:MM and wait for it
    Set {
        #[clap(value_parser = parse_time)]
        time: NaiveTime,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    simple_file_logger::init_logger!("rooster_alarm").expect("couldn't initialize logger");

    let args = Args::parse();
    let config_path = Config::config_path()?;
    match args.command {
        Command::Init { force } => {
            if force || !Config::is_config_present() {
                Config::new().save(&config_path)?;
                println!("wrote {}", config_path.display());
            } else {
                println!(
                    "{} already exists, use --force to overwrite it",
                    config_path.display()
                );
            }
        }
        Command::Until { time } => {
            let config = Config::load_or_default(&config_path)?;
            let mut alarm = AlarmState::new();
            alarm.arm_at(time);
            if let Some(left) = alarm.time_until(SystemClock.now()) {
                show(&Notice::Countdown { left }, &config);
            }
        }
        Command::Set { time } => {
            let config = Config::load_or_default(&config_path)?;
            run(&config, time)?;
        }
    }
    Ok(())
}

fn run(config: &Config, time: NaiveTime) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(SystemClock, config.snooze_minutes)?;
    for notice in session.set_alarm(time.hour(), time.minute())? {
        show(&notice, config);
    }
    println!("type s to snooze, x to stop, ? for status, q to quit");

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<communication::Command>() {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{e}"),
            }
        }
    });

    loop {
        match rx.recv_timeout(config.tick()) {
            Ok(command) => match session.handle(command) {
                Ok(Some(notice)) => {
                    show(&notice, config);
                    if notice == Notice::Stopped {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => error!("{e}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("input closed, leaving");
                break;
            }
        }
        if let Some(notice) = session.tick() {
            show(&notice, config);
        }
    }
    Ok(())
}

fn show(notice: &Notice, config: &Config) {
    if matches!(notice, Notice::Ringing { .. }) {
        // terminal bell
        print!("\x07");
    }
    println!("{}", notice.render(&config.time_format));
}
