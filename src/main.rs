use std::{fs, path::PathBuf, sync::{Arc, Mutex}};

use clap::Parser;
use console::{Key, Term};

mod history;
mod main_err;
mod page;
mod program_info;
mod server;
mod signal;
mod term;
mod transceiver;

use history::RecencyBuffer;
use main_err::MainErr;
use program_info::{ProgramArgs, ProgramInfo};

fn main() {
    match run() {
        Ok(_) => (),
        Err(e) => {
            eprintln!("irbridge: {}", e);
            std::process::exit(1);
        }
    }
}

fn resolve_log_dir(program_args: &ProgramArgs) -> Option<PathBuf> {
    return match &program_args.log_dir {
        Some(dir) => Some(dir.clone()),
        None => dirs::data_local_dir().map(|d| { d.join("irbridge") })
    };
}

fn build_log(name: &str, log_dir: &Option<PathBuf>, echo: bool) -> Arc<term::Log> {
    let log = term::Log::new(name).with_stderr_echo(echo);

    let log = match log_dir {
        Some(dir) => log.with_disk_log(dir),
        None => log
    };

    return Arc::new(log);
}

fn wait_for_quit() -> Result<(), MainErr> {
    let terminal = Term::stderr();

    loop {
        match terminal.read_key() {
            Ok(Key::Char('q')) | Ok(Key::Char('Q')) | Ok(Key::CtrlC) => return Ok(()),
            Ok(_) => (),
            Err(e) => return Err(MainErr::IO(e))
        }
    }
}

fn run() -> Result<(), MainErr> {
    let program_args = program_info::set_args(ProgramArgs::parse());

    let log_dir = resolve_log_dir(program_args);
    match &log_dir {
        Some(dir) => fs::create_dir_all(dir)?,
        None => ()
    }

    // Capacity 0 is a configuration error and stops startup here
    let history = Arc::new(Mutex::new(RecencyBuffer::with_capacity(program_args.capacity)?));

    let program = ProgramInfo {
        main_log: build_log("Main Thread", &log_dir, program_args.no_interactivity),
        srvr_log: build_log("Server Thread", &log_dir, program_args.no_interactivity),
        history: history
    };
    term::Log::set(program.main_log.clone());

    program.main_log.log(format!("Retaining the last {} received signals", program.history.lock().unwrap().capacity()));
    program.main_log.log(format!("Watching decoder \'{}\'", program_args.receive_cmd));
    let receiver = transceiver::spawn_receiver(program.main_log.clone(), program.history.clone())?;

    let (server_join, server_stop) = server::start(&program)?;

    if program_args.no_interactivity {
        program.main_log.log("Running without the terminal view, stop with Ctrl-C");
        let _ = server_join.join();
        receiver.stop();
        return Ok(());
    }

    let screen = term::Screen::new(program.main_log.clone(), program.srvr_log.clone());
    let status = screen.status_handle();
    *status.lock().unwrap() = format!("http://localhost:{}  -  press q to quit", program_args.port);

    let (render_kill, render_join) = screen.spawn_threads(program_args.terminal_redraw_delay);

    let quit_result = wait_for_quit();

    // Ordered teardown: stop serving, stop the decoder, then the screen
    let _ = server_stop.send(());
    let _ = server_join.join();
    receiver.stop();
    let _ = render_kill.send(());
    let _ = render_join.join();

    let terminal = Term::stderr();
    let _ = terminal.show_cursor();
    let _ = terminal.write_line("");

    return quit_result;
}
