use std::{path::PathBuf, sync::{Arc, Mutex, OnceLock}};
use clap::Parser;

use crate::history::RecencyBuffer;
use crate::signal::IrSignal;
use crate::term;

static PROGRAM_ARGS: OnceLock<ProgramArgs> = OnceLock::new();

pub fn set_args(args: ProgramArgs) -> &'static ProgramArgs {
    PROGRAM_ARGS.set(args).unwrap();
    return get_args();
}

pub fn get_args() -> &'static ProgramArgs {
    match PROGRAM_ARGS.get() {
        Some(args) => args,
        None => panic!("Attempted to retrieve program args before they were initialized!")
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
pub struct ProgramArgs {
    /// The local port on which to serve the web remote
    #[arg(short='p', long="port", value_name="PORT", default_value_t=8080)]
    pub port: u16,

    /// How many received signals the history retains before the oldest is overwritten
    #[arg(short='n', long="capacity", value_name="COUNT", default_value_t=5)]
    pub capacity: usize,

    /// The command whose stdout carries decoded IR signals
    #[arg(long="receive-cmd", value_name="COMMAND", default_value="ir-keytable -t")]
    pub receive_cmd: String,

    /// The command used to transmit NEC scancodes
    #[arg(long="send-cmd", value_name="COMMAND", default_value="ir-ctl")]
    pub send_cmd: String,

    /// The lirc character device handed to the send command
    #[arg(short='i', long="ir-device", value_name="DEVICE", value_hint=clap::ValueHint::FilePath)]
    pub ir_device: Option<PathBuf>,

    /// The delay between passive terminal redraws in milliseconds
    #[arg(short='d', long="redraw-delay", value_name="MILLISECONDS", default_value_t=250)]
    pub terminal_redraw_delay: u64,

    /// Disables the terminal status view, log lines go to stderr instead
    #[arg(short='e', long="no-interact", default_value_t=false)]
    pub no_interactivity: bool,

    /// Where to mirror log lines on disk, defaults to the user's local data directory
    #[arg(long="log-dir", value_name="PATH", value_hint=clap::ValueHint::DirPath)]
    pub log_dir: Option<PathBuf>
}

pub struct ProgramInfo {
    pub main_log: Arc<term::Log>,
    pub srvr_log: Arc<term::Log>,
    pub history: Arc<Mutex<RecencyBuffer<IrSignal>>>
}
