use std::{error::Error, fmt::Display, io::{self, BufRead, BufReader}, process::{Child, ChildStdout, Command, Stdio}, sync::{Arc, Mutex}, thread::{self, JoinHandle}};

use crate::history::RecencyBuffer;
use crate::program_info;
use crate::signal::IrSignal;
use crate::term::Log;

#[derive(Debug)]
pub enum TransceiverError {
    CommandEmpty,
    NotInstalled(String),
    SpawnFailed(String, io::Error),
    NoStdout(String),
    SendFailed(String)
}

impl Display for TransceiverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandEmpty => f.write_str("transceiver command is empty"),
            Self::NotInstalled(cmd) => f.write_fmt(format_args!("\'{}\' not found, is it installed?", cmd)),
            Self::SpawnFailed(cmd, e) => f.write_fmt(format_args!("failed to start {} with error {}", cmd, e)),
            Self::NoStdout(cmd) => f.write_fmt(format_args!("{} started without a readable stdout", cmd)),
            Self::SendFailed(cmd) => f.write_fmt(format_args!("{} exited with failure", cmd))
        }
    }
}

impl Error for TransceiverError {}

fn build_command(cmdline: &str) -> Result<Command, TransceiverError> {
    let mut parts = cmdline.split_whitespace();

    let program = match parts.next() {
        Some(p) => p,
        None => return Err(TransceiverError::CommandEmpty)
    };

    let mut cmd = Command::new(program);
    cmd.args(parts);
    return Ok(cmd);
}

/// Handle to the decoder child process and the thread draining it.
pub struct Receiver {
    child: Arc<Mutex<Child>>,
    join: JoinHandle<()>
}

impl Receiver {
    /// Kills the decoder, which ends its stream and lets the reader thread
    /// run out.
    pub fn stop(self) {
        let _ = self.child.lock().unwrap().kill();
        let _ = self.join.join();
    }
}

/// Starts the configured decoder command and a named thread that parses its
/// output, logging every decoded signal and recording the accepted ones.
pub fn spawn_receiver(log: Arc<Log>, history: Arc<Mutex<RecencyBuffer<IrSignal>>>) -> Result<Receiver, TransceiverError> {
    let program_args = program_info::get_args();

    let mut cmd = build_command(&program_args.receive_cmd)?;
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::null());

    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => return Err(match e.kind() {
            io::ErrorKind::NotFound => TransceiverError::NotInstalled(program_args.receive_cmd.clone()),
            _ => TransceiverError::SpawnFailed(program_args.receive_cmd.clone(), e)
        })
    };

    let stdout = match child.stdout.take() {
        Some(s) => s,
        None => {
            let _ = child.kill();
            return Err(TransceiverError::NoStdout(program_args.receive_cmd.clone()));
        }
    };

    let child = Arc::new(Mutex::new(child));

    let join = thread::Builder::new().name(String::from("ir-receiver")).spawn(move || {
        Log::set(log.clone());
        return receive_loop(stdout, log, history);
    }).unwrap();

    return Ok(Receiver { child: child, join: join });
}

fn receive_loop(stdout: ChildStdout, log: Arc<Log>, history: Arc<Mutex<RecencyBuffer<IrSignal>>>) {
    let reader = BufReader::new(stdout);

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log.log_err(format!("Lost the decoder stream with error {}", e));
                return;
            }
        };

        match IrSignal::parse_decode_line(&line) {
            // Every decoded signal is logged; only accepted ones are recorded
            Ok(Some(signal)) => {
                log.log(signal.to_string());
                if signal.is_recorded() {
                    history.lock().unwrap().push(signal);
                }
            },
            Ok(None) => (),
            Err(e) => log.log_warn(format!("Ignoring malformed decoder line: {}", e))
        }
    }

    log.log_warn("IR decoder stream closed");
}

/// Transmits one NEC scancode through the configured send command.
pub fn send_code(code: u32) -> Result<(), TransceiverError> {
    let program_args = program_info::get_args();

    let mut cmd = build_command(&program_args.send_cmd)?;
    cmd.arg("-S");
    cmd.arg(format!("nec:0x{:X}", code));
    match &program_args.ir_device {
        Some(device) => { cmd.arg("-d").arg(device); },
        None => ()
    }

    Log::get().log(format!("Transmitting NEC scancode 0x{:X}", code));

    return match cmd.output() {
        Ok(o) => match o.status.success() {
            true => Ok(()),
            false => Err(TransceiverError::SendFailed(format!("{:?}", cmd)))
        },
        Err(e) => match e.kind() {
            io::ErrorKind::NotFound => Err(TransceiverError::NotInstalled(program_args.send_cmd.clone())),
            _ => Err(TransceiverError::SpawnFailed(format!("{:?}", cmd), e))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_lines_split_into_program_and_args() {
        let cmd = build_command("ir-keytable -t -s rc0").unwrap();

        assert_eq!(cmd.get_program().to_str(), Some("ir-keytable"));
        let args: Vec<_> = cmd.get_args().map(|a| { a.to_str().unwrap() }).collect();
        assert_eq!(args, ["-t", "-s", "rc0"]);
    }

    #[test]
    fn blank_command_lines_are_rejected() {
        assert!(matches!(build_command("   "), Err(TransceiverError::CommandEmpty)));
    }
}
