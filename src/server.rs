use std::sync::Mutex;
use std::{error::Error, fmt::Display, sync::mpsc::Sender, thread::JoinHandle};

use rouille::{Request, Response};

use crate::history::RecencyBuffer;
use crate::page;
use crate::program_info::{self, ProgramInfo};
use crate::signal::{self, IrSignal};
use crate::term;
use crate::transceiver;

#[derive(Debug)]
pub enum ServerError {
    // Thank you rouille for this amazing type signature
    RouilleErr(Box<dyn Error + Send + Sync + 'static>)
}

impl Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::RouilleErr(e) => e.fmt(f)
        }
    }
}

impl Error for ServerError {}

fn history_snapshot(history: &Mutex<RecencyBuffer<IrSignal>>) -> Vec<IrSignal> {
    // len() and every get() happen under one lock; a push in between would
    // shift which slot a recency index names
    let buffer = history.lock().unwrap();
    if buffer.is_empty() { return Vec::new(); }

    let mut snapshot = Vec::with_capacity(buffer.len());
    for i in 0..buffer.len() {
        snapshot.push(buffer.get(i).expect("index bounded by len").clone());
    }

    return snapshot;
}

fn send_ir(request: &Request, log: &term::Log) -> Response {
    let hex_code = match request.get_param("hex_code") {
        Some(h) => h,
        None => {
            log.log_err("Received /send_ir request without a hex_code parameter");
            return Response::text("missing hex_code parameter").with_status_code(400);
        }
    };

    let code = match signal::parse_hex_code(&hex_code) {
        Ok(c) => c,
        Err(e) => {
            log.log_err(format!("Rejected send request for \'{}\':\n{}", hex_code, e));
            return Response::text(format!("error \'{}\' while parsing hex code", e)).with_status_code(400);
        }
    };

    return match transceiver::send_code(code) {
        Ok(_) => {
            log.log_success(format!("Sent 0x{:X}", code));
            Response::text("code sent")
        },
        Err(e) => {
            log.log_err(e.to_string());
            Response::text(format!("error \'{}\' while transmitting", e)).with_status_code(500)
        }
    };
}

fn server_requests_loop(request: &Request, history: &Mutex<RecencyBuffer<IrSignal>>, log: &term::Log) -> Response {
    let requrl = request.url();
    let reqmethod = request.method();

    if reqmethod != "GET" {
        log.log_err(format!("Received request to \'{}\' of invalid HTTP method \'{}\'", requrl, reqmethod));
        return Response::empty_400();
    }

    return match requrl.as_str() {
        "/" => Response::html(page::index_page(&history_snapshot(history))),
        "/style.css" => Response::from_data("text/css", page::STYLESHEET),
        "/send_ir" => send_ir(request, log),
        _ => {
            log.log_err(format!("Received request to invalid endpoint \'{}\'", requrl));
            Response::empty_404()
        }
    };
}

pub fn start(program: &ProgramInfo) -> Result<(JoinHandle<()>, Sender<()>), ServerError> {
    let program_args = program_info::get_args();

    let srvr_log = program.srvr_log.clone();
    let history = program.history.clone();
    let server_start_result = rouille::Server::new(format!("localhost:{}", program_args.port), move | request | {
        term::Log::set(srvr_log.clone());
        return server_requests_loop(request, &history, &srvr_log);
    });

    let server = match server_start_result {
        Ok(s) => s,
        Err(e) => return Err(ServerError::RouilleErr(e))
    };

    program.srvr_log.log_success(format!("Serving the remote on http://localhost:{}", program_args.port));

    return Ok(server.stoppable());
}
