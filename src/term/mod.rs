use std::{sync::{mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError}, Arc, Mutex}, thread::{self, JoinHandle}, time::Duration};
use console::Term;

mod log;
mod render;

pub use log::Log;
pub use render::Renderable;

use render::Renderer;

/// The live terminal status view: one boxed pane per log plus a status
/// footer showing where the web remote is being served.
pub struct Screen {
    pub main_log: Arc<Log>,
    pub srvr_log: Arc<Log>,

    status: Arc<Mutex<String>>,

    #[allow(dead_code)] // Can be used by consumers to force a re-render
    pub render_send: Sender<()>,
    render_recv: Receiver<()>
}

impl Screen {
    pub fn new(main_log: Arc<Log>, srvr_log: Arc<Log>) -> Self {
        let (render_s, render_r) = channel();

        return Screen {
            main_log: main_log,
            srvr_log: srvr_log,
            status: Arc::new(Mutex::new(String::new())),
            render_send: render_s,
            render_recv: render_r
        };
    }

    /// Shared handle for updating the status footer once the screen has
    /// moved onto its render thread.
    pub fn status_handle(&self) -> Arc<Mutex<String>> {
        return self.status.clone();
    }

    fn render_loop(self, kill_recv: Receiver<()>, interval: Duration) -> Self {
        loop {
            match self.render_recv.recv_timeout(interval) {
                Ok(_) => (),
                Err(e) => match e {
                    RecvTimeoutError::Timeout => (),
                    RecvTimeoutError::Disconnected => return self
                }
            }

            Renderer.render(&Term::stderr(), &self).expect("Render shouldn't fail");

            match kill_recv.try_recv() {
                Ok(_) => return self,
                Err(e) => match e {
                    TryRecvError::Empty => (),
                    TryRecvError::Disconnected => return self
                }
            }
        }
    }

    pub fn spawn_threads(self, redraw_interval: u64) -> (Sender<()>, JoinHandle<Screen>) {
        // Consume all early messages
        self.render_recv.try_iter().count();
        let redraw_interval = Duration::from_millis(redraw_interval);

        let (kill_send, kill_recv) = channel();

        let render_join = thread::Builder::new().name(String::from("render")).spawn(move || {
            return self.render_loop(kill_recv, redraw_interval);
        }).unwrap();

        return (kill_send, render_join);
    }
}

impl Renderable for Screen {
    fn log_panes(&self) -> Vec<&Log> {
        return vec![&self.main_log, &self.srvr_log];
    }

    fn status_line(&self) -> String {
        return self.status.lock().unwrap().clone();
    }
}
