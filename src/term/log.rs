use std::{cell::RefCell, fs::OpenOptions, io::Write, path::PathBuf, sync::{Arc, Mutex}};

use console::style;

use crate::history::RecencyBuffer;

// The render pane only ever shows a screenful; anything older than this has
// long scrolled out of reach.
const LOG_LINES: usize = 256;

thread_local! {
    static THREAD_LOGGER: RefCell<Option<Arc<Log>>> = const { RefCell::new(None) };
}

#[derive(Clone, Copy)]
enum Level {
    Info,
    Warn,
    Error,
    Success
}

impl Level {
    fn prefix(self) -> String {
        return match self {
            Self::Info => style("   INFO:").bold().black().on_white().to_string(),
            Self::Warn => style("   WARN:").bold().black().on_yellow().to_string(),
            Self::Error => style("  ERROR:").bold().white().on_red().to_string(),
            Self::Success => style("SUCCESS:").bold().black().on_green().to_string()
        };
    }

    fn paint(self, line: &str) -> String {
        return match self {
            Self::Info => style(line).white().to_string(),
            Self::Warn => style(line).yellow().to_string(),
            Self::Error => style(line).red().to_string(),
            Self::Success => style(line).green().to_string()
        };
    }
}

pub(super) struct _LogData {
    pub(super) title: String,
    pub(super) lines: RecencyBuffer<String>,
    pub(super) disk_log_dir: Option<PathBuf>
}

pub struct Log {
    pub(super) data: Mutex<_LogData>,
    echo_stderr: bool
}

impl Log {
    pub fn new(name: impl Into<String>) -> Self {
        return Log {
            data: Mutex::new(
                _LogData {
                    title: name.into(),
                    lines: RecencyBuffer::with_capacity(LOG_LINES).expect("log line capacity is nonzero"),
                    disk_log_dir: None
                }
            ),
            echo_stderr: false
        };
    }

    pub fn with_disk_log(self, dir: impl Into<PathBuf>) -> Self {
        self.data.lock().unwrap().disk_log_dir = Some(dir.into());
        return self;
    }

    /// Mirrors every line to stderr, for running without the screen.
    pub fn with_stderr_echo(mut self, echo: bool) -> Self {
        self.echo_stderr = echo;
        return self;
    }

    pub fn log(&self, msg: impl AsRef<str>) {
        return self.log_at(Level::Info, msg);
    }

    pub fn log_warn(&self, msg: impl AsRef<str>) {
        return self.log_at(Level::Warn, msg);
    }

    pub fn log_err(&self, msg: impl AsRef<str>) {
        return self.log_at(Level::Error, msg);
    }

    pub fn log_success(&self, msg: impl AsRef<str>) {
        return self.log_at(Level::Success, msg);
    }

    fn log_at(&self, level: Level, msg: impl AsRef<str>) {
        self.file_log(msg.as_ref());

        let prefix = level.prefix();
        let prefix_empty = " ".repeat(console::measure_text_width(&prefix));
        let mut current_prefix = prefix.as_str();

        let mut data = self.data.lock().unwrap();
        for line in msg.as_ref().lines() {
            let final_line = format!("{} {}", current_prefix, level.paint(line)).replace('\t', "  ");
            if self.echo_stderr {
                eprintln!("{}", final_line);
            }
            data.lines.push(final_line);
            current_prefix = &prefix_empty;
        }
    }

    fn file_log(&self, msg: &str) {
        let file_path = {
            let data = self.data.lock().unwrap();
            match &data.disk_log_dir {
                Some(dir) => dir.join(format!("{}.log", data.title)),
                None => return
            }
        };

        match OpenOptions::new().create(true).append(true).open(file_path) {
            Ok(mut f) => {
                let _ = writeln!(f, "{}", msg);
            },
            Err(_) => ()
        }
    }

    pub fn name(&self) -> String {
        return self.data.lock().unwrap().title.clone();
    }

    fn thread_name() -> String {
        let thread = std::thread::current();
        return (&thread).name().map_or(format!("{:?}", thread.id()), |s| { s.to_string() });
    }

    /// Initializes the logger for the current thread
    pub fn set(to: Arc<Log>) {
        THREAD_LOGGER.with_borrow_mut(|opt| {
            match opt {
                Some(s) => {
                    if Arc::ptr_eq(&to, s) { return }
                    let warn_msg = format!("Attempt to set logger as thread logger for already initialized thread {}", Log::thread_name());
                    to.log_warn(&warn_msg);
                    s.log_warn(&warn_msg);
                },
                None => *opt = Some(to)
            }
        });
    }

    pub fn get() -> Arc<Log> {
        let ret_val = THREAD_LOGGER.with_borrow(|opt| {
            opt.clone()
        });

        return match ret_val {
            Some(l) => l,
            None => panic!("Attempt to get log on thread with no initialized log!")
        };
    }
}
