//! In-process fake Blink Store for tests.
//!
//! Binds to an OS-assigned port and serves the line protocol with a thread
//! per connection. The bounded mode evicts oldest-inserted keys first once
//! the byte limit is reached, which is one of the orders a sampled policy
//! may produce.

use std::collections::{HashMap, VecDeque};
use std::io::{BufReader, BufWriter, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use blink_bench::protocol::{read_command, write_response, Command, Response};
use blink_bench::BenchError;
use bytes::Bytes;
use parking_lot::Mutex;

/// How the fake store behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Enforces the byte limit by evicting the oldest keys
    Bounded,
    /// Never evicts; usage grows without limit
    Unbounded,
    /// Reads requests but never answers
    Silent,
    /// Answers every request with the given raw line
    Garbage(&'static str),
}

#[derive(Default)]
struct StoreState {
    entries: HashMap<String, Bytes>,
    order: VecDeque<String>,
    usage: u64,
}

impl StoreState {
    fn entry_size(key: &str, value: &[u8]) -> u64 {
        (key.len() + value.len()) as u64
    }

    fn remove(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(old) => {
                self.usage -= Self::entry_size(key, &old);
                self.order.retain(|k| k != key);
                true
            }
            None => false,
        }
    }

    fn set(&mut self, key: String, value: Bytes, limit: Option<u64>) -> Response {
        let need = Self::entry_size(&key, &value);
        self.remove(&key);

        if let Some(limit) = limit {
            if need > limit {
                return Response::error("value larger than store limit");
            }
            while self.usage + need > limit {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                if let Some(old) = self.entries.remove(&oldest) {
                    self.usage -= Self::entry_size(&oldest, &old);
                }
            }
        }

        self.usage += need;
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        Response::ok()
    }
}

struct Shared {
    mode: StoreMode,
    limit: u64,
    state: Mutex<StoreState>,
    connections: AtomicUsize,
    quits: AtomicUsize,
}

/// A running fake store
pub struct FakeStore {
    port: u16,
    shared: Arc<Shared>,
}

impl FakeStore {
    /// Bounded store with the given byte limit
    pub fn start(limit: u64) -> Self {
        Self::start_with_mode(StoreMode::Bounded, limit)
    }

    pub fn start_with_mode(mode: StoreMode, limit: u64) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let shared = Arc::new(Shared {
            mode,
            limit,
            state: Mutex::new(StoreState::default()),
            connections: AtomicUsize::new(0),
            quits: AtomicUsize::new(0),
        });

        let accept_shared = Arc::clone(&shared);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    break;
                };
                accept_shared.connections.fetch_add(1, Ordering::SeqCst);
                let shared = Arc::clone(&accept_shared);
                thread::spawn(move || serve(stream, shared));
            }
        });

        Self { port, shared }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Connections accepted so far
    pub fn connections(&self) -> usize {
        self.shared.connections.load(Ordering::SeqCst)
    }

    /// QUIT commands received so far
    pub fn quits(&self) -> usize {
        self.shared.quits.load(Ordering::SeqCst)
    }

    pub fn usage(&self) -> u64 {
        self.shared.state.lock().usage
    }

    pub fn contains(&self, key: &str) -> bool {
        self.shared.state.lock().entries.contains_key(key)
    }

    /// Poll until at least `n` QUITs arrived (the server side runs on its own thread)
    pub fn wait_for_quits(&self, n: usize) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if self.quits() >= n {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }
}

fn serve(stream: TcpStream, shared: Arc<Shared>) {
    let Ok(read_stream) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(read_stream);
    let mut writer = BufWriter::new(stream);

    loop {
        let command = match read_command(&mut reader) {
            Ok(command) => command,
            Err(BenchError::Protocol(msg)) => {
                if write_response(&mut writer, &Response::error(msg)).is_err() {
                    return;
                }
                continue;
            }
            Err(_) => return,
        };

        if command == Command::Quit {
            shared.quits.fetch_add(1, Ordering::SeqCst);
            return;
        }

        let response = match shared.mode {
            StoreMode::Silent => continue,
            StoreMode::Garbage(line) => {
                if writer.write_all(line.as_bytes()).and_then(|_| writer.flush()).is_err() {
                    return;
                }
                continue;
            }
            StoreMode::Bounded => execute(&shared, command, Some(shared.limit)),
            StoreMode::Unbounded => execute(&shared, command, None),
        };

        if write_response(&mut writer, &response).is_err() {
            return;
        }
    }
}

fn execute(shared: &Shared, command: Command, limit: Option<u64>) -> Response {
    let mut state = shared.state.lock();
    match command {
        Command::Get { key } => match state.entries.get(&key) {
            Some(value) => Response::Value(value.clone()),
            None => Response::NotFound,
        },
        Command::Set { key, value } => state.set(key, value, limit),
        Command::Delete { key } => {
            if state.remove(&key) {
                Response::ok()
            } else {
                Response::NotFound
            }
        }
        Command::Usage => Response::Usage(state.usage),
        Command::Quit => Response::ok(),
    }
}
