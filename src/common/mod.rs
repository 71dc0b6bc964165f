use std::sync::LazyLock;
use std::thread::available_parallelism;

use tokio::runtime::{Builder, Runtime};

/// Random bytes behind a share code.
pub const SHARE_CODE_BYTES: usize = 3;

/// Share code length once hex encoded.
pub const SHARE_CODE_LEN: usize = SHARE_CODE_BYTES * 2;

/// Fresh codes tried before an upload gives up on registering.
pub const MAX_CODE_ATTEMPTS: u32 = 8;

/// Leading segment of every stored file name: `share-<uuid>-<filename>`.
pub const STORED_FILE_PREFIX: &str = "share";

/// Separates the segments of a stored file name.
pub const STORED_FILE_DELIMITER: char = '-';

/// Longest filename segment (in bytes) kept in a stored file name.
pub const MAX_STORED_NAME_BYTES: usize = 200;

pub static CURRENT_NUM_THREADS: LazyLock<usize> =
    LazyLock::new(|| available_parallelism().map(|n| n.get()).unwrap_or(4));

// Runtime dedicated to the HTTP server; every request runs as a task on it.
pub static ROCKET_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    Builder::new_multi_thread()
        .worker_threads(*CURRENT_NUM_THREADS)
        .thread_name("rocket-io-worker")
        .enable_all()
        .build()
        .expect("Failed to build Rocket Tokio runtime")
});
