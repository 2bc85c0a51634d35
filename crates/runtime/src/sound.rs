//! Audio trigger: hand a file path to an external player and move on.

use std::process::{Child, Command, Stdio};
use std::thread;

use log::debug;

/// Player binary used when none is configured.
pub fn default_player() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "mpg123"
    }
}

/// Start `player` with `path` as its only argument and return its pid.
///
/// Stdio is detached so the player cannot write over the terminal. A reaper
/// thread waits on the child, so the caller never blocks and no zombie is
/// left behind. The path is a single argv element; no shell interprets it.
pub fn play_sound(player: &str, path: &str) -> Option<u32> {
    let child = match Command::new(player)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            debug!("could not start {player} for {path}: {err}");
            return None;
        }
    };

    let pid = child.id();
    debug!("started {player} (pid {pid}) for {path}");
    reap(child);
    Some(pid)
}

fn reap(mut child: Child) {
    let pid = child.id();
    let spawned = thread::Builder::new()
        .name(format!("sound-reaper-{pid}"))
        .spawn(move || match child.wait() {
            Ok(status) => debug!("player pid {pid} exited with {status}"),
            Err(err) => debug!("waiting on player pid {pid} failed: {err}"),
        });
    if let Err(err) = spawned {
        debug!("could not start reaper for pid {pid}: {err}");
    }
}
