//! Fake HAProxy admin sockets shared by the integration tests.
//!
//! Each fake process is a `UnixListener` in a temporary directory answering
//! `show stat` with canned CSV, one command per connection like HAProxy's
//! non-interactive mode.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixListener;
use std::path::Path;
use std::thread;

/// Builds a `show stat` reply from `(pxname, svname, status)` rows.
fn stat_reply(rows: &[(&str, &str, &str)]) -> String {
    let mut out = String::from("# pxname,svname,qcur,qmax,scur,status,weight,\n");
    for (proxy, service, status) in rows {
        out.push_str(&format!("{},{},0,0,0,{},1,\n", proxy, service, status));
    }
    out.push('\n');
    out
}

/// Starts a fake HAProxy process listening on `dir/name`.
pub fn spawn_haproxy(dir: &Path, name: &str, rows: &[(&str, &str, &str)]) {
    let listener = UnixListener::bind(dir.join(name)).expect("bind fake socket");
    let frontends = stat_reply(
        &rows
            .iter()
            .copied()
            .filter(|(_, sv, _)| *sv == "FRONTEND")
            .collect::<Vec<_>>(),
    );
    let backends = stat_reply(
        &rows
            .iter()
            .copied()
            .filter(|(_, sv, _)| *sv != "FRONTEND")
            .collect::<Vec<_>>(),
    );

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut command = String::new();
            if reader.read_line(&mut command).unwrap_or(0) == 0 {
                continue;
            }

            let reply = match command.trim_end() {
                "show stat -1 1 -1" => frontends.as_str(),
                "show stat -1 2 -1" => backends.as_str(),
                _ => "Unknown command. Please enter one of the following commands only :\n",
            };
            let _ = stream.write_all(reply.as_bytes());
        }
    });
}
