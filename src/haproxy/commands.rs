use std::io::{Result, Write};

use super::requests::ProxyType;

pub fn end<W: Write>(w: &mut W) -> Result<()> {
    w.write_all(b"\n")
}

pub fn show_stat<W: Write>(w: &mut W, proxy_type: ProxyType) -> Result<()> {
    write!(w, "show stat -1 {} -1", proxy_type)
}
