//! Two-outcome yes/no prompt with a single-keystroke fast path.

use std::io;

use crate::console::Console;
use crate::event::{Key, KeySource};
use crate::surface::Surface;

/// Ask a yes/no question at the current cursor position.
///
/// - Enter returns `default_yes`
/// - `y`/`Y` returns `true`, `n`/`N` returns `false`, regardless of default
/// - Escape returns `false` — cancellation is indistinguishable from an
///   explicit "no" for the caller; kept that way intentionally
/// - every other key is ignored
pub fn confirm_yes_no<S: Surface, K: KeySource>(
    console: &mut Console<S, K>,
    message: &str,
    default_yes: bool,
) -> io::Result<bool> {
    let (saved_fg, saved_bg) = console.surface().colors();
    let (col, row) = console.surface().cursor_position()?;

    let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
    let surface = console.surface();
    surface.move_to(col, row)?;
    surface.print(&format!("{message} {hint} "))?;
    surface.flush()?;

    let answer = loop {
        match console.next_key()? {
            Key::Enter => break default_yes,
            Key::Char('y') | Key::Char('Y') => break true,
            Key::Char('n') | Key::Char('N') => break false,
            Key::Escape => break false,
            _ => {}
        }
    };

    let surface = console.surface();
    surface.print(if answer { "yes" } else { "no" })?;
    surface.set_fg(saved_fg)?;
    surface.set_bg(saved_bg)?;
    surface.flush()?;
    Ok(answer)
}
