//! The console handle widgets operate on.
//!
//! A [`Console`] pairs a [`Surface`] with a [`KeySource`]. Widgets borrow it
//! mutably for the duration of one modal interaction; option handlers
//! receive the same borrow so they can nest further widgets. Only one widget
//! is ever active at a time — nesting is sequential, never parallel.

use std::io;

use crate::event::{Key, KeySource};
use crate::surface::Surface;

pub struct Console<S: Surface, K: KeySource> {
    surface: S,
    keys: K,
}

impl<S: Surface, K: KeySource> Console<S, K> {
    pub fn new(surface: S, keys: K) -> Self {
        Self { surface, keys }
    }

    pub fn surface(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn next_key(&mut self) -> io::Result<Key> {
        self.keys.next_key()
    }

    /// Grid size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        self.surface.size()
    }

    /// Clear the whole screen. For handlers that want a blank slate before
    /// spawning external output.
    pub fn clear(&mut self) -> io::Result<()> {
        self.surface.clear_all()?;
        self.surface.flush()
    }

    pub fn into_parts(self) -> (S, K) {
        (self.surface, self.keys)
    }
}

/// Zero-argument action bound to a menu option or shortcut.
///
/// Handlers do the real work (spawn a tool, mutate config, open a nested
/// widget). Errors they return are not caught by any engine; they propagate
/// to whoever called `show()`, which may leave the screen partially drawn.
/// Callers that need a clean screen after a failing handler wrap the call
/// themselves.
pub type Handler<S, K> = Box<dyn FnMut(&mut Console<S, K>) -> io::Result<()>>;
