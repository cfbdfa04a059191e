/*
 * buffer.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Rubrica, an email address parsing library.
 *
 * Rubrica is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Rubrica is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Rubrica.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Bounded token accumulator.
//!
//! The historical parser collected tokens, phrases, and comments into
//! fixed-size stack buffers: bytes past the capacity were dropped from
//! storage while the length counter kept advancing, so oversized input
//! truncated silently instead of failing. That policy is part of the
//! observable behavior (output sizes) and is kept here, with growable
//! storage instead of a fixed array.

/// Byte accumulator with a storage cap. `push` always advances the logical
/// length; bytes arriving once the cap is reached are discarded.
#[derive(Debug)]
pub(crate) struct BoundedBuf {
    data: Vec<u8>,
    len: usize,
    max: usize,
}

impl BoundedBuf {
    pub(crate) fn new(max: usize) -> Self {
        Self {
            data: Vec::new(),
            len: 0,
            max,
        }
    }

    pub(crate) fn push(&mut self, c: u8) {
        if self.len < self.max {
            self.data.push(c);
        }
        self.len += 1;
    }

    /// Joining space between concatenated units (multi-word phrases, multiple
    /// comments). Unlike `push`, a separator that does not fit is skipped
    /// entirely, and nothing is written to an empty buffer.
    pub(crate) fn push_join_space(&mut self) {
        if self.len > 0 && self.len < self.max {
            self.data.push(b' ');
            self.len += 1;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
        self.len = 0;
    }

    /// Stored text (truncated at the cap), lossily decoded.
    pub(crate) fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Stored text as an owned value, or None when nothing was accumulated.
    /// The historical code treated empty strings and absent strings alike.
    pub(crate) fn to_option(&self) -> Option<String> {
        if self.data.is_empty() {
            None
        } else {
            Some(self.to_text())
        }
    }
}
