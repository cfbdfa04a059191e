/*
 * token.rs
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

//! Low-level scanners: quoted strings, parenthesized comments, plain tokens.

use super::buffer::BoundedBuf;
use super::error::AddressError;

/// Characters with special meaning in an address header.
pub(crate) const SPECIALS: &[u8] = b"@.,:;<>[]\\\"()";

pub(crate) fn is_special(c: u8) -> bool {
    SPECIALS.contains(&c)
}

/// Whitespace between header tokens (folding whitespace once unfolded).
pub(crate) fn is_email_wsp(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

pub(crate) fn skip_email_wsp(s: &[u8], mut pos: usize) -> usize {
    while pos < s.len() && is_email_wsp(s[pos]) {
        pos += 1;
    }
    pos
}

/// Scan a quoted string. `pos` is just past the opening quote; returns the
/// position just past the closing quote. `\` escapes the next character;
/// the backslash itself is not stored.
pub(crate) fn parse_quote(
    s: &[u8],
    mut pos: usize,
    token: &mut BoundedBuf,
) -> Result<usize, AddressError> {
    while pos < s.len() {
        let c = s[pos];
        if c == b'\\' {
            pos += 1;
            if pos >= s.len() {
                break;
            }
            token.push(s[pos]);
        } else if c == b'"' {
            return Ok(pos + 1);
        } else {
            token.push(c);
        }
        pos += 1;
    }
    Err(AddressError::MismatchedQuote)
}

/// Scan a comment. `pos` is just past the opening parenthesis; returns the
/// position just past the closing one. Nested parentheses are stored
/// verbatim; the outermost pair is not. `\` escapes the next character.
pub(crate) fn parse_comment(
    s: &[u8],
    mut pos: usize,
    comment: &mut BoundedBuf,
) -> Result<usize, AddressError> {
    let mut level = 1;

    while pos < s.len() {
        let mut c = s[pos];
        if c == b'(' {
            level += 1;
        } else if c == b')' {
            level -= 1;
            if level == 0 {
                pos += 1;
                break;
            }
        } else if c == b'\\' {
            pos += 1;
            if pos >= s.len() {
                break;
            }
            c = s[pos];
        }
        comment.push(c);
        pos += 1;
    }
    if level > 0 {
        return Err(AddressError::MismatchedParen);
    }
    Ok(pos)
}

/// Scan the next word. Dispatches to the comment or quoted-string scanner;
/// a special character alone is a one-character token; anything else
/// accumulates until whitespace or a special.
pub(crate) fn next_token(
    s: &[u8],
    mut pos: usize,
    token: &mut BoundedBuf,
) -> Result<usize, AddressError> {
    if pos >= s.len() {
        return Ok(pos);
    }
    if s[pos] == b'(' {
        return parse_comment(s, pos + 1, token);
    }
    if s[pos] == b'"' {
        return parse_quote(s, pos + 1, token);
    }
    if is_special(s[pos]) {
        token.push(s[pos]);
        return Ok(pos + 1);
    }
    while pos < s.len() {
        let c = s[pos];
        if is_email_wsp(c) || is_special(c) {
            break;
        }
        token.push(c);
        pos += 1;
    }
    Ok(pos)
}
