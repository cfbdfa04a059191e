/*
 * parser.rs
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

//! Address list parser: a state machine over a header field body, dispatching
//! on delimiter characters to build an ordered list of addresses. Handles
//! display-name phrases, nested comments, quoted strings, group syntax
//! (`name: a, b;`) and obsolete source routes (`<@host:user@domain>`).

use super::buffer::BoundedBuf;
use super::error::AddressError;
use super::token::{is_email_wsp, is_special, next_token, parse_quote, skip_email_wsp};
use super::{Address, AddressList};

/// Historical token/phrase/comment storage cap, one below the traditional
/// 1 KiB stack buffers.
const TOKEN_MAX: usize = 1023;

/// Extra characters accepted in a local-part beyond ordinary atom text.
const LOCAL_PART_EXTRAS: &[u8] = b".\"(\\";
/// Extra characters accepted in a domain-part.
const DOMAIN_PART_EXTRAS: &[u8] = b".([]\\";
/// Extra characters accepted in a source-route hop (commas join hops).
const ROUTE_HOP_EXTRAS: &[u8] = b",.\\[](";

/// Extract one side of an address-spec (local-part or domain-part) together
/// with any comment. Stops at end of input or at a special character not in
/// `allowed`. Comments may sit before or after the word; a second comment is
/// appended with a joining space.
fn parse_mailbox_domain(
    s: &[u8],
    mut pos: usize,
    allowed: &[u8],
    mailbox: &mut BoundedBuf,
    comment: &mut BoundedBuf,
) -> Result<usize, AddressError> {
    while pos < s.len() {
        pos = skip_email_wsp(s, pos);
        if pos >= s.len() {
            break;
        }
        let c = s[pos];
        if !allowed.contains(&c) && is_special(c) {
            break;
        }
        if c == b'(' {
            comment.push_join_space();
            pos = next_token(s, pos, comment)?;
        } else {
            pos = next_token(s, pos, mailbox)?;
        }
    }
    Ok(pos)
}

/// Parse `local-part[@domain]` into `token`, filling in the address. The
/// comment accumulator becomes the personal name only when none is set yet.
fn parse_address(
    s: &[u8],
    mut pos: usize,
    token: &mut BoundedBuf,
    comment: &mut BoundedBuf,
    addr: &mut Address,
) -> Result<usize, AddressError> {
    pos = parse_mailbox_domain(s, pos, LOCAL_PART_EXTRAS, token, comment)?;

    if pos < s.len() && s[pos] == b'@' {
        token.push(b'@');
        pos = parse_mailbox_domain(s, pos + 1, DOMAIN_PART_EXTRAS, token, comment)?;
    }

    addr.mailbox = token.to_option();
    if addr.personal.is_none() {
        addr.personal = comment.to_option();
    }

    Ok(pos)
}

/// Parse a bare address-spec. Anything left over other than `,` or `;`
/// is an error.
fn parse_addr_spec(
    s: &[u8],
    pos: usize,
    comment: &mut BoundedBuf,
    addr: &mut Address,
) -> Result<usize, AddressError> {
    let mut token = BoundedBuf::new(TOKEN_MAX);

    let pos = parse_address(s, pos, &mut token, comment, addr)?;
    if pos < s.len() && s[pos] != b',' && s[pos] != b';' {
        return Err(AddressError::BadAddrSpec);
    }
    Ok(pos)
}

/// Parse the inside of `<...>`: an optional source route (`@host,@host:`)
/// followed by an address-spec and the closing `>`. An empty addr-spec
/// inside the brackets yields the historical `"@"` sentinel mailbox.
fn parse_route_addr(
    s: &[u8],
    mut pos: usize,
    comment: &mut BoundedBuf,
    addr: &mut Address,
) -> Result<usize, AddressError> {
    let mut token = BoundedBuf::new(TOKEN_MAX);

    pos = skip_email_wsp(s, pos);

    if pos < s.len() && s[pos] == b'@' {
        while pos < s.len() && s[pos] == b'@' {
            token.push(b'@');
            pos = parse_mailbox_domain(s, pos + 1, ROUTE_HOP_EXTRAS, &mut token, comment)
                .map_err(|_| AddressError::BadRoute)?;
        }
        if pos >= s.len() || s[pos] != b':' {
            return Err(AddressError::BadRoute);
        }
        token.push(b':');
        pos += 1;
    }

    pos = parse_address(s, pos, &mut token, comment, addr)?;

    if pos >= s.len() || s[pos] != b'>' {
        return Err(AddressError::BadRouteAddr);
    }

    if addr.mailbox.is_none() {
        addr.mailbox = Some("@".to_string());
    }

    Ok(pos + 1)
}

/// Parse an accumulated phrase as a bare address-spec and append it. A
/// failure here drops only this record; the surrounding list parse carries
/// on (historical recovery behavior for things like `foo bar, ok@host`).
fn add_addr_spec(list: &mut AddressList, phrase: &str, comment: &mut BoundedBuf) {
    let mut addr = Address::new();
    if parse_addr_spec(phrase.as_bytes(), 0, comment, &mut addr).is_ok() {
        list.push(addr);
    }
}

/// Attach a pending comment to the most recent record as its personal name,
/// unless it already has one (first comment wins).
fn attach_comment(list: &mut AddressList, comment: &BoundedBuf) {
    if let Some(last) = list.last_mut() {
        if last.personal.is_none() {
            last.personal = comment.to_option();
        }
    }
}

/// Parse a header field body that is an address-list or mailbox-list
/// (To, Cc, Bcc, From, Reply-To, Sender, ...), appending to `list`.
///
/// `list` is consumed: on success the extended list is returned, on error
/// everything is dropped, matching the original's all-or-nothing ownership.
pub fn parse_address_list(list: AddressList, s: &str) -> Result<AddressList, AddressError> {
    let s = s.as_bytes();
    let mut list = list;
    let mut phrase = BoundedBuf::new(TOKEN_MAX);
    let mut comment = BoundedBuf::new(TOKEN_MAX);

    let mut ws_pending = !s.is_empty() && is_email_wsp(s[0]);
    let mut pos = skip_email_wsp(s, 0);

    while pos < s.len() {
        match s[pos] {
            b',' => {
                if !phrase.is_empty() {
                    add_addr_spec(&mut list, &phrase.to_text(), &mut comment);
                } else if !comment.is_empty() {
                    attach_comment(&mut list, &comment);
                }
                phrase.clear();
                comment.clear();
                pos += 1;
            }
            b'(' => {
                comment.push_join_space();
                pos = next_token(s, pos, &mut comment)?;
            }
            b'"' => {
                phrase.push_join_space();
                pos = parse_quote(s, pos + 1, &mut phrase)?;
            }
            b':' => {
                let mut group = Address::new();
                group.mailbox = phrase.to_option();
                group.group = true;
                list.push(group);
                phrase.clear();
                comment.clear();
                pos += 1;
            }
            b';' => {
                if !phrase.is_empty() {
                    add_addr_spec(&mut list, &phrase.to_text(), &mut comment);
                } else if !comment.is_empty() {
                    attach_comment(&mut list, &comment);
                }
                // terminator closing the nearest open group
                if !list.is_empty() {
                    list.push(Address::new());
                }
                phrase.clear();
                comment.clear();
                pos += 1;
            }
            b'<' => {
                let mut addr = Address::new();
                addr.personal = phrase.to_option();
                pos = parse_route_addr(s, pos + 1, &mut comment, &mut addr)?;
                list.push(addr);
                phrase.clear();
                comment.clear();
            }
            _ => {
                if ws_pending {
                    phrase.push_join_space();
                }
                pos = next_token(s, pos, &mut phrase)?;
            }
        }
        ws_pending = pos < s.len() && is_email_wsp(s[pos]);
        pos = skip_email_wsp(s, pos);
    }

    if !phrase.is_empty() {
        add_addr_spec(&mut list, &phrase.to_text(), &mut comment);
    } else if !comment.is_empty() {
        attach_comment(&mut list, &comment);
    }

    Ok(list)
}

/// Lenient entry point for user-typed input (command line, aliases): when
/// the text carries none of the RFC 822 punctuation, treat it as a plain
/// whitespace-separated list of addresses; otherwise parse it strictly.
/// Errors leave only the records parsed so far (possibly none).
pub fn parse_address_list_loose(list: AddressList, s: &str) -> AddressList {
    let strict = s.bytes().any(|c| b"\"<>():;,\\".contains(&c));
    if strict {
        return parse_address_list(list, s).unwrap_or_default();
    }
    let mut list = list;
    for word in s.split(|c| c == ' ' || c == '\t') {
        if word.is_empty() {
            continue;
        }
        list = parse_address_list(list, word).unwrap_or_default();
    }
    list
}
