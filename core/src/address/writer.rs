/*
 * writer.rs
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

//! Serialize address lists back to header text, with the bounded-write
//! policy of the parser's buffers: output beyond the cap is dropped
//! silently, never an error.

use bytes::{BufMut, BytesMut};

use super::token::is_special;
use super::{Address, AddressList};

/// Cap for the convenience [`write_list`] wrapper: the historical 8 KiB
/// header buffer, less its terminator byte.
pub const LIST_WRITE_CAP: usize = 8191;

/// Staging cap of the historical escape helper.
const ESCAPE_CAP: usize = 253;

/// Output accumulator with a hard cap. Writes past the cap are discarded.
pub struct WriteBuf {
    buf: BytesMut,
    max: usize,
}

impl WriteBuf {
    pub fn new(max: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(max.min(4096)),
            max,
        }
    }

    fn push(&mut self, c: u8) {
        if self.buf.len() < self.max {
            self.buf.put_u8(c);
        }
    }

    fn push_str(&mut self, s: &str) {
        for &c in s.as_bytes() {
            self.push(c);
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}

/// Render one address. The personal name is quoted (with `"` and `\`
/// escaped) when it contains any special character; angle brackets appear
/// when a personal name is present or the mailbox starts with `@`; the `"@"`
/// sentinel mailbox renders as empty; group openers end with `": "` and
/// mailbox-less records render the closing `;`.
pub fn write_address_single(buf: &mut WriteBuf, addr: &Address, display: bool) {
    if let Some(personal) = &addr.personal {
        if personal.bytes().any(is_special) {
            buf.push(b'"');
            for &c in personal.as_bytes() {
                if c == b'"' || c == b'\\' {
                    buf.push(b'\\');
                }
                buf.push(c);
            }
            buf.push(b'"');
        } else {
            buf.push_str(personal);
        }
        buf.push(b' ');
    }

    let brackets = addr.personal.is_some()
        || addr.mailbox.as_deref().map_or(false, |m| m.starts_with('@'));
    if brackets {
        buf.push(b'<');
    }

    if let Some(mailbox) = &addr.mailbox {
        if mailbox != "@" {
            let text = if display {
                addr.display_mailbox().unwrap_or("")
            } else {
                mailbox
            };
            buf.push_str(text);
        }
        if brackets {
            buf.push(b'>');
        }
        if addr.group {
            buf.push_str(": ");
        }
    } else {
        buf.push(b';');
    }
}

/// Render a whole list, appending to whatever the buffer already holds
/// (with a `", "` separator when non-empty). Consecutive addresses are
/// joined with `", "`, except after a group opener and before a group
/// terminator.
pub fn write_address_list(buf: &mut WriteBuf, list: &AddressList, display: bool) {
    if !buf.is_empty() {
        buf.push_str(", ");
    }

    for (i, addr) in list.iter().enumerate() {
        write_address_single(buf, addr, display);

        if let Some(next) = list.get(i + 1) {
            if next.mailbox.is_some() && !addr.group {
                buf.push_str(", ");
            }
        }
    }
}

/// Serialize a list to a fresh string, capped at [`LIST_WRITE_CAP`].
pub fn write_list(list: &AddressList, display: bool) -> String {
    let mut buf = WriteBuf::new(LIST_WRITE_CAP);
    write_address_list(&mut buf, list, display);
    buf.into_string()
}

/// Quote and backslash-escape `value` when it contains any character of
/// `specials`; otherwise return it verbatim. The quoted form is capped by
/// the historical 256-byte staging buffer.
pub fn escape_specials(value: &str, specials: &str) -> String {
    if !value.bytes().any(|c| specials.as_bytes().contains(&c)) {
        return value.to_string();
    }
    let mut out = Vec::with_capacity(value.len() + 2);
    let mut room = ESCAPE_CAP;
    out.push(b'"');
    for &c in value.as_bytes() {
        if room <= 1 {
            break;
        }
        if c == b'\\' || c == b'"' {
            out.push(b'\\');
            room -= 1;
        }
        out.push(c);
        room -= 1;
    }
    out.push(b'"');
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{parse_address_list, AddressList};

    fn parse(s: &str) -> AddressList {
        parse_address_list(AddressList::new(), s).unwrap()
    }

    #[test]
    fn plain_address() {
        assert_eq!(write_list(&parse("jane@example.com"), false), "jane@example.com");
    }

    #[test]
    fn personal_gets_angle_brackets() {
        assert_eq!(
            write_list(&parse("Jane Doe <jane@example.com>"), false),
            "Jane Doe <jane@example.com>"
        );
    }

    #[test]
    fn personal_with_specials_is_quoted() {
        let list = parse("\"Doe, Jane\" <jane@example.com>");
        assert_eq!(write_list(&list, false), "\"Doe, Jane\" <jane@example.com>");
    }

    #[test]
    fn personal_with_quote_and_backslash_escaped() {
        let mut list = AddressList::new();
        let mut a = crate::address::Address::new();
        a.personal = Some(r#"say "hi" \ bye"#.to_string());
        a.mailbox = Some("x@y.example".to_string());
        list.push(a);
        assert_eq!(
            write_list(&list, false),
            r#""say \"hi\" \\ bye" <x@y.example>"#
        );
    }

    #[test]
    fn list_joined_with_commas() {
        assert_eq!(
            write_list(&parse("a@x.com, b@y.com, c@z.com"), false),
            "a@x.com, b@y.com, c@z.com"
        );
    }

    #[test]
    fn group_rendering() {
        assert_eq!(
            write_list(&parse("friends: a@x.com, b@y.com;"), false),
            "friends: a@x.com, b@y.com;"
        );
    }

    #[test]
    fn empty_group_rendering() {
        assert_eq!(
            write_list(&parse("undisclosed-recipients: ;"), false),
            "undisclosed-recipients: ;"
        );
    }

    #[test]
    fn sentinel_mailbox_renders_empty_brackets() {
        let list = parse("MAILER-DAEMON <>");
        assert_eq!(write_list(&list, false), "MAILER-DAEMON <>");
    }

    #[test]
    fn appends_to_nonempty_buffer() {
        let mut buf = WriteBuf::new(LIST_WRITE_CAP);
        write_address_list(&mut buf, &parse("a@x.com"), false);
        write_address_list(&mut buf, &parse("b@y.com"), false);
        assert_eq!(buf.into_string(), "a@x.com, b@y.com");
    }

    #[test]
    fn bounded_write_truncates_silently() {
        let mut buf = WriteBuf::new(10);
        write_address_list(&mut buf, &parse("somebody@example.com"), false);
        assert_eq!(buf.into_string(), "somebody@e");
    }

    #[test]
    fn escape_specials_quotes_when_needed() {
        assert_eq!(escape_specials("plain", "@.,:;<>[]\\\"()"), "plain");
        assert_eq!(escape_specials("a,b", "@.,:;<>[]\\\"()"), "\"a,b\"");
        assert_eq!(escape_specials(r#"a"b"#, "\""), r#""a\"b""#);
    }
}
