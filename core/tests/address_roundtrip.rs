/*
 * address_roundtrip.rs
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

//! End-to-end parse/serialize behavior over the public API.

use rubrica_core::address::{
    parse_address_list, parse_address_list_loose, write_list, AddressError, AddressList,
};

fn parse(s: &str) -> AddressList {
    parse_address_list(AddressList::new(), s).unwrap()
}

#[test]
fn simple_address_roundtrip_is_stable() {
    let list = parse("Jane Doe <jane@example.com>");
    let text = write_list(&list, false);
    let reparsed = parse(&text);
    assert!(list.equal_strict(&reparsed));
    let a = reparsed.get(0).unwrap();
    assert_eq!(a.mailbox.as_deref(), Some("jane@example.com"));
    assert_eq!(a.personal.as_deref(), Some("Jane Doe"));
}

#[test]
fn comma_list_preserves_order_and_count() {
    let list = parse("a@x.com, b@y.com, c@z.com");
    assert_eq!(list.len(), 3);
    let mailboxes: Vec<_> = list
        .iter()
        .map(|a| a.mailbox.as_deref().unwrap())
        .collect();
    assert_eq!(mailboxes, ["a@x.com", "b@y.com", "c@z.com"]);
}

#[test]
fn group_syntax_roundtrip() {
    let list = parse("undisclosed-recipients: ;");
    assert_eq!(list.len(), 2);
    let g = list.get(0).unwrap();
    assert!(g.group);
    assert_eq!(g.mailbox.as_deref(), Some("undisclosed-recipients"));
    assert!(list.get(1).unwrap().is_terminator());
    assert_eq!(write_list(&list, false), "undisclosed-recipients: ;");
}

#[test]
fn comment_attaches_to_nearest_address() {
    let list = parse("jane@example.com (Jane Doe)");
    assert_eq!(list.len(), 1);
    let a = list.get(0).unwrap();
    assert_eq!(a.mailbox.as_deref(), Some("jane@example.com"));
    assert_eq!(a.personal.as_deref(), Some("Jane Doe"));
}

#[test]
fn unterminated_quote_fails_with_nothing_kept() {
    let err = parse_address_list(AddressList::new(), "\"Jane").unwrap_err();
    assert_eq!(err, AddressError::MismatchedQuote);
}

#[test]
fn qualify_touches_only_bare_mailboxes() {
    let mut list = parse("john, jane@other.com");
    list.qualify("example.com");
    assert_eq!(list.get(0).unwrap().mailbox.as_deref(), Some("john@example.com"));
    assert_eq!(list.get(1).unwrap().mailbox.as_deref(), Some("jane@other.com"));
}

#[test]
fn copy_is_equal_and_independent() {
    let list = parse("Jane <jane@x.com>, bob@y.com");
    let mut copy = list.copy_pruned(false);
    assert!(list.equal_strict(&copy));
    copy.remove_mailbox("bob@y.com");
    assert_eq!(list.len(), 2);
    assert_eq!(copy.len(), 1);
}

#[test]
fn mailbox_compare_ignores_case() {
    let a = parse("Jane@Example.com");
    let b = parse("jane@example.com");
    assert!(a.get(0).unwrap().same_mailbox(b.get(0).unwrap()));
}

#[test]
fn mixed_header_with_group_and_singletons() {
    let list = parse("boss@corp.example, team: a@corp.example, b@corp.example;, Jane <jane@x.com>");
    assert_eq!(list.len(), 6);
    assert_eq!(list.get(0).unwrap().mailbox.as_deref(), Some("boss@corp.example"));
    assert!(list.get(1).unwrap().group);
    assert!(list.get(4).unwrap().is_terminator());
    assert_eq!(list.get(5).unwrap().personal.as_deref(), Some("Jane"));
    assert_eq!(
        write_list(&list, false),
        "boss@corp.example, team: a@corp.example, b@corp.example;, Jane <jane@x.com>"
    );
}

#[test]
fn loose_parse_for_alias_style_input() {
    let list = parse_address_list_loose(AddressList::new(), "alice bob carol@example.net");
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(0).unwrap().mailbox.as_deref(), Some("alice"));
    assert_eq!(list.get(2).unwrap().mailbox.as_deref(), Some("carol@example.net"));
}

#[test]
fn route_address_roundtrip() {
    let list = parse("<@relay.example:user@final.example>");
    let a = list.get(0).unwrap();
    assert_eq!(a.mailbox.as_deref(), Some("@relay.example:user@final.example"));
    // mailbox starting with @ gets angle brackets back
    assert_eq!(write_list(&list, false), "<@relay.example:user@final.example>");
}

#[test]
fn folded_header_parses_like_unfolded() {
    let folded = parse("Jane\r\n Doe <jane@example.com>,\r\n bob@y.com");
    let plain = parse("Jane Doe <jane@example.com>, bob@y.com");
    assert!(folded.equal_strict(&plain));
}
