/*
 * mod.rs
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

//! RFC 822 addresses: the data model and whole-list operations.
//!
//! An [`AddressList`] is an ordered, exclusively owned sequence of
//! [`Address`] records in input order. Group syntax is flattened into the
//! sequence: a record with `group` set opens a group (its mailbox is the
//! group name), and a later record with no mailbox closes it.

mod buffer;
mod error;
mod parser;
mod token;
mod writer;

pub use error::AddressError;
pub use parser::{parse_address_list, parse_address_list_loose};
pub use writer::{escape_specials, write_address_list, write_address_single, write_list, WriteBuf};

/// One mail address, or one group marker.
///
/// A parsed non-group address always has a mailbox; `"@"` is the historical
/// sentinel for an empty addr-spec inside route brackets (`<>`), preserved
/// as observed behavior rather than corrected.
#[derive(Debug, Clone, Default)]
pub struct Address {
    /// `local-part@domain` text; None for a group terminator.
    pub mailbox: Option<String>,
    /// Display name (phrase) or parenthetical comment.
    pub personal: Option<String>,
    /// True for a record that opens a named group.
    pub group: bool,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    /// True for a group terminator (closes the nearest open group).
    pub fn is_terminator(&self) -> bool {
        self.mailbox.is_none() && !self.group
    }

    /// Mailbox form for display. Hook for charset/IDNA-aware rewriting,
    /// which happens outside this crate; currently the stored text.
    pub fn display_mailbox(&self) -> Option<&str> {
        self.mailbox.as_deref()
    }

    /// Case-insensitive mailbox comparison. False when either mailbox is
    /// unset (group terminators never compare equal).
    pub fn same_mailbox(&self, other: &Address) -> bool {
        match (&self.mailbox, &other.mailbox) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

/// Ordered, owning list of addresses. Insertion is at the tail only; copies
/// are deep (no record is ever shared between lists).
#[derive(Debug, Clone, Default)]
pub struct AddressList {
    addresses: Vec<Address>,
}

impl AddressList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn push(&mut self, addr: Address) {
        self.addresses.push(addr);
    }

    pub fn get(&self, index: usize) -> Option<&Address> {
        self.addresses.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.addresses.iter()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Address> {
        self.addresses.last_mut()
    }

    /// Remove every record whose mailbox matches (ASCII case-insensitive).
    /// Returns whether anything was removed.
    pub fn remove_mailbox(&mut self, mailbox: &str) -> bool {
        let before = self.addresses.len();
        self.addresses.retain(|a| {
            !a.mailbox
                .as_deref()
                .map_or(false, |m| m.eq_ignore_ascii_case(mailbox))
        });
        self.addresses.len() != before
    }

    /// Expand bare local names using a hostname: `john` + `example.com`
    /// becomes `john@example.com`. Group markers are left alone.
    pub fn qualify(&mut self, host: &str) {
        for addr in &mut self.addresses {
            if addr.group {
                continue;
            }
            if let Some(mailbox) = &addr.mailbox {
                if !mailbox.contains('@') {
                    addr.mailbox = Some(format!("{}@{}", mailbox, host));
                }
            }
        }
    }

    /// Deep copy. With `prune`, a group-opening record whose group is empty
    /// (immediately followed by a mailbox-less record, or by nothing) is
    /// dropped; its terminator, if any, is kept as the original did.
    pub fn copy_pruned(&self, prune: bool) -> AddressList {
        let mut out = AddressList::new();
        for (i, addr) in self.addresses.iter().enumerate() {
            if prune && addr.group {
                let next_has_mailbox = self
                    .addresses
                    .get(i + 1)
                    .map_or(false, |n| n.mailbox.is_some());
                if !next_has_mailbox {
                    continue;
                }
            }
            out.push(addr.clone());
        }
        out
    }

    /// Deep-copy `src` (optionally pruned) onto the tail of this list.
    pub fn append(&mut self, src: &AddressList, prune: bool) {
        self.addresses.extend(src.copy_pruned(prune).addresses);
    }

    /// Pairwise, case-sensitive comparison of mailbox and personal fields.
    /// Lists of different lengths are unequal.
    pub fn equal_strict(&self, other: &AddressList) -> bool {
        if self.addresses.len() != other.addresses.len() {
            return false;
        }
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| a.mailbox == b.mailbox && a.personal == b.personal)
    }

    /// Membership by case-insensitive mailbox match.
    pub fn contains(&self, addr: &Address) -> bool {
        self.iter().any(|a| a.same_mailbox(addr))
    }

    /// Number of records that are actual recipients: a mailbox is set and
    /// the record is not a group marker.
    pub fn recipient_count(&self) -> usize {
        self.iter()
            .filter(|a| a.mailbox.is_some() && !a.group)
            .count()
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.iter()
    }
}

/// Minimal Message-ID sanity check: `<...@...>`, at least five characters,
/// ASCII only. Deliberately incomplete; enough to reject obviously bogus
/// ids handed to authentication code.
pub fn valid_message_id(msgid: &str) -> bool {
    let bytes = msgid.as_bytes();
    if bytes.len() < 5 {
        // <atom@atom>
        return false;
    }
    if bytes[0] != b'<' || bytes[bytes.len() - 1] != b'>' {
        return false;
    }
    if !msgid.contains('@') {
        return false;
    }
    bytes.iter().all(|&c| c <= 127)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(mailbox: &str, personal: Option<&str>) -> Address {
        Address {
            mailbox: Some(mailbox.to_string()),
            personal: personal.map(|s| s.to_string()),
            group: false,
        }
    }

    fn list_of(addrs: Vec<Address>) -> AddressList {
        let mut list = AddressList::new();
        for a in addrs {
            list.push(a);
        }
        list
    }

    #[test]
    fn same_mailbox_case_insensitive() {
        let a = addr("Jane@Example.com", None);
        let b = addr("jane@example.com", Some("Jane"));
        assert!(a.same_mailbox(&b));
        assert!(!a.same_mailbox(&Address::new()));
    }

    #[test]
    fn remove_mailbox_removes_all_matches() {
        let mut list = list_of(vec![
            addr("a@x.com", None),
            addr("B@Y.COM", None),
            addr("b@y.com", None),
        ]);
        assert!(list.remove_mailbox("b@y.com"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().mailbox.as_deref(), Some("a@x.com"));
        assert!(!list.remove_mailbox("missing@nowhere"));
    }

    #[test]
    fn qualify_only_bare_mailboxes() {
        let mut list = list_of(vec![addr("john", None), addr("jane@other.com", None)]);
        list.qualify("example.com");
        assert_eq!(list.get(0).unwrap().mailbox.as_deref(), Some("john@example.com"));
        assert_eq!(list.get(1).unwrap().mailbox.as_deref(), Some("jane@other.com"));
    }

    #[test]
    fn qualify_skips_groups() {
        let mut group = Address::new();
        group.mailbox = Some("friends".to_string());
        group.group = true;
        let mut list = list_of(vec![group, addr("bob", None), Address::new()]);
        list.qualify("example.com");
        assert_eq!(list.get(0).unwrap().mailbox.as_deref(), Some("friends"));
        assert_eq!(list.get(1).unwrap().mailbox.as_deref(), Some("bob@example.com"));
    }

    #[test]
    fn copy_is_deep_and_equal() {
        let list = list_of(vec![addr("a@x.com", Some("A")), addr("b@y.com", None)]);
        let copy = list.copy_pruned(false);
        assert!(list.equal_strict(&copy));
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn copy_prunes_empty_groups() {
        let mut group = Address::new();
        group.mailbox = Some("empty".to_string());
        group.group = true;
        let list = list_of(vec![group, Address::new(), addr("a@x.com", None)]);
        let pruned = list.copy_pruned(true);
        // opener dropped, terminator kept
        assert_eq!(pruned.len(), 2);
        assert!(pruned.get(0).unwrap().is_terminator());
        assert_eq!(pruned.get(1).unwrap().mailbox.as_deref(), Some("a@x.com"));

        let unpruned = list.copy_pruned(false);
        assert_eq!(unpruned.len(), 3);
    }

    #[test]
    fn equal_strict_is_case_sensitive_and_length_aware() {
        let a = list_of(vec![addr("a@x.com", None)]);
        let b = list_of(vec![addr("A@X.COM", None)]);
        assert!(!a.equal_strict(&b));
        let c = list_of(vec![addr("a@x.com", None), addr("b@y.com", None)]);
        assert!(!a.equal_strict(&c));
        assert!(a.equal_strict(&a.clone()));
    }

    #[test]
    fn append_with_prune() {
        let mut dest = list_of(vec![addr("a@x.com", None)]);
        let mut group = Address::new();
        group.mailbox = Some("empty".to_string());
        group.group = true;
        let src = list_of(vec![group, Address::new()]);
        dest.append(&src, true);
        assert_eq!(dest.len(), 2);
        dest.append(&src, false);
        assert_eq!(dest.len(), 4);
    }

    #[test]
    fn contains_and_recipient_count() {
        let mut group = Address::new();
        group.mailbox = Some("all".to_string());
        group.group = true;
        let list = list_of(vec![group, addr("a@x.com", None), Address::new()]);
        assert!(list.contains(&addr("A@X.COM", None)));
        assert!(!list.contains(&addr("b@y.com", None)));
        assert_eq!(list.recipient_count(), 1);
    }

    #[test]
    fn message_id_checks() {
        assert!(valid_message_id("<a@b>"));
        assert!(valid_message_id("<20161128.29084@mydomain.example>"));
        assert!(!valid_message_id(""));
        assert!(!valid_message_id("<a@>")); // too short
        assert!(!valid_message_id("a@b"));
        assert!(!valid_message_id("<ab>"));
        assert!(!valid_message_id("<\u{e9}@b>"));
    }
}
