/*
 * lib.rs
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

//! C FFI for rubrica core. Address lists are opaque handles; string
//! parameters are UTF-8 NUL-terminated; returned strings are newly
//! allocated (free with rubrica_free_string).
//!
//! The most recent parse failure is kept in a process-wide error slot,
//! readable with rubrica_last_error; a successful parse clears it. This is
//! the historical out-of-band error code that the core library replaces
//! with Result values.

use libc::{c_char, c_int, size_t};
use once_cell::sync::OnceCell;
use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::Mutex;

use rubrica_core::address::{
    parse_address_list, parse_address_list_loose, write_list, AddressError, AddressList,
};

/// No error.
pub const RUBRICA_OK: c_int = 0;
/// Reserved for the historical out-of-memory code; never set.
pub const RUBRICA_ERR_OUT_OF_MEMORY: c_int = 1;
pub const RUBRICA_ERR_MISMATCHED_PAREN: c_int = 2;
pub const RUBRICA_ERR_MISMATCHED_QUOTE: c_int = 3;
pub const RUBRICA_ERR_BAD_ROUTE: c_int = 4;
pub const RUBRICA_ERR_BAD_ROUTE_ADDR: c_int = 5;
pub const RUBRICA_ERR_BAD_ADDR_SPEC: c_int = 6;

static LAST_ERROR: OnceCell<Mutex<c_int>> = OnceCell::new();

fn last_error_slot() -> &'static Mutex<c_int> {
    LAST_ERROR.get_or_init(|| Mutex::new(RUBRICA_OK))
}

fn set_last_error(err: Option<AddressError>) {
    if let Ok(mut guard) = last_error_slot().lock() {
        *guard = err.map(|e| e.code() as c_int).unwrap_or(RUBRICA_OK);
    }
}

fn ptr_to_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string()) }
}

fn string_to_ptr(s: String) -> *mut c_char {
    CString::new(s)
        .unwrap_or_else(|_| CString::new("").unwrap())
        .into_raw()
}

/// Version string (static, do not free).
#[no_mangle]
pub extern "C" fn rubrica_version() -> *const c_char {
    b"0.1.0\0".as_ptr() as *const c_char
}

/// Error code of the most recent parse (RUBRICA_OK if it succeeded).
#[no_mangle]
pub extern "C" fn rubrica_last_error() -> c_int {
    last_error_slot().lock().map(|g| *g).unwrap_or(RUBRICA_OK)
}

/// Message for an error code (static, do not free). NULL for unknown codes.
#[no_mangle]
pub extern "C" fn rubrica_error_message(code: c_int) -> *const c_char {
    let msg: &[u8] = match code {
        RUBRICA_ERR_OUT_OF_MEMORY => b"out of memory\0",
        RUBRICA_ERR_MISMATCHED_PAREN => b"mismatched parenthesis\0",
        RUBRICA_ERR_MISMATCHED_QUOTE => b"mismatched quotes\0",
        RUBRICA_ERR_BAD_ROUTE => b"bad route in <>\0",
        RUBRICA_ERR_BAD_ROUTE_ADDR => b"bad address in <>\0",
        RUBRICA_ERR_BAD_ADDR_SPEC => b"bad address spec\0",
        _ => return ptr::null(),
    };
    msg.as_ptr() as *const c_char
}

/// Create an empty address list. Free with rubrica_address_list_free.
#[no_mangle]
pub extern "C" fn rubrica_address_list_new() -> *mut AddressList {
    Box::into_raw(Box::new(AddressList::new()))
}

/// Free an address list. No-op if NULL.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_list_free(list: *mut AddressList) {
    if !list.is_null() {
        drop(Box::from_raw(list));
    }
}

/// Parse a header field body, appending to `list` (which may be NULL for an
/// empty list). The handle is consumed either way: on success a new handle
/// to the extended list is returned; on error everything is freed, NULL is
/// returned, and the error code is available from rubrica_last_error.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_list_parse(
    list: *mut AddressList,
    s: *const c_char,
) -> *mut AddressList {
    let existing = if list.is_null() {
        AddressList::new()
    } else {
        *Box::from_raw(list)
    };
    let text = match ptr_to_str(s) {
        Some(t) => t,
        None => {
            set_last_error(None);
            return Box::into_raw(Box::new(existing));
        }
    };
    match parse_address_list(existing, &text) {
        Ok(parsed) => {
            set_last_error(None);
            Box::into_raw(Box::new(parsed))
        }
        Err(e) => {
            set_last_error(Some(e));
            ptr::null_mut()
        }
    }
}

/// Lenient parse for user-typed input (whitespace-separated addresses
/// allowed). Consumes the handle; never returns NULL for a valid string.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_list_parse_loose(
    list: *mut AddressList,
    s: *const c_char,
) -> *mut AddressList {
    let existing = if list.is_null() {
        AddressList::new()
    } else {
        *Box::from_raw(list)
    };
    let text = match ptr_to_str(s) {
        Some(t) => t,
        None => return Box::into_raw(Box::new(existing)),
    };
    Box::into_raw(Box::new(parse_address_list_loose(existing, &text)))
}

/// Number of records (addresses plus group markers/terminators).
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_list_len(list: *const AddressList) -> size_t {
    if list.is_null() {
        return 0;
    }
    (*list).len()
}

/// Mailbox text of the record at `index`, or NULL when absent (group
/// terminator) or out of range. Free with rubrica_free_string.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_mailbox(
    list: *const AddressList,
    index: size_t,
) -> *mut c_char {
    if list.is_null() {
        return ptr::null_mut();
    }
    match (*list).get(index).and_then(|a| a.mailbox.clone()) {
        Some(m) => string_to_ptr(m),
        None => ptr::null_mut(),
    }
}

/// Personal (display) name of the record at `index`, or NULL. Free with
/// rubrica_free_string.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_personal(
    list: *const AddressList,
    index: size_t,
) -> *mut c_char {
    if list.is_null() {
        return ptr::null_mut();
    }
    match (*list).get(index).and_then(|a| a.personal.clone()) {
        Some(p) => string_to_ptr(p),
        None => ptr::null_mut(),
    }
}

/// 1 if the record at `index` opens a group, else 0.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_is_group(
    list: *const AddressList,
    index: size_t,
) -> c_int {
    if list.is_null() {
        return 0;
    }
    (*list).get(index).map_or(0, |a| a.group as c_int)
}

/// Serialize the list to header text. display: 1 for the display-friendly
/// form. Free the result with rubrica_free_string.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_list_write(
    list: *const AddressList,
    display: c_int,
) -> *mut c_char {
    if list.is_null() {
        return ptr::null_mut();
    }
    string_to_ptr(write_list(&*list, display != 0))
}

/// Expand bare local names with `host` (in place).
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_list_qualify(
    list: *mut AddressList,
    host: *const c_char,
) {
    if list.is_null() {
        return;
    }
    if let Some(host) = ptr_to_str(host) {
        (*list).qualify(&host);
    }
}

/// Remove all records matching `mailbox` (case-insensitive). Returns 1 if
/// anything was removed.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_list_remove(
    list: *mut AddressList,
    mailbox: *const c_char,
) -> c_int {
    if list.is_null() {
        return 0;
    }
    match ptr_to_str(mailbox) {
        Some(m) => (*list).remove_mailbox(&m) as c_int,
        None => 0,
    }
}

/// Deep-copy `src` onto the end of `dest`. prune: 1 to drop empty groups.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_list_append(
    dest: *mut AddressList,
    src: *const AddressList,
    prune: c_int,
) {
    if dest.is_null() || src.is_null() {
        return;
    }
    (*dest).append(&*src, prune != 0);
}

/// Deep-copy a list. prune: 1 to drop empty groups. Free with
/// rubrica_address_list_free.
#[no_mangle]
pub unsafe extern "C" fn rubrica_address_list_copy(
    list: *const AddressList,
    prune: c_int,
) -> *mut AddressList {
    if list.is_null() {
        return ptr::null_mut();
    }
    Box::into_raw(Box::new((*list).copy_pruned(prune != 0)))
}

/// Free a string returned by rubrica_address_mailbox, rubrica_address_personal,
/// or rubrica_address_list_write. No-op if NULL.
#[no_mangle]
pub unsafe extern "C" fn rubrica_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
