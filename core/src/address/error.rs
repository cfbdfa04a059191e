/*
 * error.rs
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

//! Address parse errors.

use std::fmt;

/// Failure modes of the address parser. Parsing stops at the first error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    /// Comment opened with `(` but never closed.
    MismatchedParen,
    /// Quoted string opened with `"` but never closed.
    MismatchedQuote,
    /// Source route (`<@host,...`) with no terminating `:`.
    BadRoute,
    /// Route address (`<...`) missing its closing `>`.
    BadRouteAddr,
    /// Trailing garbage after a bare address-spec.
    BadAddrSpec,
}

impl AddressError {
    /// Stable numeric code for external consumers. 0 means "no error";
    /// 1 is reserved for the historical out-of-memory code.
    pub fn code(&self) -> i32 {
        match self {
            AddressError::MismatchedParen => 2,
            AddressError::MismatchedQuote => 3,
            AddressError::BadRoute => 4,
            AddressError::BadRouteAddr => 5,
            AddressError::BadAddrSpec => 6,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AddressError::MismatchedParen => "mismatched parenthesis",
            AddressError::MismatchedQuote => "mismatched quotes",
            AddressError::BadRoute => "bad route in <>",
            AddressError::BadRouteAddr => "bad address in <>",
            AddressError::BadAddrSpec => "bad address spec",
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AddressError {}
