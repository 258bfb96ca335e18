// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM `char16` Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cim_type::CimType;
use super::value::ValueError;

/// Single UTF-16 code unit
///
/// Characters outside the Basic Multilingual Plane need two code units and
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Char16(u16);

impl Char16 {
    /// Create from a raw code unit
    pub fn from_code_unit(unit: u16) -> Self {
        Self(unit)
    }

    /// Create from a Rust `char`, rejecting supplementary-plane characters
    pub fn new(ch: char) -> Result<Self, ValueError> {
        let code = ch as u32;
        u16::try_from(code).map(Self).map_err(|_| ValueError::Range {
            cim_type: CimType::Char16,
            value: format!("U+{:04X}", code),
        })
    }

    /// Raw code unit
    pub fn code_unit(&self) -> u16 {
        self.0
    }

    /// Convert to a Rust `char`; unpaired surrogates map to U+FFFD
    pub fn to_char(&self) -> char {
        char::from_u32(u32::from(self.0)).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl TryFrom<char> for Char16 {
    type Error = ValueError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Self::new(ch)
    }
}

impl fmt::Display for Char16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmp_characters() {
        assert_eq!(Char16::new('A').unwrap().code_unit(), 0x41);
        assert_eq!(Char16::new('é').unwrap().to_char(), 'é');
    }

    #[test]
    fn test_supplementary_plane_rejected() {
        assert!(matches!(
            Char16::new('😀'),
            Err(ValueError::Range { cim_type: CimType::Char16, .. })
        ));
    }

    #[test]
    fn test_surrogate_display() {
        assert_eq!(Char16::from_code_unit(0xD800).to_char(), char::REPLACEMENT_CHARACTER);
    }
}
