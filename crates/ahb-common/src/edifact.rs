//! EDIFACT format/version identity types and Prüfidentifikator parsing.
//!
//! These are small, `Copy` value types used purely as lookup keys by
//! [`crate`] consumers (chiefly the `TokenLogicProvider` in `ahb-providers`);
//! they carry no message-walking behavior of their own -- that lives outside
//! this engine entirely.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the closed set of EDIFACT message formats used in the German
/// energy market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdifactFormat {
    Aperak,
    Iftsta,
    Insrpt,
    Invoic,
    Mscons,
    Orders,
    Ordrsp,
    Pricat,
    Quotes,
    Remadv,
    Reqote,
    Utilmd,
    Utilts,
}

impl EdifactFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdifactFormat::Aperak => "APERAK",
            EdifactFormat::Iftsta => "IFTSTA",
            EdifactFormat::Insrpt => "INSRPT",
            EdifactFormat::Invoic => "INVOIC",
            EdifactFormat::Mscons => "MSCONS",
            EdifactFormat::Orders => "ORDERS",
            EdifactFormat::Ordrsp => "ORDRSP",
            EdifactFormat::Pricat => "PRICAT",
            EdifactFormat::Quotes => "QUOTES",
            EdifactFormat::Remadv => "REMADV",
            EdifactFormat::Reqote => "REQOTE",
            EdifactFormat::Utilmd => "UTILMD",
            EdifactFormat::Utilts => "UTILTS",
        }
    }
}

impl fmt::Display for EdifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date-derived format-version tag, e.g. `FV2104`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdifactFormatVersion {
    Fv2104,
    Fv2110,
    Fv2204,
    Fv2210,
}

impl EdifactFormatVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdifactFormatVersion::Fv2104 => "FV2104",
            EdifactFormatVersion::Fv2110 => "FV2110",
            EdifactFormatVersion::Fv2204 => "FV2204",
            EdifactFormatVersion::Fv2210 => "FV2210",
        }
    }
}

impl fmt::Display for EdifactFormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a Prüfidentifikator string is malformed or names no
/// known format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruefidentifikatorError {
    /// Not exactly 5 ASCII digits with a non-zero leading digit.
    Malformed(String),
    /// Well-formed, but its leading two digits name no known format.
    UnknownFormat(String),
}

impl fmt::Display for PruefidentifikatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PruefidentifikatorError::Malformed(s) => {
                write!(f, "'{s}' is not a valid Pruefidentifikator (expected 5 digits, not starting with 0)")
            }
            PruefidentifikatorError::UnknownFormat(s) => {
                write!(f, "'{s}' does not map to a known EDIFACT format")
            }
        }
    }
}

impl std::error::Error for PruefidentifikatorError {}

/// Maps a 5-digit Prüfidentifikator to its EDIFACT format, per the leading
/// two digits. `21` is ambiguous between IFTSTA and PRICAT in the original
/// table; without further context we resolve it to IFTSTA, the more common
/// of the two, and leave PRICAT reachable only via [`pruefidentifikator_to_format_hint`].
pub fn pruefidentifikator_to_format(pruefi: &str) -> Result<EdifactFormat, PruefidentifikatorError> {
    if pruefi.len() != 5 || !pruefi.bytes().all(|b| b.is_ascii_digit()) || pruefi.starts_with('0') {
        return Err(PruefidentifikatorError::Malformed(pruefi.to_string()));
    }
    let leading: &str = &pruefi[..2];
    format_for_leading_digits(leading).ok_or_else(|| PruefidentifikatorError::UnknownFormat(pruefi.to_string()))
}

/// Like [`pruefidentifikator_to_format`], but lets the caller disambiguate
/// the `21` prefix (IFTSTA vs. PRICAT) by passing `prefer_pricat`.
pub fn pruefidentifikator_to_format_hint(
    pruefi: &str,
    prefer_pricat: bool,
) -> Result<EdifactFormat, PruefidentifikatorError> {
    if pruefi.len() != 5 || !pruefi.bytes().all(|b| b.is_ascii_digit()) || pruefi.starts_with('0') {
        return Err(PruefidentifikatorError::Malformed(pruefi.to_string()));
    }
    if &pruefi[..2] == "21" {
        return Ok(if prefer_pricat { EdifactFormat::Pricat } else { EdifactFormat::Iftsta });
    }
    format_for_leading_digits(&pruefi[..2]).ok_or_else(|| PruefidentifikatorError::UnknownFormat(pruefi.to_string()))
}

fn format_for_leading_digits(leading: &str) -> Option<EdifactFormat> {
    match leading {
        "11" => Some(EdifactFormat::Utilmd),
        "13" => Some(EdifactFormat::Mscons),
        "17" => Some(EdifactFormat::Orders),
        "19" => Some(EdifactFormat::Ordrsp),
        "21" => Some(EdifactFormat::Iftsta),
        "23" => Some(EdifactFormat::Insrpt),
        "25" => Some(EdifactFormat::Utilts),
        "31" => Some(EdifactFormat::Invoic),
        "33" => Some(EdifactFormat::Remadv),
        "35" => Some(EdifactFormat::Reqote),
        "99" => Some(EdifactFormat::Aperak),
        _ => None,
    }
}
