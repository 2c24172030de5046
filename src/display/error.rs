/*
 *  display/error.rs
 *
 *  inkcast - six days of weather on one sheet of e-paper
 *
 *  Error types for the layout engine and panel boundary
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::error::Error;
use std::fmt;

/// Fatal layout failures. Rendering cannot proceed past any of these;
/// they indicate a data-contract mismatch with the forecast provider,
/// never a condition to paper over with a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Icon code shorter than the 2-character prefix
    TruncatedIconCode(String),

    /// Icon prefix not among the 9 known codes
    UnknownIconCode(String),

    /// Epoch timestamp outside the representable calendar range
    InvalidTimestamp(i64),

    /// The today entry is missing its sunrise/sunset fields
    MissingSunTimes,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::TruncatedIconCode(code) =>
                write!(f, "Icon code too short for prefix lookup: {:?}", code),
            LayoutError::UnknownIconCode(code) =>
                write!(f, "Unrecognized icon code: {:?}", code),
            LayoutError::InvalidTimestamp(ts) =>
                write!(f, "Timestamp out of calendar range: {}", ts),
            LayoutError::MissingSunTimes =>
                write!(f, "Today entry has no sunrise/sunset times"),
        }
    }
}

impl Error for LayoutError {}

/// Errors raised at the panel collaborator boundary.
#[derive(Debug)]
pub enum PanelError {
    /// Panel/bus bring-up failed
    InitializationFailed(String),

    /// The physical refresh failed
    RefreshFailed(String),

    /// The scene itself was unrenderable
    Layout(LayoutError),
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::InitializationFailed(msg) =>
                write!(f, "Panel initialization failed: {}", msg),
            PanelError::RefreshFailed(msg) =>
                write!(f, "Panel refresh failed: {}", msg),
            PanelError::Layout(err) =>
                write!(f, "Layout error: {}", err),
        }
    }
}

impl Error for PanelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PanelError::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LayoutError> for PanelError {
    fn from(err: LayoutError) -> Self {
        PanelError::Layout(err)
    }
}
