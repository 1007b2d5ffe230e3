use serde::{Deserialize, Serialize};

/// Numeric code of a flagged cell, shared by rendering and snapshots.
pub const FLAG_CODE: u8 = 10;
/// Numeric code of a cell with no stored entry.
pub const UNREVEALED_CODE: u8 = 11;
/// Numeric code of the row terminator in a rendered window.
pub const END_OF_LINE_CODE: u8 = 12;

/// Value of a stored cell. Unrevealed cells are never stored, they are the absence of an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CellValue {
    Revealed(u8),
    Flagged,
}

impl CellValue {
    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::Revealed(count) => count,
            Self::Flagged => FLAG_CODE,
        }
    }
}

impl From<CellValue> for u8 {
    fn from(value: CellValue) -> Self {
        value.code()
    }
}

/// Rejected numeric cell code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidCellCode(pub u8);

impl core::fmt::Display for InvalidCellCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid cell code {}", self.0)
    }
}

impl TryFrom<u8> for CellValue {
    type Error = InvalidCellCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0..=8 => Ok(Self::Revealed(code)),
            FLAG_CODE => Ok(Self::Flagged),
            _ => Err(InvalidCellCode(code)),
        }
    }
}

/// One item of a rendered window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderCode {
    Revealed(u8),
    Flagged,
    Unrevealed,
    EndOfLine,
}

impl RenderCode {
    pub const fn code(self) -> u8 {
        match self {
            Self::Revealed(count) => count,
            Self::Flagged => FLAG_CODE,
            Self::Unrevealed => UNREVEALED_CODE,
            Self::EndOfLine => END_OF_LINE_CODE,
        }
    }
}

impl From<Option<CellValue>> for RenderCode {
    fn from(value: Option<CellValue>) -> Self {
        match value {
            None => Self::Unrevealed,
            Some(CellValue::Revealed(count)) => Self::Revealed(count),
            Some(CellValue::Flagged) => Self::Flagged,
        }
    }
}
