//! Byte-order marker written at the start of every record.

#[cfg(not(any(target_endian = "little", target_endian = "big")))]
compile_error!("records can only be written on little-endian or big-endian targets");

/// Byte order of the multi-byte fields in a record.
///
/// Writers never swap their own output; the marker tells a reader whether
/// the code, name length and value need swapping on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little = 0,
    /// Most significant byte first.
    Big = 1,
}

impl ByteOrder {
    /// Byte order of the target this crate was compiled for.
    pub const NATIVE: Self = if cfg!(target_endian = "big") {
        Self::Big
    } else {
        Self::Little
    };

    /// Returns the byte order of the current target.
    #[must_use]
    pub const fn native() -> Self {
        Self::NATIVE
    }

    /// Returns the marker byte for this byte order.
    #[must_use]
    pub const fn marker(self) -> u8 {
        self as u8
    }

    /// Parses a marker byte. Anything but 0 or 1 is rejected.
    pub fn from_marker(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Little),
            1 => Some(Self::Big),
            _ => None,
        }
    }
}
