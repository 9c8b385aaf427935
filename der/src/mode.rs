//! Encoding rule sets accepted by the reader.

/// How strictly input is checked.
///
/// Output is always DER. `Ber` only widens what the reader accepts: it
/// tolerates indefinite lengths on constructed values, non-minimal length
/// octets and the other relaxations the binder applies, and normalises all
/// of them so that re-encoding produces canonical DER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Distinguished Encoding Rules. Anything non-canonical is an error.
    #[default]
    Der,
    /// Basic Encoding Rules, restricted to length-form and ordering leniency.
    Ber,
}

impl Mode {
    pub fn is_strict(self) -> bool {
        matches!(self, Mode::Der)
    }

    pub fn allows_indefinite_length(self) -> bool {
        matches!(self, Mode::Ber)
    }
}
