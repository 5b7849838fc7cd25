//! The fixed DNA alphabet of the index
//!
//! Columns of the index carry outgoing edges labeled with one of four symbols,
//! always enumerated in the order A, C, G, T. Query characters are mapped to
//! symbols case-insensitively; anything else has no symbol and can never be
//! part of an indexed k-mer.

/// Number of symbols in the alphabet
pub const SIGMA: usize = 4;

/// The alphabet in ASCII, in symbol order
pub const DNA_ALPHABET: [u8; SIGMA] = *b"ACGT";

/// 256-entry LUT: ASCII to symbol index (A=0, C=1, G=2, T=3), 0xFF otherwise.
static SYMBOL_LUT: [u8; 256] = {
    const X: u8 = 0xFF;
    let mut t = [X; 256];
    t[b'A' as usize] = 0;
    t[b'a' as usize] = 0;
    t[b'C' as usize] = 1;
    t[b'c' as usize] = 1;
    t[b'G' as usize] = 2;
    t[b'g' as usize] = 2;
    t[b'T' as usize] = 3;
    t[b't' as usize] = 3;
    t
};

/// One symbol of the DNA alphabet
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Symbol {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}
impl Symbol {
    /// All symbols in alphabet order
    pub const ALL: [Symbol; SIGMA] = [Symbol::A, Symbol::C, Symbol::G, Symbol::T];

    /// Maps an ASCII character to its symbol, ignoring case.
    ///
    /// Returns `None` for anything outside {A, C, G, T}.
    #[inline]
    #[must_use]
    pub fn from_ascii(c: u8) -> Option<Self> {
        match SYMBOL_LUT[c as usize] {
            0 => Some(Self::A),
            1 => Some(Self::C),
            2 => Some(Self::G),
            3 => Some(Self::T),
            _ => None,
        }
    }

    /// Position of the symbol in the alphabet
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper-case ASCII character of the symbol
    #[inline]
    #[must_use]
    pub fn to_ascii(self) -> u8 {
        DNA_ALPHABET[self.index()]
    }
}

impl From<Symbol> for char {
    fn from(symbol: Symbol) -> Self {
        char::from(symbol.to_ascii())
    }
}
