use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Condition flag set tested by a micro-sequencing word: positive,
/// zero, negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cond(u8);

impl Cond {
    pub const NONE: Cond = Cond(0b000);
    pub const P: Cond = Cond(0b100);
    pub const Z: Cond = Cond(0b010);
    pub const N: Cond = Cond(0b001);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Cond) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn from_bits(bits: u8) -> Cond {
        Cond(bits & 0b111)
    }
}

impl BitOr for Cond {
    type Output = Cond;
    fn bitor(self, rhs: Cond) -> Cond {
        Cond(self.0 | rhs.0)
    }
}

impl BitOrAssign for Cond {
    fn bitor_assign(&mut self, rhs: Cond) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        if self.contains(Cond::P) {
            write!(f, "p")?;
        }
        if self.contains(Cond::Z) {
            write!(f, "z")?;
        }
        if self.contains(Cond::N) {
            write!(f, "n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits() {
        assert_eq!(Cond::P.bits(), 0b100);
        assert_eq!(Cond::Z.bits(), 0b010);
        assert_eq!(Cond::N.bits(), 0b001);
        assert_eq!((Cond::Z | Cond::N).bits(), 0b011);
    }

    #[test]
    fn contains() {
        let zn = Cond::Z | Cond::N;
        assert!(zn.contains(Cond::Z));
        assert!(zn.contains(Cond::N));
        assert!(!zn.contains(Cond::P));
        assert!(Cond::NONE.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!((Cond::P | Cond::Z | Cond::N).to_string(), "pzn");
        assert_eq!((Cond::Z | Cond::N).to_string(), "zn");
        assert_eq!(Cond::NONE.to_string(), "-");
    }
}
