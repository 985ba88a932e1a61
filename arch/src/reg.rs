use num_enum::{IntoPrimitive, TryFromPrimitive};

/// General purpose register of the datapath. The register file has
/// eight entries, addressed by three bits on each bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Reg {
    #[default]
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_index() {
        assert_eq!(Reg::try_from(0u8), Ok(Reg::R0));
        assert_eq!(Reg::try_from(7u8), Ok(Reg::R7));
        assert!(Reg::try_from(8u8).is_err());
    }

    #[test]
    fn to_index() {
        assert_eq!(u8::from(Reg::R5), 5);
    }
}
