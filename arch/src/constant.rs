use num_enum::IntoPrimitive;

/// Constant-input codes selectable on the B bus when MB is set.
///
/// `One` has no constant-input encoding of its own on the B bus; the
/// assembler delivers it through the function unit (`Func::F1`) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum Const {
    Zero = 0x0,
    A = 0x1,
    B = 0x2,
    C = 0x3,
    One = 0x4,
}
