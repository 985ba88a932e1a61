use num_enum::IntoPrimitive;

/// Function unit select codes.
///
/// `F0`/`F1` drive a constant zero or one onto the result, `FA`/`FB`
/// pass a bus value through unchanged, the rest compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive)]
#[repr(u8)]
pub enum Func {
    #[default]
    F0 = 0x0,
    F1 = 0x1,
    FA = 0x2,
    FB = 0x3,
    ADD = 0x4,
    SUB = 0x5,
    MUL = 0x6,
    DIV = 0x7,
    NOT = 0x8,
    AND = 0x9,
    OR = 0xA,
    NADD = 0xB,
    RSH = 0xC,
    LSH = 0xD,
    SAR = 0xE,
    MOV = 0xF,
}
