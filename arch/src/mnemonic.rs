use strum::{Display, EnumString};

/// The fixed instruction mnemonic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Mnemonic {
    MOV,
    ADD,
    SUB,
    MUL,
    RSH,
    NOT,
    AND,
    DIV,
    OR,
    NADD,
    LSH,
    SAR,
    JMP,
    NOP,
}
