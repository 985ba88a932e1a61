/// One named bit field of the 18-bit micro-instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: u32,
    pub width: u32,
}

impl Field {
    const fn new(name: &'static str, offset: u32, width: u32) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    pub const fn mask(self) -> u32 {
        ((1 << self.width) - 1) << self.offset
    }

    /// Largest value the field can hold.
    pub const fn max(self) -> u32 {
        (1 << self.width) - 1
    }
}

/// Layout select: 0 = micro-operation, 1 = micro-sequencing.
pub const MODE: Field = Field::new("mode", 17, 1);

// Micro-operation layout (MODE = 0)

/// Memory write enable.
pub const MW: Field = Field::new("mw", 16, 1);
/// Register file output A address. Used to address memory.
pub const AA: Field = Field::new("aa", 13, 3);
/// B bus select: 0 = register output B, 1 = constant input.
pub const MB: Field = Field::new("mb", 12, 1);
/// Register file output B address, or a constant code when MB = 1.
pub const BA: Field = Field::new("ba", 9, 3);
/// Result select: 0 = function unit output, 1 = memory unit response.
pub const MF: Field = Field::new("mf", 8, 1);
/// Function select.
pub const FS: Field = Field::new("fs", 4, 4);
/// Destination register address.
pub const DA: Field = Field::new("da", 1, 3);
/// Register write enable.
pub const RW: Field = Field::new("rw", 0, 1);

// Micro-sequencing layout (MODE = 1)

/// Condition flags (PZN).
pub const COND: Field = Field::new("cond", 12, 3);
/// Address to jump to when a condition flag matches.
pub const NEXT_ADDR: Field = Field::new("next_addr", 4, 8);
