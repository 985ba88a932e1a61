use arch::minstr::MicroInstruction;

use crate::error::ErrorKind;

/// Slots in the control store.
pub const ROM_SIZE: usize = 256;

/// The fixed-capacity control store image. Unwritten slots keep their
/// all-zero default.
#[derive(Debug)]
pub struct Rom {
    words: [MicroInstruction; ROM_SIZE],
    cursor: usize,
}

impl Rom {
    pub fn new() -> Self {
        Self {
            words: [MicroInstruction::default(); ROM_SIZE],
            cursor: 0,
        }
    }

    /// Next slot to be written.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Appends a word at the cursor and returns the slot it landed in.
    pub fn push(&mut self, word: MicroInstruction) -> Result<u8, ErrorKind> {
        if self.cursor >= ROM_SIZE {
            return Err(ErrorKind::RomOverflow);
        }
        let pos = self.cursor as u8;
        self.words[self.cursor] = word;
        self.cursor += 1;
        Ok(pos)
    }

    /// Relocates the write cursor (`.org`).
    pub fn set_origin(&mut self, addr: u16) -> Result<(), ErrorKind> {
        if usize::from(addr) >= ROM_SIZE {
            return Err(ErrorKind::OrgRange(addr));
        }
        self.cursor = usize::from(addr);
        Ok(())
    }

    pub fn get(&self, pos: u8) -> MicroInstruction {
        self.words[usize::from(pos)]
    }

    /// Writes a resolved jump target into the word at `pos`.
    pub fn patch_next_addr(&mut self, pos: u8, target: u8) {
        self.words[usize::from(pos)].set_next_addr(target);
    }

    pub fn words(&self) -> &[MicroInstruction; ROM_SIZE] {
        &self.words
    }

    /// Packed binary image: 256 three-byte words, most-significant
    /// byte first, independent of host byte order.
    pub fn to_raw(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ROM_SIZE * 3);
        for word in &self.words {
            out.extend_from_slice(&word.to_bytes());
        }
        out
    }

    /// Logisim `v2.0 raw` text: the header line, then every word as
    /// six uppercase hex digits, space-separated on a single line.
    pub fn to_logisim(&self) -> String {
        let mut out = String::from("v2.0 raw\n");
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            for byte in word.to_bytes() {
                out.push_str(&format!("{byte:02X}"));
            }
        }
        out
    }
}

impl Default for Rom {
    fn default() -> Self {
        Self::new()
    }
}
