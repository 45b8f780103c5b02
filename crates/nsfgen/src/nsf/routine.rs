//! 6502 routine emitter.
//!
//! `Routine` appends the few instructions fixture code needs and keeps a
//! listing entry per instruction, so a caller can print what was emitted
//! without decoding the bytes back.
use crate::binutil::hex_bytes;
use std::fmt;

pub const OP_NOP: u8 = 0xEA;
pub const OP_RTS: u8 = 0x60;
pub const OP_LDA_IMM: u8 = 0xA9;
pub const OP_STA_ABS: u8 = 0x8D;

/// One emitted instruction: its offset within the routine and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub offset: usize,
    pub len: usize,
    pub text: String,
}

/// A straight-line machine-code routine under construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Routine {
    bytes: Vec<u8>,
    instructions: Vec<Instruction>,
}

impl Routine {
    pub fn new() -> Self {
        Routine::default()
    }

    fn emit(&mut self, encoded: &[u8], text: String) -> &mut Self {
        self.instructions.push(Instruction {
            offset: self.bytes.len(),
            len: encoded.len(),
            text,
        });
        self.bytes.extend_from_slice(encoded);
        self
    }

    pub fn nop(&mut self) -> &mut Self {
        self.emit(&[OP_NOP], "NOP".into())
    }

    pub fn rts(&mut self) -> &mut Self {
        self.emit(&[OP_RTS], "RTS".into())
    }

    /// `LDA #value`
    pub fn lda_imm(&mut self, value: u8) -> &mut Self {
        self.emit(&[OP_LDA_IMM, value], format!("LDA #${:02X}", value))
    }

    /// `STA addr` (absolute addressing, operand little-endian).
    pub fn sta_abs(&mut self, addr: u16) -> &mut Self {
        let [lo, hi] = addr.to_le_bytes();
        self.emit(&[OP_STA_ABS, lo, hi], format!("STA ${:04X}", addr))
    }

    /// Store an immediate value to a register: `LDA #value; STA addr`.
    pub fn store(&mut self, addr: u16, value: u8) -> &mut Self {
        self.lda_imm(value).sta_abs(addr)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Listing lines for this routine as if it were loaded at `base`.
    pub fn listing(&self, base: u16) -> Vec<ListingLine> {
        self.instructions
            .iter()
            .map(|ins| ListingLine {
                address: base.wrapping_add(ins.offset as u16),
                bytes: self.bytes[ins.offset..ins.offset + ins.len].to_vec(),
                text: ins.text.clone(),
            })
            .collect()
    }
}

/// A single printable listing line: `$8000: A9 0F     LDA #$0F`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    pub address: u16,
    pub bytes: Vec<u8>,
    pub text: String,
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${:04X}: {:<9} {}",
            self.address,
            hex_bytes(&self.bytes),
            self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_nop_rts() {
        let mut r = Routine::new();
        r.nop().nop().rts();
        assert_eq!(r.as_bytes(), &[0xEA, 0xEA, 0x60]);
        assert_eq!(r.instructions().len(), 3);
    }

    #[test]
    fn store_emits_lda_sta_pair() {
        let mut r = Routine::new();
        r.store(0x4015, 0x0F);
        assert_eq!(r.as_bytes(), &[0xA9, 0x0F, 0x8D, 0x15, 0x40]);

        let ins = r.instructions();
        assert_eq!(ins[0].text, "LDA #$0F");
        assert_eq!(ins[1].offset, 2);
        assert_eq!(ins[1].len, 3);
        assert_eq!(ins[1].text, "STA $4015");
    }

    #[test]
    fn listing_uses_base_address() {
        let mut r = Routine::new();
        r.nop().rts();
        let lines = r.listing(0x8004);
        assert_eq!(lines[0].address, 0x8004);
        assert_eq!(lines[1].address, 0x8005);
        assert_eq!(lines[1].to_string(), "$8005: 60        RTS");
    }
}
