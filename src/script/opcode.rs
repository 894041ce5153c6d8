/// NeoVM opcodes emitted by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    /// Push an empty byte array (integer zero)
    Push0 = 0x00,
    /// Push the next byte as a length, then that many bytes
    PushData1 = 0x4c,
    /// Push the next two bytes (LE) as a length, then that many bytes
    PushData2 = 0x4d,
    /// Push the next four bytes (LE) as a length, then that many bytes
    PushData4 = 0x4e,
    PushM1 = 0x4f,
    Push1 = 0x51,
    Push16 = 0x60,
    AppCall = 0x67,
    TailCall = 0x69,
    CheckSig = 0xac,
    Pack = 0xc1,
}

impl OpCode {
    /// Largest length pushed with a bare `PUSHBYTESn` opcode
    pub const MAX_PUSH_BYTES: usize = 0x4b;

    pub fn byte(self) -> u8 {
        self as u8
    }
}
