//! Control words and the instruction set they implement.

use std::fmt;
use std::ops::BitOr;

/// The set of control lines asserted during one clock cycle.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ControlWord(u16);

impl ControlWord {
    pub const NONE: ControlWord = ControlWord(0);
    /// Halt the clock.
    pub const HLT: ControlWord = ControlWord(1 << 0);
    /// Memory address register in.
    pub const MI: ControlWord = ControlWord(1 << 1);
    /// RAM in (write).
    pub const RI: ControlWord = ControlWord(1 << 2);
    /// RAM out.
    pub const RO: ControlWord = ControlWord(1 << 3);
    /// Instruction register out (operand field only).
    pub const IO: ControlWord = ControlWord(1 << 4);
    /// Instruction register in.
    pub const II: ControlWord = ControlWord(1 << 5);
    pub const AI: ControlWord = ControlWord(1 << 6);
    pub const AO: ControlWord = ControlWord(1 << 7);
    /// ALU (sum) out.
    pub const EO: ControlWord = ControlWord(1 << 8);
    /// ALU subtract.
    pub const SU: ControlWord = ControlWord(1 << 9);
    pub const BI: ControlWord = ControlWord(1 << 10);
    /// Output register in.
    pub const OI: ControlWord = ControlWord(1 << 11);
    /// Program counter count enable.
    pub const CE: ControlWord = ControlWord(1 << 12);
    /// Program counter out.
    pub const CO: ControlWord = ControlWord(1 << 13);
    /// Jump (program counter in).
    pub const J: ControlWord = ControlWord(1 << 14);

    const NAMES: [(ControlWord, &'static str); 15] = [
        (Self::HLT, "HLT"),
        (Self::MI, "MI"),
        (Self::RI, "RI"),
        (Self::RO, "RO"),
        (Self::IO, "IO"),
        (Self::II, "II"),
        (Self::AI, "AI"),
        (Self::AO, "AO"),
        (Self::EO, "EO"),
        (Self::SU, "SU"),
        (Self::BI, "BI"),
        (Self::OI, "OI"),
        (Self::CE, "CE"),
        (Self::CO, "CO"),
        (Self::J, "J"),
    ];

    pub const fn union(self, other: ControlWord) -> ControlWord {
        ControlWord(self.0 | other.0)
    }

    pub const fn contains(self, line: ControlWord) -> bool {
        self.0 & line.0 == line.0
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ControlWord {
    type Output = ControlWord;

    fn bitor(self, rhs: ControlWord) -> ControlWord {
        self.union(rhs)
    }
}

impl fmt::Debug for ControlWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlWord({})", self)
    }
}

impl fmt::Display for ControlWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(line, _)| self.contains(*line))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join("|"))
    }
}

/// Two cycles shared by every instruction: address the next instruction,
/// then latch it and advance the program counter.
pub const FETCH: [ControlWord; 2] = [
    ControlWord::CO.union(ControlWord::MI),
    ControlWord::RO.union(ControlWord::II).union(ControlWord::CE),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Lda,
    Add,
    Sub,
    Sta,
    Ldi,
    Jmp,
    Out,
    Hlt,
}

impl Instruction {
    pub fn decode(opcode: u64) -> Option<Self> {
        match opcode {
            0x0 => Some(Instruction::Nop),
            0x1 => Some(Instruction::Lda),
            0x2 => Some(Instruction::Add),
            0x3 => Some(Instruction::Sub),
            0x4 => Some(Instruction::Sta),
            0x5 => Some(Instruction::Ldi),
            0x6 => Some(Instruction::Jmp),
            0xE => Some(Instruction::Out),
            0xF => Some(Instruction::Hlt),
            _ => None,
        }
    }

    pub fn opcode(self) -> u8 {
        match self {
            Instruction::Nop => 0x0,
            Instruction::Lda => 0x1,
            Instruction::Add => 0x2,
            Instruction::Sub => 0x3,
            Instruction::Sta => 0x4,
            Instruction::Ldi => 0x5,
            Instruction::Jmp => 0x6,
            Instruction::Out => 0xE,
            Instruction::Hlt => 0xF,
        }
    }

    /// Assemble one 8-bit instruction byte.
    pub fn encode(self, operand: u8) -> u8 {
        (self.opcode() << 4) | (operand & 0x0F)
    }

    pub fn from_mnemonic(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "NOP" => Some(Instruction::Nop),
            "LDA" => Some(Instruction::Lda),
            "ADD" => Some(Instruction::Add),
            "SUB" => Some(Instruction::Sub),
            "STA" => Some(Instruction::Sta),
            "LDI" => Some(Instruction::Ldi),
            "JMP" => Some(Instruction::Jmp),
            "OUT" => Some(Instruction::Out),
            "HLT" => Some(Instruction::Hlt),
            _ => None,
        }
    }

    /// Assemble a line such as `"ADD 15"`. The operand defaults to zero and
    /// must fit the four-bit field.
    pub fn assemble(line: &str) -> Option<u8> {
        let mut parts = line.split_whitespace();
        let instruction = Self::from_mnemonic(parts.next()?)?;
        let operand = match parts.next() {
            Some(text) => parse_operand(text)?,
            None => 0,
        };
        if operand > 0x0F || parts.next().is_some() {
            return None;
        }
        Some(instruction.encode(operand))
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Nop => "NOP",
            Instruction::Lda => "LDA",
            Instruction::Add => "ADD",
            Instruction::Sub => "SUB",
            Instruction::Sta => "STA",
            Instruction::Ldi => "LDI",
            Instruction::Jmp => "JMP",
            Instruction::Out => "OUT",
            Instruction::Hlt => "HLT",
        }
    }

    /// Execute-phase control words, run after [`FETCH`].
    pub fn microcode(self) -> &'static [ControlWord] {
        use ControlWord as C;

        const LDA: [ControlWord; 2] = [C::IO.union(C::MI), C::RO.union(C::AI)];
        const ADD: [ControlWord; 3] = [
            C::IO.union(C::MI),
            C::RO.union(C::BI),
            C::EO.union(C::AI),
        ];
        const SUB: [ControlWord; 3] = [
            C::IO.union(C::MI),
            C::RO.union(C::BI),
            C::EO.union(C::AI).union(C::SU),
        ];
        const STA: [ControlWord; 2] = [C::IO.union(C::MI), C::AO.union(C::RI)];
        const LDI: [ControlWord; 1] = [C::IO.union(C::AI)];
        const JMP: [ControlWord; 1] = [C::IO.union(C::J)];
        const OUT: [ControlWord; 1] = [C::AO.union(C::OI)];
        const HLT: [ControlWord; 1] = [C::HLT];

        match self {
            Instruction::Nop => &[],
            Instruction::Lda => &LDA,
            Instruction::Add => &ADD,
            Instruction::Sub => &SUB,
            Instruction::Sta => &STA,
            Instruction::Ldi => &LDI,
            Instruction::Jmp => &JMP,
            Instruction::Out => &OUT,
            Instruction::Hlt => &HLT,
        }
    }
}

fn parse_operand(text: &str) -> Option<u8> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
