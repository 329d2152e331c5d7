/// A trainer ID / secret ID pair produced by an [`IdGenerator`](crate::IdGenerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdPair {
    pub tid: u16,
    pub sid: u16,
}

impl IdPair {
    /// Split a 32-bit RNG output into its low (TID) and high (SID) halves.
    pub fn from_u32(value: u32) -> Self {
        Self {
            tid: (value & 0xFFFF) as u16,
            sid: (value >> 16) as u16,
        }
    }
}

/// A single match found during enumeration.
///
/// Results are recorded in discovery order. Two runs over the same space with
/// the same filters produce the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdResult {
    /// The initial seed that produces this ID pair.
    pub seed: u32,

    /// Trainer ID.
    pub tid: u16,

    /// Secret ID.
    pub sid: u16,

    /// The delay encoded in the seed. For unbounded searches this is the low
    /// 16 bits of the seed.
    pub delay: u32,
}

impl IdResult {
    /// Trainer shiny value.
    pub fn tsv(&self) -> u16 {
        (self.tid ^ self.sid) >> 3
    }

    /// Hour byte of the seed.
    pub fn hour(&self) -> u8 {
        ((self.seed >> 16) & 0xFF) as u8
    }

    /// The "AB" byte: `month * day + minute + second`, modulo 256.
    pub fn ab(&self) -> u8 {
        (self.seed >> 24) as u8
    }
}
