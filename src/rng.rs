use crate::entry::IdPair;
use crate::traits::IdGenerator;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;

/// The generation 4 trainer ID formula.
///
/// The game seeds a Mersenne Twister with the boot seed, discards one output,
/// and takes the next 32 bits as `SID << 16 | TID`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gen4Generator;

impl IdGenerator for Gen4Generator {
    fn generate(&self, seed: u32) -> IdPair {
        IdPair::from_u32(mt_output(seed, 1))
    }
}

/// Compute output `index` of an MT19937 seeded with `seed`, for
/// `index < N - M`.
///
/// Only the first twist of the state is ever needed for ID generation, so
/// this initialises the words that twist reads and nothing else.
///
/// # Panics
///
/// If `index >= N - M`; later outputs depend on already-twisted words.
pub fn mt_output(seed: u32, index: usize) -> u32 {
    assert!(index < N - M, "mt_output only supports the first {} outputs", N - M);

    // twisting word `index` reads mt[index], mt[index + 1] and mt[index + M]
    let words = index + M + 1;
    let mut mt = [0u32; N];
    mt[0] = seed;
    for i in 1..words {
        let prev = mt[i - 1];
        mt[i] = 1_812_433_253u32
            .wrapping_mul(prev ^ (prev >> 30))
            .wrapping_add(i as u32);
    }

    let y = (mt[index] & UPPER_MASK) | (mt[index + 1] & LOWER_MASK);
    let mut value = mt[index + M] ^ (y >> 1);
    if y & 1 != 0 {
        value ^= MATRIX_A;
    }
    temper(value)
}

fn temper(mut y: u32) -> u32 {
    y ^= y >> 11;
    y ^= (y << 7) & 0x9D2C_5680;
    y ^= (y << 15) & 0xEFC6_0000;
    y ^= y >> 18;
    y
}
