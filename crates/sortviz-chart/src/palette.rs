//! Categorical colours keyed by series name.

use std::collections::BTreeMap;

use crate::primitives::Rgb;

/// Tableau-10 categorical scheme.
pub const TABLEAU10: [Rgb; 10] = [
    Rgb(0x4e, 0x79, 0xa7),
    Rgb(0xf2, 0x8e, 0x2c),
    Rgb(0xe1, 0x57, 0x59),
    Rgb(0x76, 0xb7, 0xb2),
    Rgb(0x59, 0xa1, 0x4f),
    Rgb(0xed, 0xc9, 0x49),
    Rgb(0xaf, 0x7a, 0xa1),
    Rgb(0xff, 0x9d, 0xa7),
    Rgb(0x9c, 0x75, 0x5f),
    Rgb(0xba, 0xb0, 0xab),
];

/// Key → colour assignment that does not depend on data order.
///
/// Keys given at construction take palette slots in that order; any other key
/// gets a slot from a hash of its name.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    slots: BTreeMap<String, usize>,
}

impl Palette {
    /// Seed slots from an ordered key list, typically the algorithm catalog.
    pub fn seeded<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots = BTreeMap::new();
        for key in keys {
            let next = slots.len();
            slots.entry(key.as_ref().to_string()).or_insert(next);
        }
        Self { slots }
    }

    #[must_use]
    pub fn color(&self, key: &str) -> Rgb {
        let slot = self
            .slots
            .get(key)
            .copied()
            .unwrap_or_else(|| hash_slot(key));
        TABLEAU10[slot % TABLEAU10.len()]
    }

    /// Whether `key` was part of the seed list.
    #[must_use]
    pub fn is_seeded(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}

/// FNV-1a; stable across runs and platforms.
fn hash_slot(key: &str) -> usize {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in key.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    #[allow(clippy::cast_possible_truncation)]
    let slot = (hash % TABLEAU10.len() as u64) as usize;
    slot
}
