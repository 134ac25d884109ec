use crate::tools::freq_count::ALPHABET_SIZE;

const BIT_MASK: u16 = 0x8000;

/// Number of 16 symbol blocks the alphabet spans.
pub const MAP_BLOCKS: usize = ALPHABET_SIZE / 16;

/// Build the presence map for a sorted list of symbols. The first u16 is the
/// index: bit `15 - b` is set when block `b` (symbols 16b..16b+15) holds any
/// symbol. One u16 follows per set index bit, marking the symbols present in
/// that block.
pub fn encode_sym_map(symbols: &[u8]) -> Vec<u16> {
    let mut blocks = [0_u16; 16];
    for &sym in symbols {
        blocks[(sym >> 4) as usize] |= BIT_MASK >> (sym & 0x0f);
    }

    let mut map = vec![0_u16];
    for (block, &bits) in blocks.iter().enumerate() {
        if bits != 0 {
            map[0] |= BIT_MASK >> block;
            map.push(bits);
        }
    }
    map
}

/// Takes the presence map and returns a sorted vec of all symbols it marks.
/// The map must hold one u16 per set bit of the index.
pub fn decode_sym_map(symbol_map: &[u16]) -> Vec<u8> {
    let mut symbols: Vec<u8> = Vec::with_capacity(ALPHABET_SIZE);
    // Set a counter for the number of maps
    let mut map_idx = 0;

    for block in 0..16 {
        // Check the index to see if the next bit has a block of symbols
        if (symbol_map[0] & (BIT_MASK >> block)) > 0 {
            map_idx += 1;
            // Within that u16, iterate to find which symbols were present
            for sym_idx in 0..16_u8 {
                if (symbol_map[map_idx] & (BIT_MASK >> sym_idx)) > 0 {
                    symbols.push((block << 4) + sym_idx);
                };
            }
        }
    }
    symbols
}

/// True when the index only marks blocks inside the alphabet.
pub fn index_in_alphabet(index: u16) -> bool {
    index & (0xffff >> MAP_BLOCKS) == 0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_symbol_map_test() {
        let maps = vec![11008, 32770, 4, 17754, 6208];
        let mut compare = "Making a silly test.".as_bytes().to_vec();
        compare.sort_unstable();
        compare.dedup();
        assert_eq!(compare, decode_sym_map(&maps));
    }

    #[test]
    fn encode_matches_decode_test() {
        let mut symbols = b"ab\nab\n".to_vec();
        symbols.sort_unstable();
        symbols.dedup();
        let map = encode_sym_map(&symbols);
        // Blocks 0 ('\n') and 6 ('a', 'b')
        assert_eq!(map, vec![0b1000_0010_0000_0000, 0b0000_0000_0010_0000, 0b0110_0000_0000_0000]);
        assert_eq!(decode_sym_map(&map), symbols);
    }

    #[test]
    fn full_alphabet_test() {
        let all = (0..128).collect::<Vec<u8>>();
        let map = encode_sym_map(&all);
        assert_eq!(map.len(), 1 + MAP_BLOCKS);
        assert!(index_in_alphabet(map[0]));
        assert_eq!(decode_sym_map(&map), all);
    }

    #[test]
    fn index_outside_alphabet_test() {
        assert!(!index_in_alphabet(0x0080));
        assert!(index_in_alphabet(0xff00));
    }
}
