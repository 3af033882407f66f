use rand::Rng;

/// 0/O and 1/I are excluded so codes survive being read aloud.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const ROOM_CODE_LEN: usize = 6;

/// Short human-typable room code. Only a namespace key for the transport.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..ROOM_CODE_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_short_uppercase_alphanumeric() {
        for _ in 0..100 {
            let code = generate();
            assert_eq!(code.len(), ROOM_CODE_LEN);
            assert!(code
                .bytes()
                .all(|b| ALPHABET.contains(&b)));
        }
    }
}
