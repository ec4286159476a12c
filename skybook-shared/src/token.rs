use uuid::Uuid;

/// Uppercase alphanumeric token cut from a fresh v4 UUID.
///
/// Used for booking references (`BK` + 6) and payment transaction ids (`CC-` + 8).
/// `len` is capped at 32, the length of a simple-formatted UUID.
pub fn random_token(len: usize) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    raw[..len.min(raw.len())].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = random_token(8);
        assert_eq!(token.len(), 8);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_token_is_capped() {
        assert_eq!(random_token(64).len(), 32);
    }
}
