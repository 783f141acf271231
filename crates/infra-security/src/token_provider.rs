// Session token generation

use domainhub_core::port::TokenProvider;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

pub const TOKEN_LEN: usize = 48;

/// 48 alphanumeric characters (~285 bits) from the OS RNG
#[derive(Debug, Clone, Default)]
pub struct RandomTokenProvider;

impl RandomTokenProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TokenProvider for RandomTokenProvider {
    fn new_token(&self) -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_shape() {
        let token = RandomTokenProvider::new().new_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let provider = RandomTokenProvider::new();
        let tokens: HashSet<String> = (0..100).map(|_| provider.new_token()).collect();
        assert_eq!(tokens.len(), 100);
    }
}
