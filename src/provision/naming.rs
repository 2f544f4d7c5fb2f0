//! Webhook name generation
//!
//! Registry webhook names must be alphanumeric and at most 50 characters.
//! Names are derived from the web app name plus a random hex suffix. The
//! remote API is not asked whether a name is free; uniqueness rests on the
//! suffix's 2^24 combinations.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Longest name the registry API accepts
pub const MAX_WEBHOOK_NAME_LEN: usize = 50;

/// Hex characters appended for uniqueness
pub const NUM_RANDOM_CHARS: usize = 6;

/// Generate a webhook name for `app_name` using the operating system CSPRNG
pub fn generate_webhook_name(app_name: &str) -> String {
    generate_webhook_name_with(app_name, &mut OsRng)
}

/// Generate a webhook name drawing the suffix from `rng`
pub fn generate_webhook_name_with<R: RngCore + CryptoRng + ?Sized>(
    app_name: &str,
    rng: &mut R,
) -> String {
    let mut name: String = app_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_WEBHOOK_NAME_LEN - NUM_RANDOM_CHARS)
        .collect();

    name.push_str(&random_hex(rng, NUM_RANDOM_CHARS));
    name
}

/// `len` lowercase hex characters
fn random_hex<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> String {
    let mut bytes = vec![0u8; len.div_ceil(2)];
    rng.fill_bytes(&mut bytes);

    let mut encoded = hex::encode(bytes);
    encoded.truncate(len);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn is_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn test_scenario_punctuated_name() {
        let name = generate_webhook_name("My-App_01!");
        assert_eq!(name.len(), 13);
        assert!(name.starts_with("MyApp01"));
        assert!(is_hex(&name[7..]));
    }

    #[test]
    fn test_empty_name_is_only_suffix() {
        let name = generate_webhook_name("");
        assert_eq!(name.len(), NUM_RANDOM_CHARS);
        assert!(is_hex(&name));
    }

    #[test]
    fn test_only_punctuation_is_only_suffix() {
        for input in ["---", "!@#$%^&*()", "  \t\n", "é漢字-_.", "_"] {
            let name = generate_webhook_name(input);
            assert_eq!(name.len(), NUM_RANDOM_CHARS, "input {:?}", input);
            assert!(is_hex(&name), "input {:?}", input);
        }
    }

    #[test]
    fn test_long_name_truncated_to_budget() {
        let input = "a".repeat(200);
        let name = generate_webhook_name(&input);
        assert_eq!(name.len(), MAX_WEBHOOK_NAME_LEN);
        assert_eq!(
            &name[..MAX_WEBHOOK_NAME_LEN - NUM_RANDOM_CHARS],
            "a".repeat(44)
        );
    }

    #[test]
    fn test_prefix_is_alphanumeric_subsequence() {
        let inputs = [
            "web-app.prod",
            "x",
            "my app with spaces 123",
            "ÄÖÜ-mixed-ascii-42",
            "a-b-c-d-e-f-g-h-i-j-k-l-m-n-o-p-q-r-s-t-u-v-w-x-y-z-0-1-2-3-4-5-6-7-8-9-extra-long-tail",
        ];

        for input in inputs {
            let name = generate_webhook_name(input);
            let cleaned: String = input.chars().filter(char::is_ascii_alphanumeric).collect();
            let prefix_len = cleaned.len().min(MAX_WEBHOOK_NAME_LEN - NUM_RANDOM_CHARS);

            assert!(name.len() <= MAX_WEBHOOK_NAME_LEN);
            assert_eq!(name.len(), prefix_len + NUM_RANDOM_CHARS);
            assert_eq!(&name[..prefix_len], &cleaned[..prefix_len]);
            assert!(is_hex(&name[prefix_len..]));
            assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_repeated_calls_differ() {
        let first = generate_webhook_name("myapp");
        let second = generate_webhook_name("myapp");
        assert_ne!(first, second);
    }

    #[test]
    fn test_injected_rng_is_deterministic() {
        let a = generate_webhook_name_with("myapp", &mut StdRng::seed_from_u64(7));
        let b = generate_webhook_name_with("myapp", &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.starts_with("myapp"));
        assert_eq!(a.len(), 5 + NUM_RANDOM_CHARS);
    }
}
