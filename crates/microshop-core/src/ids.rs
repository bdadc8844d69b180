//! Identifier generation for locally created records.
//!
//! Listing ids and slugs are `<unix millis><9 random base36 chars>`. They
//! are unique enough for one device and nothing more; they are neither
//! collision-proof nor suitable as secrets.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix on local ids.
pub const LOCAL_ID_SUFFIX_LEN: usize = 9;

/// Token handed out by the mock login flow.
pub const MOCK_LOGIN_TOKEN: &str = "mock-token-123";

/// `<millis><suffix>` using the thread-local RNG.
pub fn generate_local_id(now: DateTime<Utc>) -> String {
    generate_local_id_with(&mut rand::thread_rng(), now)
}

/// Same as [`generate_local_id`] with a caller-supplied RNG.
pub fn generate_local_id_with<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> String {
    let mut id = now.timestamp_millis().to_string();
    id.extend((0..LOCAL_ID_SUFFIX_LEN).map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char));
    id
}

/// Order reference shown after a simulated checkout: `ORD<millis>`.
pub fn generate_order_id(now: DateTime<Utc>) -> String {
    format!("ORD{}", now.timestamp_millis())
}

/// Token handed out by the mock register flow.
pub fn mock_register_token(now: DateTime<Utc>) -> String {
    format!("mock-token-{}", now.timestamp_millis())
}

/// Account id for a locally simulated payment account: `acct_` + 16 hex.
pub fn simulated_account_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("acct_{}", &hex[..16])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    #[test]
    fn test_local_id_shape() {
        let id = generate_local_id(fixed_now());
        assert!(id.starts_with("1700000000123"));
        let suffix = &id["1700000000123".len()..];
        assert_eq!(suffix.len(), LOCAL_ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_seeded_ids_repeat() {
        let a = generate_local_id_with(&mut StdRng::seed_from_u64(7), fixed_now());
        let b = generate_local_id_with(&mut StdRng::seed_from_u64(7), fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_id_and_tokens() {
        assert_eq!(generate_order_id(fixed_now()), "ORD1700000000123");
        assert_eq!(mock_register_token(fixed_now()), "mock-token-1700000000123");
    }

    #[test]
    fn test_simulated_account_id() {
        let id = simulated_account_id();
        assert!(id.starts_with("acct_"));
        assert_eq!(id.len(), 5 + 16);
        assert_ne!(id, simulated_account_id());
    }
}
