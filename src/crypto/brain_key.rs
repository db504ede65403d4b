//! Deterministic key derivation from account credentials.
//!
//! Steem accounts conventionally derive one keypair per role from the
//! master password: `scalar = SHA256(normalize(name ‖ role ‖ password))`,
//! where normalization trims the seed and collapses whitespace runs to a
//! single space. The same credentials therefore always reproduce the same
//! four keypairs, which is how wallets regenerate keys from a password
//! alone.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::KeyError;
use super::private_key::PrivateKey;
use super::public_key::PublicKey;

/// The key slot within an account an operation class is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    Owner,
    Active,
    Posting,
    Memo,
}

/// All roles, strongest first, in the order wallets derive them.
pub const ALL_ROLES: [KeyRole; 4] = [
    KeyRole::Owner,
    KeyRole::Active,
    KeyRole::Posting,
    KeyRole::Memo,
];

impl KeyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyRole::Owner => "owner",
            KeyRole::Active => "active",
            KeyRole::Posting => "posting",
            KeyRole::Memo => "memo",
        }
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyRole {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(KeyRole::Owner),
            "active" => Ok(KeyRole::Active),
            "posting" => Ok(KeyRole::Posting),
            "memo" => Ok(KeyRole::Memo),
            other => Err(KeyError::BadKey(format!("unknown key role `{other}`"))),
        }
    }
}

/// One derived keypair together with the role it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedKey {
    pub role: KeyRole,
    pub private: PrivateKey,
    pub public: PublicKey,
}

/// Collapses whitespace runs to single spaces and trims the ends.
fn normalize_seed(seed: &str) -> String {
    seed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derives the private key for one role of an account.
pub fn derive_key(name: &str, password: &str, role: KeyRole) -> Result<PrivateKey, KeyError> {
    let seed = Zeroizing::new(normalize_seed(&format!("{name}{role}{password}")));
    let scalar: Zeroizing<[u8; 32]> = Zeroizing::new(Sha256::digest(seed.as_bytes()).into());
    PrivateKey::from_bytes(&scalar[..])
}

/// Derives keypairs for the given roles, in the order supplied.
pub fn derive_keys(
    name: &str,
    password: &str,
    roles: &[KeyRole],
) -> Result<Vec<DerivedKey>, KeyError> {
    roles
        .iter()
        .map(|&role| {
            let private = derive_key(name, password, role)?;
            let public = private.public_key();
            Ok(DerivedKey {
                role,
                private,
                public,
            })
        })
        .collect()
}

/// Whether any given role's derived public key appears in that role's
/// accepted key list (as fetched from the account's on-chain authorities).
pub fn verify_credentials(
    name: &str,
    password: &str,
    auths: &[(KeyRole, Vec<PublicKey>)],
) -> bool {
    auths.iter().any(|(role, keys)| {
        derive_key(name, password, *role)
            .map(|private| keys.contains(&private.public_key()))
            .unwrap_or(false)
    })
}

/// Whether `s` parses as a WIF private key.
pub fn is_wif(s: &str) -> bool {
    PrivateKey::from_wif(s).is_ok()
}

/// Whether `s` parses as a default-prefix public-key string.
pub fn is_public_key(s: &str) -> bool {
    s.parse::<PublicKey>().is_ok()
}

/// The public-key string derived from a WIF.
pub fn wif_to_public(wif: &str) -> Result<String, KeyError> {
    Ok(PrivateKey::from_wif(wif)?.public_key().to_string())
}

/// Whether the WIF's derived public key equals `expected`.
pub fn wif_matches_public(wif: &str, expected: &str) -> bool {
    wif_to_public(wif).as_deref() == Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_key("testuser", "testpassword", KeyRole::Posting).unwrap();
        let b = derive_key("testuser", "testpassword", KeyRole::Posting).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn whitespace_collapses_before_hashing() {
        let spaced = derive_key("testuser", "test  password", KeyRole::Posting).unwrap();
        let single = derive_key("testuser", "test password", KeyRole::Posting).unwrap();
        let padded = derive_key("testuser", "  test password\t", KeyRole::Posting).unwrap();
        assert_eq!(spaced, single);
        assert_eq!(padded, single);
    }

    #[test]
    fn roles_produce_distinct_keys() {
        let keys = derive_keys("testuser", "testpassword", &ALL_ROLES).unwrap();
        assert_eq!(keys.len(), 4);
        for window in keys.windows(2) {
            assert_ne!(window[0].private, window[1].private);
        }
    }

    #[test]
    fn scalar_matches_plain_sha256_of_seed() {
        use sha2::{Digest, Sha256};
        let expected = Sha256::digest(b"testuserpostingtestpassword");
        let key = derive_key("testuser", "testpassword", KeyRole::Posting).unwrap();
        assert_eq!(key.to_bytes()[..], expected[..]);
    }

    #[test]
    fn credentials_verify_against_derived_public() {
        let public = derive_key("alice", "hunter2", KeyRole::Active)
            .unwrap()
            .public_key();
        let auths = vec![(KeyRole::Active, vec![public])];
        assert!(verify_credentials("alice", "hunter2", &auths));
        assert!(!verify_credentials("alice", "wrong", &auths));
    }

    #[test]
    fn wif_helpers_agree() {
        let key = derive_key("alice", "hunter2", KeyRole::Memo).unwrap();
        let wif = key.to_wif();
        assert!(is_wif(&wif));
        assert!(!is_wif("not-a-wif"));
        let public = key.public_key().to_string();
        assert!(is_public_key(&public));
        assert!(wif_matches_public(&wif, &public));
        assert!(!wif_matches_public(&wif, "STM7jNh5ejQoqHqWcGWFJ1v4F5CzsG3EiBuz1VooCng1cH5QpJD27"));
    }

    #[test]
    fn role_strings_round_trip() {
        for role in ALL_ROLES {
            assert_eq!(role.as_str().parse::<KeyRole>().unwrap(), role);
        }
    }
}
