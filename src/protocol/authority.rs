//! Account authorities: weighted sets of accounts and keys.
//!
//! An authority is satisfied when the weights of the signing keys and
//! approving accounts reach `weight_threshold`. The chain serializes both
//! collections as `flat_set`s, i.e. sorted by key, so the binary form
//! sorts at encode time; the JSON form is a list of `[key, weight]` pairs
//! in the caller's order.

use std::io;

use serde::{Deserialize, Serialize};

use crate::crypto::PublicKey;
use crate::encoder::{BinaryEncoder, BinarySerialize};

/// A weighted authority over an account.
///
/// # Example
///
/// ```
/// use steem_rs::protocol::Authority;
///
/// let authority: Authority = serde_json::from_str(
///     r#"{"weight_threshold":1,"account_auths":[["bob",1]],"key_auths":[]}"#,
/// )
/// .unwrap();
/// assert_eq!(authority.weight_threshold, 1);
/// assert_eq!(authority.account_auths[0].0, "bob");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authority {
    pub weight_threshold: u32,
    /// `[account_name, weight]` pairs.
    pub account_auths: Vec<(String, u16)>,
    /// `[public_key, weight]` pairs.
    pub key_auths: Vec<(PublicKey, u16)>,
}

impl Authority {
    /// An authority satisfied by a single key.
    pub fn single_key(key: PublicKey) -> Self {
        Self {
            weight_threshold: 1,
            account_auths: Vec::new(),
            key_auths: vec![(key, 1)],
        }
    }
}

impl BinarySerialize for Authority {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("weight_threshold").u32(self.weight_threshold);

        // flat_set semantics: emit sorted, leave the caller's order alone.
        let mut accounts: Vec<&(String, u16)> = self.account_auths.iter().collect();
        accounts.sort_by(|a, b| a.0.cmp(&b.0));
        enc.field("account_auths").map(&accounts, |enc, (name, weight)| {
            enc.string(name);
            enc.u16(*weight);
        });

        let mut keys: Vec<&(PublicKey, u16)> = self.key_auths.iter().collect();
        keys.sort_by_key(|(key, _)| key.to_bytes());
        enc.field("key_auths").map(&keys, |enc, (key, weight)| {
            enc.bytes(&key.to_bytes());
            enc.u16(*weight);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(authority: &Authority) -> Vec<u8> {
        let mut enc = BinaryEncoder::new(Vec::new());
        authority.binary_serialize(&mut enc);
        enc.finish().unwrap()
    }

    #[test]
    fn json_pairs_round_trip() {
        let json = r#"{"weight_threshold":2,"account_auths":[["alice",1],["bob",1]],"key_auths":[["STM7jNh5ejQoqHqWcGWFJ1v4F5CzsG3EiBuz1VooCng1cH5QpJD27",1]]}"#;
        let authority: Authority = serde_json::from_str(json).unwrap();
        let back = serde_json::to_string(&authority).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn accounts_sort_on_the_wire_without_mutation() {
        let authority = Authority {
            weight_threshold: 1,
            account_auths: vec![("zed".to_owned(), 3), ("abe".to_owned(), 1)],
            key_auths: Vec::new(),
        };
        let bytes = wire(&authority);
        // threshold (4) ‖ count ‖ "abe" entry first
        assert_eq!(&bytes[..4], &1u32.to_le_bytes());
        assert_eq!(bytes[4], 2);
        assert_eq!(&bytes[5..9], b"\x03abe");
        // Caller's vector is untouched.
        assert_eq!(authority.account_auths[0].0, "zed");
    }

    #[test]
    fn key_auths_sort_by_point_bytes() {
        let a: PublicKey = "STM7jNh5ejQoqHqWcGWFJ1v4F5CzsG3EiBuz1VooCng1cH5QpJD27"
            .parse()
            .unwrap();
        let b: PublicKey = "STM7W7ACQDZJZ6rZGKeT9auipnSiSxFxJ4k71QXmrhY9HbvYsNnQ2"
            .parse()
            .unwrap();
        let mut expected = [a.to_bytes(), b.to_bytes()];
        expected.sort();

        let authority = Authority {
            weight_threshold: 1,
            account_auths: Vec::new(),
            key_auths: vec![(a, 1), (b, 1)],
        };
        let bytes = wire(&authority);
        // threshold(4) ‖ accounts count(1) ‖ keys count(1) ‖ first key(33)
        assert_eq!(&bytes[6..39], &expected[0]);
    }

    #[test]
    fn single_key_constructor() {
        let key: PublicKey = "STM7jNh5ejQoqHqWcGWFJ1v4F5CzsG3EiBuz1VooCng1cH5QpJD27"
            .parse()
            .unwrap();
        let authority = Authority::single_key(key.clone());
        assert_eq!(authority.weight_threshold, 1);
        assert_eq!(authority.key_auths, vec![(key, 1)]);
    }
}
