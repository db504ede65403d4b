//! Encrypted memos between two accounts.
//!
//! A memo starting with `#` is private: it is encrypted so that only the
//! two parties of a transfer can read it. The shared key is derived by
//! elliptic-curve Diffie-Hellman (`SHA512(x)` of the shared point's x
//! coordinate, truncated to 32 bytes) and the plaintext is AES-256-CBC
//! encrypted under a random 16-byte IV (the frame's "nonce"). The frame
//! carries both parties' public keys, the nonce, a four-byte SHA-256
//! checksum of the ciphertext, and the ciphertext itself; the whole frame
//! is base58-encoded behind a leading `#`.
//!
//! Memos without the `#` prefix pass through both directions unchanged.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockModeDecrypt, BlockModeEncrypt, KeyIvInit};
use k256::elliptic_curve::ecdh::diffie_hellman;
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use super::KeyError;
use super::private_key::PrivateKey;
use super::public_key::PublicKey;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// IV length carried in the frame.
const NONCE_LEN: usize = 16;
/// Ciphertext checksum length carried in the frame.
const CHECK_LEN: usize = 4;

/// Errors from memo encryption or decryption.
#[derive(Debug, thiserror::Error)]
pub enum MemoError {
    /// Frame undecodable: bad base58, truncated fields, or wrong
    /// nonce/checksum lengths.
    #[error("undecodable memo frame: {0}")]
    BadEncoding(String),
    /// Checksum mismatch, bad PKCS#7 padding, or non-UTF-8 plaintext.
    #[error("memo rejected: {0}")]
    Rejected(String),
    /// A party's key could not be parsed or used.
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// The decoded frame of an encrypted memo.
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptedMemo {
    pub from: PublicKey,
    pub to: PublicKey,
    pub nonce: [u8; NONCE_LEN],
    pub check: [u8; CHECK_LEN],
    pub ciphertext: Vec<u8>,
}

impl EncryptedMemo {
    fn to_bytes(&self) -> Vec<u8> {
        let from = self.from.to_string();
        let to = self.to.to_string();
        let mut out = Vec::with_capacity(
            2 + from.len() + to.len() + 2 + NONCE_LEN + CHECK_LEN + self.ciphertext.len(),
        );
        out.push(from.len() as u8);
        out.extend_from_slice(from.as_bytes());
        out.push(to.len() as u8);
        out.extend_from_slice(to.as_bytes());
        out.push(NONCE_LEN as u8);
        out.extend_from_slice(&self.nonce);
        out.push(CHECK_LEN as u8);
        out.extend_from_slice(&self.check);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    fn from_bytes(data: &[u8]) -> Result<Self, MemoError> {
        fn take<'a>(data: &mut &'a [u8]) -> Result<&'a [u8], MemoError> {
            let (&len, rest) = data
                .split_first()
                .ok_or_else(|| MemoError::BadEncoding("truncated frame".to_owned()))?;
            if rest.len() < len as usize {
                return Err(MemoError::BadEncoding("truncated frame".to_owned()));
            }
            let (field, rest) = rest.split_at(len as usize);
            *data = rest;
            Ok(field)
        }

        let mut cursor = data;
        let from = std::str::from_utf8(take(&mut cursor)?)
            .map_err(|_| MemoError::BadEncoding("non-UTF-8 key string".to_owned()))?
            .parse::<PublicKey>()?;
        let to = std::str::from_utf8(take(&mut cursor)?)
            .map_err(|_| MemoError::BadEncoding("non-UTF-8 key string".to_owned()))?
            .parse::<PublicKey>()?;
        let nonce: [u8; NONCE_LEN] = take(&mut cursor)?
            .try_into()
            .map_err(|_| MemoError::BadEncoding("nonce must be 16 bytes".to_owned()))?;
        let check: [u8; CHECK_LEN] = take(&mut cursor)?
            .try_into()
            .map_err(|_| MemoError::BadEncoding("checksum must be 4 bytes".to_owned()))?;
        Ok(Self {
            from,
            to,
            nonce,
            check,
            ciphertext: cursor.to_vec(),
        })
    }
}

/// ECDH shared key: `SHA512(x_coordinate)[..32]`.
fn shared_key(private: &PrivateKey, public: &PublicKey) -> Zeroizing<[u8; 32]> {
    let shared = diffie_hellman(private.key.as_nonzero_scalar(), public.key.as_affine());
    let digest = Sha512::digest(shared.raw_secret_bytes().as_slice());
    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&digest[..32]);
    key
}

/// Encrypts a `#`-prefixed memo for `to`; other memos pass through.
///
/// The IV is drawn from the process RNG; use
/// [`encrypt_with_nonce`] to pin it in tests.
pub fn encrypt(private: &PrivateKey, to: &PublicKey, memo: &str) -> Result<String, MemoError> {
    encrypt_with_nonce(private, to, memo, rand::random())
}

/// [`encrypt`] with a caller-chosen IV.
pub fn encrypt_with_nonce(
    private: &PrivateKey,
    to: &PublicKey,
    memo: &str,
    nonce: [u8; NONCE_LEN],
) -> Result<String, MemoError> {
    let Some(plaintext) = memo.strip_prefix('#') else {
        return Ok(memo.to_owned());
    };

    let key = shared_key(private, to);
    let cipher = Aes256CbcEnc::new_from_slices(&key[..], &nonce)
        .map_err(|err| MemoError::Rejected(err.to_string()))?;
    let mut buf = vec![0u8; plaintext.len() + NONCE_LEN];
    buf[..plaintext.len()].copy_from_slice(plaintext.as_bytes());
    let ciphertext = cipher
        .encrypt_padded::<Pkcs7>(&mut buf, plaintext.len())
        .map_err(|err| MemoError::Rejected(err.to_string()))?
        .to_vec();

    let digest = Sha256::digest(&ciphertext);
    let mut check = [0u8; CHECK_LEN];
    check.copy_from_slice(&digest[..CHECK_LEN]);

    let frame = EncryptedMemo {
        from: private.public_key(),
        to: to.clone(),
        nonce,
        check,
        ciphertext,
    };
    Ok(format!("#{}", bs58::encode(frame.to_bytes()).into_string()))
}

/// Decrypts a `#`-prefixed memo addressed to (or sent by) the key holder;
/// other memos pass through.
pub fn decrypt(private: &PrivateKey, memo: &str) -> Result<String, MemoError> {
    let Some(encoded) = memo.strip_prefix('#') else {
        return Ok(memo.to_owned());
    };

    let data = bs58::decode(encoded)
        .into_vec()
        .map_err(|err| MemoError::BadEncoding(err.to_string()))?;
    let frame = EncryptedMemo::from_bytes(&data)?;

    // The counterpart key is whichever of the two we do not hold.
    let own = private.public_key();
    let other = if frame.from == own {
        &frame.to
    } else {
        &frame.from
    };

    let digest = Sha256::digest(&frame.ciphertext);
    if digest[..CHECK_LEN] != frame.check {
        return Err(MemoError::Rejected("ciphertext checksum mismatch".to_owned()));
    }

    let key = shared_key(private, other);
    let cipher = Aes256CbcDec::new_from_slices(&key[..], &frame.nonce)
        .map_err(|err| MemoError::Rejected(err.to_string()))?;
    let mut buf = frame.ciphertext;
    let plaintext = cipher
        .decrypt_padded::<Pkcs7>(&mut buf)
        .map_err(|_| MemoError::Rejected("invalid padding".to_owned()))?;
    let text = std::str::from_utf8(plaintext)
        .map_err(|_| MemoError::Rejected("plaintext is not UTF-8".to_owned()))?;
    Ok(format!("#{text}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::brain_key::{KeyRole, derive_key};

    fn alice() -> PrivateKey {
        derive_key("alice", "alice-password", KeyRole::Memo).unwrap()
    }

    fn bob() -> PrivateKey {
        derive_key("bob", "bob-password", KeyRole::Memo).unwrap()
    }

    #[test]
    fn plain_memos_pass_through() {
        let sender = alice();
        let recipient = bob().public_key();
        let memo = "plain text memo";
        assert_eq!(encrypt(&sender, &recipient, memo).unwrap(), memo);
        assert_eq!(decrypt(&sender, memo).unwrap(), memo);
    }

    #[test]
    fn recipient_can_decrypt() {
        let encoded = encrypt(&alice(), &bob().public_key(), "#the rent is due").unwrap();
        assert!(encoded.starts_with('#'));
        assert_ne!(encoded, "#the rent is due");
        assert_eq!(decrypt(&bob(), &encoded).unwrap(), "#the rent is due");
    }

    #[test]
    fn sender_can_decrypt_own_memo() {
        let encoded = encrypt(&alice(), &bob().public_key(), "#note to both").unwrap();
        assert_eq!(decrypt(&alice(), &encoded).unwrap(), "#note to both");
    }

    #[test]
    fn ecdh_is_symmetric() {
        let a = shared_key(&alice(), &bob().public_key());
        let b = shared_key(&bob(), &alice().public_key());
        assert_eq!(&a[..], &b[..]);
    }

    #[test]
    fn fixed_nonce_is_deterministic() {
        let nonce = [7u8; 16];
        let one = encrypt_with_nonce(&alice(), &bob().public_key(), "#hi", nonce).unwrap();
        let two = encrypt_with_nonce(&alice(), &bob().public_key(), "#hi", nonce).unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let encoded = encrypt(&alice(), &bob().public_key(), "#secret").unwrap();
        let mut data = bs58::decode(&encoded[1..]).into_vec().unwrap();
        let last = data.len() - 1;
        data[last] ^= 0xff;
        let tampered = format!("#{}", bs58::encode(data).into_string());
        assert!(matches!(
            decrypt(&bob(), &tampered),
            Err(MemoError::Rejected(_))
        ));
    }

    #[test]
    fn frame_round_trips() {
        let frame = EncryptedMemo {
            from: alice().public_key(),
            to: bob().public_key(),
            nonce: [9u8; 16],
            check: [1, 2, 3, 4],
            ciphertext: vec![0xAA; 32],
        };
        let decoded = EncryptedMemo::from_bytes(&frame.to_bytes()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn truncated_frame_is_rejected() {
        assert!(matches!(
            EncryptedMemo::from_bytes(&[40, 1, 2]),
            Err(MemoError::BadEncoding(_))
        ));
    }
}
