use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// Opaque caller identity: an account or a contract, 20 bytes.
///
/// Rendered as Bech32m with the "agora" prefix; parsing also accepts the
/// 0x-hex form. When built from a key, the identity is
/// `blake3(ed25519_pubkey)[0..20]`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Principal([u8; 20]);

impl Principal {
    pub const ZERO: Self = Self([0u8; 20]);
    pub const LEN: usize = 20;

    /// Bech32m human-readable prefix
    pub const BECH32_HRP: &'static str = "agora";

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse from a raw byte slice; must be exactly 20 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, TypesError> {
        if slice.len() != 20 {
            return Err(TypesError::InvalidPrincipalLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Derive a principal from 32 ed25519 public key bytes.
    pub fn from_public_key(pubkey: &[u8; 32]) -> Self {
        let hash = blake3::hash(pubkey);
        let mut id = [0u8; 20];
        id.copy_from_slice(&hash.as_bytes()[..20]);
        Self(id)
    }

    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    /// Hex string without the 0x prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hrp = bech32::Hrp::parse_unchecked(Self::BECH32_HRP);
        match bech32::encode::<bech32::Bech32m>(hrp, &self.0) {
            Ok(encoded) => write!(f, "{}", encoded),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal(0x{})", hex::encode(self.0))
    }
}

impl fmt::LowerHex for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Principal {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("agora1") {
            let (hrp, data) = bech32::decode(s).map_err(|e| {
                TypesError::Bech32Error(e.to_string())
            })?;

            let expected_hrp = bech32::Hrp::parse_unchecked(Self::BECH32_HRP);
            if hrp != expected_hrp {
                return Err(TypesError::InvalidPrincipalFormat(format!(
                    "Invalid HRP: expected '{}', got '{}'",
                    Self::BECH32_HRP,
                    hrp
                )));
            }

            let data_len = data.len();
            let bytes: [u8; 20] = data.try_into().map_err(|_| {
                TypesError::InvalidPrincipalLength(data_len)
            })?;

            Ok(Self::from_bytes(bytes))
        } else if s.starts_with("0x") || s.starts_with("0X") {
            let bytes = hex::decode(&s[2..])?;
            Self::from_slice(&bytes)
        } else {
            Err(TypesError::InvalidPrincipalFormat(s.to_string()))
        }
    }
}

impl AsRef<[u8]> for Principal {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(fill: u8) -> [u8; 32] {
        [fill; 32]
    }

    #[test]
    fn zero_principal() {
        assert!(Principal::ZERO.is_zero());
        assert_eq!(Principal::ZERO.as_bytes(), &[0u8; 20]);
        assert!(!Principal::from_bytes([0x5a; 20]).is_zero());
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = Principal::from_public_key(&pk(0x11));
        let b = Principal::from_public_key(&pk(0x11));
        let c = Principal::from_public_key(&pk(0x12));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_zero());
    }

    #[test]
    fn display_parses_back() {
        let p = Principal::from_public_key(&pk(0x42));

        let encoded = p.to_string();
        assert!(encoded.starts_with("agora1"));
        assert_eq!(encoded.parse::<Principal>().unwrap(), p);
    }

    #[test]
    fn hex_forms_parse_back() {
        let p = Principal::from_bytes([0x3c; 20]);

        assert_eq!(format!("{:x}", p).parse::<Principal>().unwrap(), p);

        // 0X prefix is accepted too
        let upper_prefix = format!("0X{}", p.to_hex());
        assert_eq!(upper_prefix.parse::<Principal>().unwrap(), p);
    }

    #[test]
    fn rejects_malformed_input() {
        let bad = [
            "",
            "agora",
            "agora1",
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq",
            "0x00",
            "0x3c3c3c3c3c3c3c3c3c3c3c3c3c3c3c3c3c3c3c3c3c", // 21 bytes
        ];
        for s in bad {
            assert!(s.parse::<Principal>().is_err(), "accepted {:?}", s);
        }
    }

    #[test]
    fn from_slice_length_check() {
        assert!(Principal::from_slice(&[7u8; 19]).is_err());
        assert!(Principal::from_slice(&[7u8; 21]).is_err());

        let p = Principal::from_slice(&[7u8; 20]).unwrap();
        assert_eq!(p.as_bytes(), &[7u8; 20]);
    }

    #[test]
    fn ordering_follows_bytes() {
        let low = Principal::from_bytes([0x01; 20]);
        let mut bytes = [0x01; 20];
        bytes[19] = 0x02;
        let high = Principal::from_bytes(bytes);

        assert!(low < high);
    }
}
