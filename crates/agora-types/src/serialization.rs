//! Serialization implementations for agora-types
//!
//! Principals serialize as their Bech32m string form.

use crate::*;

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for Principal {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.to_string().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Principal {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Principal::from_str(&s).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use crate::Principal;

    #[test]
    fn test_principal_serde_roundtrip() {
        let p = Principal::from_bytes([7u8; 20]);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("agora1"));

        let back: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
