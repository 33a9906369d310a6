//! Serde support for fixed-size byte newtypes.
//!
//! Human-readable formats (JSON network properties) carry hex strings;
//! binary formats carry raw byte strings.

macro_rules! impl_hex_serde {
    ($ty:ident, $len:expr, $what:literal) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&hex::encode(self.0))
                } else {
                    serializer.serialize_bytes(&self.0)
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct FixedVisitor;

                impl<'de> serde::de::Visitor<'de> for FixedVisitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        write!(f, "{} as {} bytes (hex or raw)", $what, $len)
                    }

                    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<$ty, E> {
                        let bytes = hex::decode(v).map_err(E::custom)?;
                        self.visit_bytes(&bytes)
                    }

                    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<$ty, E> {
                        let arr: [u8; $len] = v
                            .try_into()
                            .map_err(|_| E::invalid_length(v.len(), &self))?;
                        Ok($ty(arr))
                    }
                }

                if deserializer.is_human_readable() {
                    deserializer.deserialize_str(FixedVisitor)
                } else {
                    deserializer.deserialize_bytes(FixedVisitor)
                }
            }
        }
    };
}
