use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;

use super::errors::PasswordError;

const DELIMITER: char = '$';
const FIELD_COUNT: usize = 6;

/// Argon2 cost parameters as carried inside an encoded hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostParams {
    /// Memory cost in KiB (`m=`)
    pub memory_kib: u32,
    /// Number of passes (`t=`)
    pub iterations: u32,
    /// Degree of parallelism (`p=`)
    pub parallelism: u32,
}

impl fmt::Display for CostParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m={},t={},p={}",
            self.memory_kib, self.iterations, self.parallelism
        )
    }
}

impl FromStr for CostParams {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(',');
        let (Some(m), Some(t), Some(p), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(PasswordError::InvalidFormat(format!(
                "expected m=<int>,t=<int>,p=<int>, got '{}'",
                s
            )));
        };

        Ok(Self {
            memory_kib: parse_tagged(m, "m=")?,
            iterations: parse_tagged(t, "t=")?,
            parallelism: parse_tagged(p, "p=")?,
        })
    }
}

/// Self-describing password hash record.
///
/// Wire form: `$<alg>$v=<int>$m=<int>,t=<int>,p=<int>$<salt>$<digest>` with salt
/// and digest in standard base64 without padding. Decoding only checks structure;
/// whether the algorithm and version are supported is up to the verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    pub algorithm: String,
    pub version: u32,
    pub params: CostParams,
    pub salt: Vec<u8>,
    pub digest: Vec<u8>,
}

impl EncodedHash {
    /// Serialize into the delimited string form.
    pub fn encode(&self) -> String {
        format!(
            "${}$v={}${}${}${}",
            self.algorithm,
            self.version,
            self.params,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.digest),
        )
    }

    /// Parse the delimited string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - Wrong field count, or version/parameter fields malformed
    /// * `DecodingFailed` - Salt or digest is not valid unpadded base64
    pub fn decode(encoded: &str) -> Result<Self, PasswordError> {
        let fields: Vec<&str> = encoded.split(DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return Err(PasswordError::InvalidFormat(format!(
                "expected {} '{}'-delimited fields, got {}",
                FIELD_COUNT,
                DELIMITER,
                fields.len()
            )));
        }

        if !fields[0].is_empty() || fields[1].is_empty() {
            return Err(PasswordError::InvalidFormat(
                "missing algorithm identifier".to_string(),
            ));
        }

        let version = parse_tagged(fields[2], "v=")?;
        let params = fields[3].parse::<CostParams>()?;

        let salt = STANDARD_NO_PAD
            .decode(fields[4])
            .map_err(|e| PasswordError::DecodingFailed(format!("salt: {}", e)))?;
        let digest = STANDARD_NO_PAD
            .decode(fields[5])
            .map_err(|e| PasswordError::DecodingFailed(format!("digest: {}", e)))?;

        Ok(Self {
            algorithm: fields[1].to_string(),
            version,
            params,
            salt,
            digest,
        })
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for EncodedHash {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

fn parse_tagged(field: &str, tag: &str) -> Result<u32, PasswordError> {
    field
        .strip_prefix(tag)
        .and_then(|value| value.parse::<u32>().ok())
        .ok_or_else(|| {
            PasswordError::InvalidFormat(format!("expected {}<int>, got '{}'", tag, field))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EncodedHash {
        EncodedHash {
            algorithm: "argon2id".to_string(),
            version: 19,
            params: CostParams {
                memory_kib: 65536,
                iterations: 3,
                parallelism: 2,
            },
            salt: b"0123456789abcdef".to_vec(),
            digest: vec![7u8; 32],
        }
    }

    #[test]
    fn test_encode_layout() {
        let encoded = sample().encode();

        assert!(encoded.starts_with("$argon2id$v=19$m=65536,t=3,p=2$"));
        assert_eq!(encoded.split('$').count(), 6);
        assert!(!encoded.ends_with('='));
    }

    #[test]
    fn test_decode_encoded() {
        let original = sample();
        let decoded = EncodedHash::decode(&original.encode()).expect("Failed to decode");
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_known_string() {
        let decoded: EncodedHash = "$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$AAECAw"
            .parse()
            .expect("Failed to decode");

        assert_eq!(decoded.algorithm, "argon2id");
        assert_eq!(decoded.version, 19);
        assert_eq!(
            decoded.params,
            CostParams {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1
            }
        );
        assert_eq!(decoded.salt, b"saltsalt");
        assert_eq!(decoded.digest, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_decode_missing_params_segment() {
        let result = EncodedHash::decode("$argon2id$v=19$c2FsdHNhbHQ$AAECAw");
        assert!(matches!(result, Err(PasswordError::InvalidFormat(_))));
    }

    #[test]
    fn test_decode_garbage() {
        for input in ["", "plaintext", "$$$$$", "$argon2id$v=19$m=1,t=1,p=1$a$b$c"] {
            assert!(
                matches!(
                    EncodedHash::decode(input),
                    Err(PasswordError::InvalidFormat(_))
                ),
                "input {:?} should be rejected as malformed",
                input
            );
        }
    }

    #[test]
    fn test_decode_bad_version_field() {
        let result = EncodedHash::decode("$argon2id$version=19$m=1,t=1,p=1$c2FsdA$AAECAw");
        assert!(matches!(result, Err(PasswordError::InvalidFormat(_))));
    }

    #[test]
    fn test_decode_bad_params_field() {
        for params in ["m=1,t=1", "t=1,m=1,p=1", "m=x,t=1,p=1", "m=1,t=1,p=1,q=2"] {
            let encoded = format!("$argon2id$v=19${}$c2FsdA$AAECAw", params);
            assert!(
                matches!(
                    EncodedHash::decode(&encoded),
                    Err(PasswordError::InvalidFormat(_))
                ),
                "params {:?} should be rejected",
                params
            );
        }
    }

    #[test]
    fn test_decode_bad_base64() {
        let result = EncodedHash::decode("$argon2id$v=19$m=1,t=1,p=1$not*base64$AAECAw");
        assert!(matches!(result, Err(PasswordError::DecodingFailed(_))));

        // Padded digests are not part of the format
        let result = EncodedHash::decode("$argon2id$v=19$m=1,t=1,p=1$c2FsdA$AAECAw==");
        assert!(matches!(result, Err(PasswordError::DecodingFailed(_))));
    }
}
