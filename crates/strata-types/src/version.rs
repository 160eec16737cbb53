use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric protocol revision identifier, as advertised during the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(pub u32);

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProtocolVersion {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// A release name such as "1.21.30": three dot-separated numeric components,
/// with missing components treated as zero.
///
/// Ordering compares components numerically, so "1.21.9" sorts before
/// "1.21.10".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionName {
    parts: [u32; 3],
}

impl VersionName {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            parts: [major, minor, patch],
        }
    }

    pub fn major(&self) -> u32 {
        self.parts[0]
    }

    pub fn minor(&self) -> u32 {
        self.parts[1]
    }

    pub fn patch(&self) -> u32 {
        self.parts[2]
    }
}

impl std::fmt::Display for VersionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.parts[0], self.parts[1], self.parts[2])
    }
}

impl std::str::FromStr for VersionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [0u32; 3];
        let mut count = 0;
        for piece in s.split('.') {
            if count == 3 {
                return Err(format!("version name '{s}' has more than three components"));
            }
            parts[count] = piece
                .parse()
                .map_err(|_| format!("version name '{s}' has a non-numeric component '{piece}'"))?;
            count += 1;
        }
        Ok(Self { parts })
    }
}

impl Serialize for VersionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_component_ordering() {
        let v9: VersionName = "1.21.9".parse().unwrap();
        let v10: VersionName = "1.21.10".parse().unwrap();
        let v20: VersionName = "1.21.20".parse().unwrap();
        assert!(v9 < v10);
        assert!(v10 < v20);
        assert!(v20 > v9);
    }

    #[test]
    fn test_missing_components_are_zero() {
        let short: VersionName = "1.21".parse().unwrap();
        assert_eq!(short, VersionName::new(1, 21, 0));
        assert!(short < VersionName::new(1, 21, 1));

        let major_only: VersionName = "2".parse().unwrap();
        assert_eq!(major_only, VersionName::new(2, 0, 0));
    }

    #[test]
    fn test_rejects_non_numeric_and_oversized() {
        assert!("1.21.x".parse::<VersionName>().is_err());
        assert!("".parse::<VersionName>().is_err());
        assert!("1.21.30.4".parse::<VersionName>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let v = VersionName::new(1, 21, 30);
        assert_eq!(v.to_string(), "1.21.30");
        assert_eq!(v.to_string().parse::<VersionName>().unwrap(), v);
    }

    #[test]
    fn test_equal_names_compare_equal() {
        let a: VersionName = "1.21.30".parse().unwrap();
        let b = VersionName::new(1, 21, 30);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
    }
}
