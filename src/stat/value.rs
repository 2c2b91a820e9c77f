use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// The result of evaluating a stat. `None` means the stat function could
/// not produce a value.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default, strum::IntoStaticStr,
)]
pub enum StatValue {
    #[default]
    None,
    Int(i32),
    Float(f32),
}

impl StatValue {
    pub fn is_valid(&self) -> bool {
        !matches!(self, StatValue::None)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, StatValue::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, StatValue::Float(_))
    }

    pub fn as_int(&self) -> Option<i32> {
        if let StatValue::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        if let StatValue::Float(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl From<i32> for StatValue {
    fn from(value: i32) -> Self {
        StatValue::Int(value)
    }
}

impl From<f32> for StatValue {
    fn from(value: f32) -> Self {
        StatValue::Float(value)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::None => write!(f, "none"),
            StatValue::Int(v) => write!(f, "{v}"),
            StatValue::Float(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_invalid() {
        let value = StatValue::default();
        assert!(!value.is_valid());
        assert_eq!(value.as_int(), None);
        assert_eq!(value.as_float(), None);
        assert_eq!(value.kind(), "None");
    }

    #[test]
    fn typed_access_only_matches_own_kind() {
        let int = StatValue::from(12);
        assert!(int.is_valid() && int.is_int() && !int.is_float());
        assert_eq!(int.as_int(), Some(12));
        assert_eq!(int.as_float(), None);

        let float = StatValue::from(0.5f32);
        assert!(float.is_float());
        assert_eq!(float.as_float(), Some(0.5));
        assert_eq!(float.as_int(), None);
        assert_eq!(float.kind(), "Float");
    }

    #[test]
    fn bincode_keeps_the_kind() {
        for value in [StatValue::None, StatValue::Int(-3), StatValue::Float(2.25)] {
            let bytes = bincode::serialize(&value).unwrap();
            assert_eq!(bincode::deserialize::<StatValue>(&bytes).unwrap(), value);
        }
    }
}
