use std::fmt;

use super::error::Error;

// Actorの引数の値
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl Variant {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    // 同じ型の値として文字列をパース
    pub fn parse_as(&self, value: &str) -> Result<Variant, Error> {
        let err = |e: &dyn fmt::Display| Error::InvalidConfig(format!("{}: {}", e, value));
        Ok(match self {
            Self::Int(_) => Self::Int(value.parse().map_err(|e| err(&e))?),
            Self::Float(_) => Self::Float(value.parse().map_err(|e| err(&e))?),
            Self::Bool(_) => Self::Bool(value.parse().map_err(|e| err(&e))?),
            Self::String(_) => Self::String(value.to_string()),
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: String,
    pub value: Variant,
}

impl Arg {
    pub fn int(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Int(value),
        }
    }

    pub fn float(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Float(value),
        }
    }

    pub fn bool(name: &str, value: bool) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Bool(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_as() {
        assert_eq!(Variant::Int(0).parse_as("42").unwrap(), Variant::Int(42));
        assert_eq!(Variant::Bool(true).parse_as("false").unwrap(), Variant::Bool(false));
        assert!(Variant::Float(0.0).parse_as("x").is_err());
    }
}
