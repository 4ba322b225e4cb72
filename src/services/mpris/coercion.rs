use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use zbus::zvariant::{ObjectPath, OwnedValue, Value};

/// Conversion failures between wire values and [`PropertyValue`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// The value has a different kind than the one requested
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// Requested kind
        expected: &'static str,
        /// Kind actually present
        found: &'static str,
    },

    /// The wire type has no native counterpart (or cannot be sent)
    #[error("unsupported value of type '{0}'")]
    Unsupported(String),

    /// A string is not a valid D-Bus object path
    #[error("invalid object path '{0}'")]
    InvalidObjectPath(String),
}

/// A value crossing the protocol boundary, in native form.
///
/// Nested variants are flattened, strings are owned UTF-8, dictionaries become
/// string-keyed ordered maps and structures become positional field lists.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// `b`
    Bool(bool),
    /// `n`, `i`, `x`
    Int(i64),
    /// `y`, `q`, `u`, `t`
    UInt(u64),
    /// `d`
    Double(f64),
    /// `s`, `g`
    Str(String),
    /// `o`
    ObjectPath(String),
    /// `a*`
    List(Vec<PropertyValue>),
    /// `a{s*}`
    Map(BTreeMap<String, PropertyValue>),
    /// `(...)`
    Struct(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Short name of the value's kind, used in mismatch reports.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::UInt(_) => "unsigned integer",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::ObjectPath(_) => "object path",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Struct(_) => "structure",
        }
    }

    /// Convert back into a wire value.
    ///
    /// Lists must be homogeneous strings or object paths and maps must hold
    /// scalars or strings; no range checking is done on numbers.
    ///
    /// # Errors
    ///
    /// Returns `CoercionError::Unsupported` for shapes the protocol never
    /// needs to send, `CoercionError::InvalidObjectPath` for malformed paths.
    pub fn to_wire(&self) -> Result<OwnedValue, CoercionError> {
        let value = self.to_value()?;
        value
            .try_to_owned()
            .map_err(|e| CoercionError::Unsupported(e.to_string()))
    }

    fn to_value(&self) -> Result<Value<'static>, CoercionError> {
        let value = match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::I64(*n),
            Self::UInt(n) => Value::U64(*n),
            Self::Double(f) => Value::F64(*f),
            Self::Str(s) => Value::from(s.clone()),
            Self::ObjectPath(path) => Value::ObjectPath(object_path(path)?),
            Self::List(items) => list_value(items)?,
            Self::Map(map) => {
                let mut entries: HashMap<String, Value<'static>> = HashMap::new();
                for (key, item) in map {
                    entries.insert(key.clone(), item.to_value()?);
                }
                Value::from(entries)
            }
            Self::Struct(_) => return Err(CoercionError::Unsupported("structure".to_string())),
        };
        Ok(value)
    }
}

fn object_path(path: &str) -> Result<ObjectPath<'static>, CoercionError> {
    ObjectPath::try_from(path.to_string())
        .map_err(|_| CoercionError::InvalidObjectPath(path.to_string()))
}

fn list_value(items: &[PropertyValue]) -> Result<Value<'static>, CoercionError> {
    if items.iter().all(|item| matches!(item, PropertyValue::Str(_))) {
        let strings: Vec<String> = items
            .iter()
            .filter_map(|item| match item {
                PropertyValue::Str(s) => Some(s.clone()),
                _ => None,
            })
            .collect();
        return Ok(Value::from(strings));
    }

    if items
        .iter()
        .all(|item| matches!(item, PropertyValue::ObjectPath(_)))
    {
        let paths = items
            .iter()
            .filter_map(|item| match item {
                PropertyValue::ObjectPath(p) => Some(object_path(p)),
                _ => None,
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Value::from(paths));
    }

    Err(CoercionError::Unsupported("heterogeneous list".to_string()))
}

impl TryFrom<&Value<'_>> for PropertyValue {
    type Error = CoercionError;

    fn try_from(value: &Value<'_>) -> Result<Self, Self::Error> {
        let coerced = match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::U8(n) => Self::UInt(u64::from(*n)),
            Value::U16(n) => Self::UInt(u64::from(*n)),
            Value::U32(n) => Self::UInt(u64::from(*n)),
            Value::U64(n) => Self::UInt(*n),
            Value::I16(n) => Self::Int(i64::from(*n)),
            Value::I32(n) => Self::Int(i64::from(*n)),
            Value::I64(n) => Self::Int(*n),
            Value::F64(f) => Self::Double(*f),
            Value::Str(s) => Self::Str(s.as_str().to_string()),
            Value::Signature(s) => Self::Str(s.to_string()),
            Value::ObjectPath(p) => Self::ObjectPath(p.as_str().to_string()),
            Value::Value(inner) => Self::try_from(&**inner)?,
            Value::Array(array) => Self::List(
                array
                    .iter()
                    .map(Self::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::Dict(dict) => {
                let mut map = BTreeMap::new();
                for (key, item) in dict.iter() {
                    map.insert(map_key(key)?, Self::try_from(item)?);
                }
                Self::Map(map)
            }
            Value::Structure(structure) => Self::Struct(
                structure
                    .fields()
                    .iter()
                    .map(Self::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            #[allow(unreachable_patterns)]
            other => {
                return Err(CoercionError::Unsupported(
                    other.value_signature().to_string(),
                ));
            }
        };
        Ok(coerced)
    }
}

impl TryFrom<&OwnedValue> for PropertyValue {
    type Error = CoercionError;

    fn try_from(value: &OwnedValue) -> Result<Self, Self::Error> {
        Self::try_from(&**value)
    }
}

fn map_key(key: &Value<'_>) -> Result<String, CoercionError> {
    match PropertyValue::try_from(key)? {
        PropertyValue::Str(s) | PropertyValue::ObjectPath(s) => Ok(s),
        PropertyValue::Int(n) => Ok(n.to_string()),
        PropertyValue::UInt(n) => Ok(n.to_string()),
        other => Err(CoercionError::Mismatch {
            expected: "string key",
            found: other.kind(),
        }),
    }
}

fn mismatch(expected: &'static str, found: &PropertyValue) -> CoercionError {
    CoercionError::Mismatch {
        expected,
        found: found.kind(),
    }
}

impl TryFrom<&PropertyValue> for bool {
    type Error = CoercionError;

    fn try_from(value: &PropertyValue) -> Result<Self, Self::Error> {
        match value {
            PropertyValue::Bool(b) => Ok(*b),
            other => Err(mismatch("boolean", other)),
        }
    }
}

impl TryFrom<&PropertyValue> for i64 {
    type Error = CoercionError;

    fn try_from(value: &PropertyValue) -> Result<Self, Self::Error> {
        match value {
            PropertyValue::Int(n) => Ok(*n),
            PropertyValue::UInt(n) => i64::try_from(*n).map_err(|_| mismatch("integer", value)),
            other => Err(mismatch("integer", other)),
        }
    }
}

impl TryFrom<&PropertyValue> for u64 {
    type Error = CoercionError;

    fn try_from(value: &PropertyValue) -> Result<Self, Self::Error> {
        match value {
            PropertyValue::UInt(n) => Ok(*n),
            PropertyValue::Int(n) => {
                u64::try_from(*n).map_err(|_| mismatch("unsigned integer", value))
            }
            other => Err(mismatch("unsigned integer", other)),
        }
    }
}

impl TryFrom<&PropertyValue> for f64 {
    type Error = CoercionError;

    #[allow(clippy::cast_precision_loss)]
    fn try_from(value: &PropertyValue) -> Result<Self, Self::Error> {
        match value {
            PropertyValue::Double(f) => Ok(*f),
            PropertyValue::Int(n) => Ok(*n as f64),
            PropertyValue::UInt(n) => Ok(*n as f64),
            other => Err(mismatch("double", other)),
        }
    }
}

impl TryFrom<&PropertyValue> for String {
    type Error = CoercionError;

    fn try_from(value: &PropertyValue) -> Result<Self, Self::Error> {
        match value {
            PropertyValue::Str(s) | PropertyValue::ObjectPath(s) => Ok(s.clone()),
            other => Err(mismatch("string", other)),
        }
    }
}

impl TryFrom<&PropertyValue> for Vec<String> {
    type Error = CoercionError;

    fn try_from(value: &PropertyValue) -> Result<Self, Self::Error> {
        match value {
            PropertyValue::List(items) => items.iter().map(String::try_from).collect(),
            PropertyValue::Str(s) => Ok(vec![s.clone()]),
            other => Err(mismatch("string list", other)),
        }
    }
}

impl TryFrom<&PropertyValue> for BTreeMap<String, PropertyValue> {
    type Error = CoercionError;

    fn try_from(value: &PropertyValue) -> Result<Self, Self::Error> {
        match value {
            PropertyValue::Map(map) => Ok(map.clone()),
            other => Err(mismatch("map", other)),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}
