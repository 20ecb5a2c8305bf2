use {
    crate::StanzaError,
    chrono::{DateTime, SecondsFormat, Utc},
    serde::{ser::Serializer, Serialize},
    std::{
        collections::{btree_map::Iter, BTreeMap},
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// An operator for a condition clause. The variant names are the wire names.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ConditionOp {
    ArnEquals,
    ArnEqualsIfExists,
    ArnLike,
    ArnLikeIfExists,
    ArnNotEquals,
    ArnNotEqualsIfExists,
    ArnNotLike,
    ArnNotLikeIfExists,
    BinaryEquals,
    BinaryEqualsIfExists,
    Bool,
    BoolIfExists,
    DateEquals,
    DateEqualsIfExists,
    DateGreaterThan,
    DateGreaterThanEquals,
    DateGreaterThanEqualsIfExists,
    DateGreaterThanIfExists,
    DateLessThan,
    DateLessThanEquals,
    DateLessThanEqualsIfExists,
    DateLessThanIfExists,
    DateNotEquals,
    DateNotEqualsIfExists,
    IpAddress,
    IpAddressIfExists,
    NotIpAddress,
    NotIpAddressIfExists,
    Null,
    NumericEquals,
    NumericEqualsIfExists,
    NumericGreaterThan,
    NumericGreaterThanEquals,
    NumericGreaterThanEqualsIfExists,
    NumericGreaterThanIfExists,
    NumericLessThan,
    NumericLessThanEquals,
    NumericLessThanEqualsIfExists,
    NumericLessThanIfExists,
    NumericNotEquals,
    NumericNotEqualsIfExists,
    StringEquals,
    StringEqualsIfExists,
    StringEqualsIgnoreCase,
    StringEqualsIgnoreCaseIfExists,
    StringLike,
    StringLikeIfExists,
    StringNotEquals,
    StringNotEqualsIfExists,
    StringNotEqualsIgnoreCase,
    StringNotEqualsIgnoreCaseIfExists,
    StringNotLike,
    StringNotLikeIfExists,
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(self, f)
    }
}

impl FromStr for ConditionOp {
    type Err = StanzaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArnEquals" => Ok(Self::ArnEquals),
            "ArnEqualsIfExists" => Ok(Self::ArnEqualsIfExists),
            "ArnLike" => Ok(Self::ArnLike),
            "ArnLikeIfExists" => Ok(Self::ArnLikeIfExists),
            "ArnNotEquals" => Ok(Self::ArnNotEquals),
            "ArnNotEqualsIfExists" => Ok(Self::ArnNotEqualsIfExists),
            "ArnNotLike" => Ok(Self::ArnNotLike),
            "ArnNotLikeIfExists" => Ok(Self::ArnNotLikeIfExists),
            "BinaryEquals" => Ok(Self::BinaryEquals),
            "BinaryEqualsIfExists" => Ok(Self::BinaryEqualsIfExists),
            "Bool" => Ok(Self::Bool),
            "BoolIfExists" => Ok(Self::BoolIfExists),
            "DateEquals" => Ok(Self::DateEquals),
            "DateEqualsIfExists" => Ok(Self::DateEqualsIfExists),
            "DateGreaterThan" => Ok(Self::DateGreaterThan),
            "DateGreaterThanEquals" => Ok(Self::DateGreaterThanEquals),
            "DateGreaterThanEqualsIfExists" => Ok(Self::DateGreaterThanEqualsIfExists),
            "DateGreaterThanIfExists" => Ok(Self::DateGreaterThanIfExists),
            "DateLessThan" => Ok(Self::DateLessThan),
            "DateLessThanEquals" => Ok(Self::DateLessThanEquals),
            "DateLessThanEqualsIfExists" => Ok(Self::DateLessThanEqualsIfExists),
            "DateLessThanIfExists" => Ok(Self::DateLessThanIfExists),
            "DateNotEquals" => Ok(Self::DateNotEquals),
            "DateNotEqualsIfExists" => Ok(Self::DateNotEqualsIfExists),
            "IpAddress" => Ok(Self::IpAddress),
            "IpAddressIfExists" => Ok(Self::IpAddressIfExists),
            "NotIpAddress" => Ok(Self::NotIpAddress),
            "NotIpAddressIfExists" => Ok(Self::NotIpAddressIfExists),
            "Null" => Ok(Self::Null),
            "NumericEquals" => Ok(Self::NumericEquals),
            "NumericEqualsIfExists" => Ok(Self::NumericEqualsIfExists),
            "NumericGreaterThan" => Ok(Self::NumericGreaterThan),
            "NumericGreaterThanEquals" => Ok(Self::NumericGreaterThanEquals),
            "NumericGreaterThanEqualsIfExists" => Ok(Self::NumericGreaterThanEqualsIfExists),
            "NumericGreaterThanIfExists" => Ok(Self::NumericGreaterThanIfExists),
            "NumericLessThan" => Ok(Self::NumericLessThan),
            "NumericLessThanEquals" => Ok(Self::NumericLessThanEquals),
            "NumericLessThanEqualsIfExists" => Ok(Self::NumericLessThanEqualsIfExists),
            "NumericLessThanIfExists" => Ok(Self::NumericLessThanIfExists),
            "NumericNotEquals" => Ok(Self::NumericNotEquals),
            "NumericNotEqualsIfExists" => Ok(Self::NumericNotEqualsIfExists),
            "StringEquals" => Ok(Self::StringEquals),
            "StringEqualsIfExists" => Ok(Self::StringEqualsIfExists),
            "StringEqualsIgnoreCase" => Ok(Self::StringEqualsIgnoreCase),
            "StringEqualsIgnoreCaseIfExists" => Ok(Self::StringEqualsIgnoreCaseIfExists),
            "StringLike" => Ok(Self::StringLike),
            "StringLikeIfExists" => Ok(Self::StringLikeIfExists),
            "StringNotEquals" => Ok(Self::StringNotEquals),
            "StringNotEqualsIfExists" => Ok(Self::StringNotEqualsIfExists),
            "StringNotEqualsIgnoreCase" => Ok(Self::StringNotEqualsIgnoreCase),
            "StringNotEqualsIgnoreCaseIfExists" => Ok(Self::StringNotEqualsIgnoreCaseIfExists),
            "StringNotLike" => Ok(Self::StringNotLike),
            "StringNotLikeIfExists" => Ok(Self::StringNotLikeIfExists),
            _ => Err(StanzaError::InvalidConditionOperator(s.to_string())),
        }
    }
}

/// A scalar condition value before coercion to text. Everything becomes a
/// string in the policy grammar; booleans render `true`/`false`, dates render
/// RFC 3339.
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl Display for ConditionValue {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Date(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for ConditionValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for ConditionValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ConditionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<DateTime<Utc>> for ConditionValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

/// The OR-set of values stored under one operator+key pair. Values keep the
/// order they first arrived in; re-inserting an existing value is a no-op.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValueSet {
    values: Vec<String>,
}

impl ValueSet {
    pub(crate) fn insert(&mut self, value: String) {
        if !self.values.contains(&value) {
            self.values.push(value);
        }
    }

    pub fn to_vec(&self) -> Vec<&str> {
        self.values.iter().map(String::as_str).collect()
    }

    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl Serialize for ValueSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.values.len() == 1 {
            self.values[0].serialize(serializer)
        } else {
            self.values.serialize(serializer)
        }
    }
}

pub type ConditionMap = BTreeMap<String, ValueSet>;

/// The accumulated conditional constraints of one statement, nested as
/// operator, then condition key, then the OR-set of values.
///
/// Values arriving under the same operator+key union into one set; values
/// arriving under different operators for the same key stay separate clauses.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Condition {
    map: BTreeMap<ConditionOp, ConditionMap>,
}

impl Condition {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `values` into the set at `[op][key]`, coercing each to text. An
    /// empty value list is a no-op and creates no entry.
    pub fn put<K, V, I>(&mut self, op: ConditionOp, key: K, values: I)
    where
        K: Into<String>,
        V: Into<ConditionValue>,
        I: IntoIterator<Item = V>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }

        let set = self.map.entry(op).or_default().entry(key.into()).or_default();
        for value in values {
            set.insert(value.into().to_string());
        }
    }

    #[inline]
    pub fn get(&self, op: ConditionOp) -> Option<&ConditionMap> {
        self.map.get(&op)
    }

    /// The value set stored at `[op][key]`, if any.
    pub fn values(&self, op: ConditionOp, key: &str) -> Option<&ValueSet> {
        self.map.get(&op).and_then(|keys| keys.get(key))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, ConditionOp, ConditionMap> {
        self.map.iter()
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}
