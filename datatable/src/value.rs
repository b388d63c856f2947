use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Bound, RangeBounds};

/// Raw attribute value read out of a record by a column accessor.
#[derive(Clone, Default, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    #[default]
    Null
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(num) => Some(*num),
            Value::Float(num) => Some(*num as i64),
            Value::Text(s) => s.trim().parse::<i64>().ok(),
            Value::List(_) | Value::Null => None
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(num) => Some(*num as f64),
            Value::Float(num) => Some(*num),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::List(_) | Value::Null => None
        }
    }

    pub fn as_str(&self) -> Option<Cow<str>> {
        match self {
            Value::Integer(num) => Some(num.to_string().into()),
            Value::Float(num) => Some(num.to_string().into()),
            Value::Text(s) => Some(s.as_str().into()),
            Value::List(items) => Some(items.join(", ").into()),
            Value::Null => None
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Values that display as an empty cell: null, zero, NaN and empty text.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Integer(num) => *num == 0,
            Value::Float(num) => *num == 0.0 || num.is_nan(),
            Value::Text(s) => s.is_empty(),
            Value::List(_) => false
        }
    }

    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Some(a.total_cmp(b)),
            (Value::Integer(a), Value::Float(b)) => Some((*a as f64).total_cmp(b)),
            (Value::Float(a), Value::Integer(b)) => Some(a.total_cmp(&(*b as f64))),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::List(a), Value::List(b)) => Some(a.cmp(b)),
            _ => None
        }
    }

    pub fn in_bounds(&self, range: impl RangeBounds<Value>) -> bool {
        match range.start_bound() {
            Bound::Included(value) => {
                if self.compare(value).map_or(true, |ord| ord.is_lt()) {
                    return false;
                }
            }
            Bound::Excluded(value) => {
                if self.compare(value).map_or(true, |ord| ord.is_le()) {
                    return false;
                }
            }
            Bound::Unbounded => {}
        }

        match range.end_bound() {
            Bound::Included(value) => {
                if self.compare(value).map_or(true, |ord| ord.is_gt()) {
                    return false;
                }
            }
            Bound::Excluded(value) => {
                if self.compare(value).map_or(true, |ord| ord.is_ge()) {
                    return false;
                }
            }
            Bound::Unbounded => {}
        }

        true
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(num) => write!(f, "{}", num),
            Value::Float(num) => write!(f, "{}", num),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) => write!(f, "{}", items.join(", ")),
            Value::Null => write!(f, "")
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_zero_are_falsy() {
        assert!(Value::Null.is_falsy());
        assert!(Value::Integer(0).is_falsy());
        assert!(Value::Float(0.0).is_falsy());
        assert!(Value::Text(String::new()).is_falsy());
        assert!(!Value::Integer(7).is_falsy());
        assert!(!Value::List(vec![]).is_falsy());
    }

    #[test]
    fn displays_lists_joined() {
        let genres = Value::List(vec!["Action".into(), "Drama".into()]);
        assert_eq!(genres.to_string(), "Action, Drama");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Float(8.1).to_string(), "8.1");
    }

    #[test]
    fn bounds_are_inclusive() {
        let runtime = Value::Integer(90);
        assert!(runtime.in_bounds(Value::Integer(60)..=Value::Integer(90)));
        assert!(!runtime.in_bounds(Value::Integer(91)..=Value::Integer(120)));
        assert!(Value::Float(60.5).in_bounds(Value::Integer(60)..=Value::Integer(90)));
        assert!(!Value::Text("x".into()).in_bounds(Value::Integer(0)..));
    }

    #[test]
    fn mixed_numbers_compare() {
        assert_eq!(Value::Integer(2).compare(&Value::Float(2.5)), Some(Ordering::Less));
        assert_eq!(Value::Text("a".into()).compare(&Value::Integer(1)), None);
    }
}
