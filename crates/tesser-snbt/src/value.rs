/// A parsed number. The variant records the width selected by the literal's
/// suffix, or the narrowest integer width when there was none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        !matches!(self, Number::Float(_) | Number::Double(_))
    }

    /// Exact integer value, `None` for floating-point numbers.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Byte(v) => Some(v as i64),
            Number::Short(v) => Some(v as i64),
            Number::Int(v) => Some(v as i64),
            Number::Long(v) => Some(v),
            Number::Float(_) | Number::Double(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Byte(v) => v as f64,
            Number::Short(v) => v as f64,
            Number::Int(v) => v as f64,
            Number::Long(v) => v as f64,
            Number::Float(v) => v as f64,
            Number::Double(v) => v,
        }
    }

    /// Integer view used when coercing into a narrower width. Floats
    /// truncate toward zero (saturating); callers then wrap with `as`.
    pub fn to_i64_lossy(&self) -> i64 {
        match *self {
            Number::Float(v) => v as i64,
            Number::Double(v) => v as i64,
            _ => self.as_i64().unwrap_or_default(),
        }
    }

    /// 32-bit view with two's-complement wrapping for wider integers.
    pub fn to_i32_wrapping(&self) -> i32 {
        self.to_i64_lossy() as i32
    }

    /// Suffix letter written after the literal, if the width needs one.
    pub fn suffix(&self) -> Option<char> {
        match self {
            Number::Byte(_) => Some('b'),
            Number::Short(_) => Some('s'),
            Number::Int(_) => None,
            Number::Long(_) => Some('L'),
            Number::Float(_) => Some('f'),
            Number::Double(_) => Some('d'),
        }
    }
}

/// Homogeneous integer array introduced by a `B;`, `S;`, `I;` or `L;` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedArray {
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
}

impl TypedArray {
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Byte(v) => v.len(),
            TypedArray::Short(v) => v.len(),
            TypedArray::Int(v) => v.len(),
            TypedArray::Long(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The prefix letter this array is written with.
    pub fn prefix(&self) -> char {
        match self {
            TypedArray::Byte(_) => 'B',
            TypedArray::Short(_) => 'S',
            TypedArray::Int(_) => 'I',
            TypedArray::Long(_) => 'L',
        }
    }

    /// All elements as 32-bit integers; longs wrap.
    pub fn to_i32_vec(&self) -> Vec<i32> {
        match self {
            TypedArray::Byte(v) => v.iter().map(|&x| x as i32).collect(),
            TypedArray::Short(v) => v.iter().map(|&x| x as i32).collect(),
            TypedArray::Int(v) => v.clone(),
            TypedArray::Long(v) => v.iter().map(|&x| x as i32).collect(),
        }
    }
}

/// String-keyed mapping that remembers insertion order.
///
/// Key order carries no meaning in the format, but keeping it makes
/// conversion output deterministic. Re-inserting a key replaces the value in
/// the position of its first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: Vec<(String, Value)>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns the previous value for `key`, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        for (k, v) in iter {
            compound.insert(k, v);
        }
        compound
    }
}

/// Generic parsed value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Compound(Compound),
    List(Vec<Value>),
    Array(TypedArray),
    QuotedString(String),
    UnquotedString(String),
    Number(Number),
}

impl Value {
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Text of either string flavor.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::QuotedString(s) | Value::UnquotedString(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Exact integer value of an integer number.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.as_i64())
    }

    /// Look up `key` when this value is a compound.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_compound().and_then(|c| c.get(key))
    }

    /// Numeric contents as 32-bit integers.
    ///
    /// Typed arrays yield every element. Generic lists yield their number
    /// items and skip anything else. Other values yield `None`.
    pub fn int_items(&self) -> Option<Vec<i32>> {
        match self {
            Value::Array(array) => Some(array.to_i32_vec()),
            Value::List(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_number)
                    .map(|n| n.to_i32_wrapping())
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Short name of the variant for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Compound(_) => "compound",
            Value::List(_) => "list",
            Value::Array(_) => "typed array",
            Value::QuotedString(_) => "quoted string",
            Value::UnquotedString(_) => "unquoted string",
            Value::Number(_) => "number",
        }
    }
}

impl From<Compound> for Value {
    fn from(c: Compound) -> Self {
        Value::Compound(c)
    }
}

impl From<TypedArray> for Value {
    fn from(a: TypedArray) -> Self {
        Value::Array(a)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_preserves_order_and_replaces_in_place() {
        let mut c = Compound::new();
        c.insert("b", Value::Number(Number::Int(1)));
        c.insert("a", Value::Number(Number::Int(2)));
        let old = c.insert("b", Value::Number(Number::Int(3)));
        assert_eq!(old, Some(Value::Number(Number::Int(1))));
        assert_eq!(c.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(c.get("b"), Some(&Value::Number(Number::Int(3))));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_int_items_from_list_skips_non_numbers() {
        let list = Value::List(vec![
            Value::Number(Number::Int(1)),
            Value::QuotedString("x".into()),
            Value::Number(Number::Long(5_000_000_000)),
            Value::Number(Number::Double(2.9)),
        ]);
        // 5_000_000_000 wraps like a two's-complement narrowing
        assert_eq!(list.int_items(), Some(vec![1, 5_000_000_000i64 as i32, 2]));
    }

    #[test]
    fn test_int_items_from_typed_array() {
        let arr = Value::Array(TypedArray::Byte(vec![-1, 2]));
        assert_eq!(arr.int_items(), Some(vec![-1, 2]));
        assert_eq!(Value::UnquotedString("x".into()).int_items(), None);
    }

    #[test]
    fn test_number_views() {
        assert_eq!(Number::Short(-4).as_i64(), Some(-4));
        assert_eq!(Number::Float(1.5).as_i64(), None);
        assert!(!Number::Double(1.0).is_integer());
        assert_eq!(Number::Double(-2.7).to_i64_lossy(), -2);
        assert_eq!(Number::Long(-1).to_i32_wrapping(), -1);
    }

    #[test]
    fn test_value_accessors() {
        let c: Compound = [("k", Value::UnquotedString("v".into()))].into_iter().collect();
        let v = Value::Compound(c);
        assert_eq!(v.get("k").and_then(Value::as_str), Some("v"));
        assert!(v.get("missing").is_none());
        assert_eq!(v.type_name(), "compound");
        assert!(Value::List(vec![]).get("k").is_none());
    }
}
