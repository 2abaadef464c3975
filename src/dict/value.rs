use super::{Dict, Dimension};

/// A single value in an OpenFOAM dictionary.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),

    /// Raw text written exactly as given, such as `Euler` or `Gauss linear`.
    Word(String),

    /// Text written inside double quotes.
    Str(String),

    /// A parenthesised list, `(a b c)`.
    List(Vec<Value>),

    /// Space-separated values with no enclosing brackets, `uniform (1 0 0)`.
    Tuple(Vec<Value>),

    Dict(Dict),
    Dimension(Dimension),
}

impl Value {
    /// Creates a raw [`Value::Word`].
    #[must_use]
    pub fn word(text: impl Into<String>) -> Self {
        Self::Word(text.into())
    }

    /// Creates a quoted [`Value::Str`].
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::Str(text.into())
    }

    /// Creates a [`Value::Tuple`] from the given items.
    #[must_use]
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Creates a [`Value::List`] from the given items.
    #[must_use]
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// A `uniform <value>` field initializer.
    #[must_use]
    pub fn uniform(value: impl Into<Value>) -> Self {
        Self::Tuple(vec![Self::word("uniform"), value.into()])
    }

    /// Returns the value as a float, widening integers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(n) => Some(*n as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text of a word or quoted string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Word(text) | Self::Str(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Values beyond `i64::MAX` are kept exactly as a [`Value::Word`] holding
/// the decimal text.
macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    i64::try_from(value).map_or_else(|_| Self::Word(value.to_string()), Self::Int)
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Word(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Word(value)
    }
}

impl From<Dict> for Value {
    fn from(value: Dict) -> Self {
        Self::Dict(value)
    }
}

impl From<Dimension> for Value {
    fn from(value: Dimension) -> Self {
        Self::Dimension(value)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Self::list(items)
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for Value {
    fn from(items: [V; N]) -> Self {
        Self::list(items)
    }
}
