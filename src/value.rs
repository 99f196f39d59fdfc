use bytes::Bytes;
use std::collections::{HashMap, HashSet, VecDeque};
use strum_macros::Display;

use crate::sorted_set::SortedSet;

pub type List = VecDeque<Bytes>;
pub type Set = HashSet<Bytes>;
pub type Hash = HashMap<Bytes, Bytes>;

/// The value bound to a key. Each variant is one of the data structure families a key can hold;
/// commands match on the variant and fail with a type mismatch when it is not their own.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(Bytes),
    List(List),
    Set(Set),
    SortedSet(SortedSet),
    Hash(Hash),
}

/// The name reported by `TYPE` for each [`Value`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueType {
    String,
    List,
    Set,
    #[strum(serialize = "zset")]
    SortedSet,
    Hash,
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Set(_) => ValueType::Set,
            Value::SortedSet(_) => ValueType::SortedSet,
            Value::Hash(_) => ValueType::Hash,
        }
    }
}

/// A collection type stored under a key. Collections are created empty on the first write to an
/// absent key and the key is dropped as soon as the collection becomes empty again.
pub trait Container: Default + Into<Value> {
    fn from_value(value: &Value) -> Option<&Self>;

    fn from_value_mut(value: &mut Value) -> Option<&mut Self>;

    fn is_empty(&self) -> bool;
}

macro_rules! container {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(inner: $ty) -> Self {
                Value::$variant(inner)
            }
        }

        impl Container for $ty {
            fn from_value(value: &Value) -> Option<&Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn is_empty(&self) -> bool {
                <$ty>::is_empty(self)
            }
        }
    };
}

container!(List, List);
container!(Set, Set);
container!(SortedSet, SortedSet);
container!(Hash, Hash);

impl From<Bytes> for Value {
    fn from(data: Bytes) -> Self {
        Value::String(data)
    }
}
