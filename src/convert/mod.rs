//! Содержит код для преобразованием между типами Rust и значениями базы данных.

use std::str;

use num_traits::NumCast;

use crate::Result;
use crate::error::Error;
use crate::lob::Lob;
use crate::types::{ParamType, Type};

#[cfg(feature = "with-chrono")]
mod chrono;

/// Значение одной колонки строки выборки или одного связываемого параметра.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  /// SQL `NULL`
  Null,
  /// Логическое значение
  Bool(bool),
  /// Целое число
  Int(i64),
  /// Число с плавающей точкой
  Float(f64),
  /// Строка
  Str(String),
  /// Сырые двоичные данные
  Bytes(Vec<u8>),
  /// Дескриптор большого объекта
  Lob(Lob),
}
impl Value {
  /// Скалярными считаются все значения, кроме `NULL` и больших объектов.
  #[inline]
  pub fn is_scalar(&self) -> bool {
    match *self {
      Value::Null | Value::Lob(_) => false,
      _ => true,
    }
  }
  /// Нативный тип, в котором данное значение передается в базу.
  pub fn native_type(&self) -> Type {
    match *self {
      Value::Null | Value::Str(_) => Type::CHR,
      Value::Bool(_) => Type::BOL,
      Value::Int(_) => Type::INT,
      Value::Float(_) => Type::BDOUBLE,
      Value::Bytes(_) => Type::BIN,
      Value::Lob(ref lob) => lob.kind().native_type(),
    }
  }
  /// Строковое представление скалярного значения. Для `NULL` и больших объектов возвращает `None`.
  pub fn to_text(&self) -> Option<String> {
    match *self {
      Value::Bool(b) => Some(if b { "1" } else { "0" }.to_owned()),
      Value::Int(i) => Some(i.to_string()),
      Value::Float(f) => Some(f.to_string()),
      Value::Str(ref s) => Some(s.clone()),
      Value::Bytes(ref b) => Some(String::from_utf8_lossy(b).into_owned()),
      Value::Null | Value::Lob(_) => None,
    }
  }
  /// Приводит значение к обобщенному типу, объявленному при связывании колонки. Значения, которые
  /// не удается привести, возвращаются как есть.
  pub fn coerce(self, ty: ParamType) -> Value {
    match (ty, self) {
      (_, Value::Null) => Value::Null,
      (ParamType::Null, _) => Value::Null,
      (ParamType::Str, v @ Value::Lob(_)) => v,
      (ParamType::Str, v) => v.to_text().map_or(Value::Null, Value::Str),
      (ParamType::Int, v) => match i64::from_value(&v) {
        Ok(i) => Value::Int(i),
        Err(_) => v,
      },
      (ParamType::Bool, v) => match bool::from_value(&v) {
        Ok(b) => Value::Bool(b),
        Err(_) => v,
      },
      (_, v) => v,
    }
  }
}
impl Default for Value {
  fn default() -> Self { Value::Null }
}

//-------------------------------------------------------------------------------------------------
/// Преобразует значение базы данных в тип Rust, для которого реализован данный типаж.
pub trait FromValue : Sized {
  /// Преобразует значение, извлеченное из базы данных, в конкретный тип, если это преобразование
  /// возможно. Если преобразование невозможно, возвращает ошибку [`Conversion`][1].
  ///
  /// [1]: ../error/enum.Error.html#variant.Conversion
  fn from_value(value: &Value) -> Result<Self>;
}

/// Преобразует тип Rust в значение базы данных.
pub trait ToValue {
  /// Преобразует данное значение в представление, которое может использоваться в bind вызовах.
  fn to_value(&self) -> Value;
}

impl FromValue for Value {
  #[inline]
  fn from_value(value: &Value) -> Result<Self> {
    Ok(value.clone())
  }
}
impl ToValue for Value {
  #[inline]
  fn to_value(&self) -> Value {
    self.clone()
  }
}

impl<T: FromValue> FromValue for Option<T> {
  fn from_value(value: &Value) -> Result<Self> {
    match *value {
      Value::Null => Ok(None),
      ref v => T::from_value(v).map(Some),
    }
  }
}
impl<T: ToValue> ToValue for Option<T> {
  #[inline]
  fn to_value(&self) -> Value {
    self.as_ref().map_or(Value::Null, ToValue::to_value)
  }
}
impl<'a, T: ToValue + ?Sized> ToValue for &'a T {
  #[inline]
  fn to_value(&self) -> Value {
    (**self).to_value()
  }
}

//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Числа
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
macro_rules! num_from {
  ($($ty:ty),+) => ($(
    impl FromValue for $ty {
      fn from_value(value: &Value) -> Result<Self> {
        match *value {
          Value::Int(i) => NumCast::from(i).ok_or(Error::Conversion(Type::INT)),
          Value::Float(f) => NumCast::from(f).ok_or(Error::Conversion(Type::BDOUBLE)),
          Value::Bool(b) => Ok(if b { 1 as $ty } else { 0 as $ty }),
          Value::Str(ref s) => s.trim().parse().map_err(|_| Error::Conversion(Type::CHR)),
          ref v => Err(Error::Conversion(v.native_type())),
        }
      }
    }
  )+)
}
macro_rules! int_to {
  ($($ty:ty),+) => ($(
    impl ToValue for $ty {
      #[inline]
      fn to_value(&self) -> Value {
        Value::Int(*self as i64)
      }
    }
  )+)
}
macro_rules! float_to {
  ($($ty:ty),+) => ($(
    impl ToValue for $ty {
      #[inline]
      fn to_value(&self) -> Value {
        Value::Float(*self as f64)
      }
    }
  )+)
}
num_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
// u64 и usize не всегда помещаются в i64, поэтому для них ToValue не реализован
int_to!(i8, i16, i32, i64, isize, u8, u16, u32);
float_to!(f32, f64);

//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Логические значения
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
impl FromValue for bool {
  fn from_value(value: &Value) -> Result<Self> {
    match *value {
      Value::Bool(b) => Ok(b),
      Value::Int(i) => Ok(i != 0),
      Value::Float(f) => Ok(f != 0.0),
      Value::Str(ref s) => Ok(!s.is_empty() && s != "0"),
      ref v => Err(Error::Conversion(v.native_type())),
    }
  }
}
impl ToValue for bool {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Bool(*self)
  }
}

//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Строки
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
impl FromValue for String {
  fn from_value(value: &Value) -> Result<Self> {
    match *value {
      Value::Bytes(ref b) => str::from_utf8(b).map(str::to_owned).map_err(|_| Error::Conversion(Type::BIN)),
      Value::Lob(ref lob) => lob.as_str().map(str::to_owned),
      ref v => v.to_text().ok_or(Error::Conversion(v.native_type())),
    }
  }
}
impl ToValue for str {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Str(self.to_owned())
  }
}
impl ToValue for String {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Str(self.clone())
  }
}

//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Двоичные данные и большие объекты
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
impl FromValue for Vec<u8> {
  fn from_value(value: &Value) -> Result<Self> {
    match *value {
      Value::Bytes(ref b) => Ok(b.clone()),
      Value::Str(ref s) => Ok(s.as_bytes().to_vec()),
      Value::Lob(ref lob) => Ok(lob.as_bytes().to_vec()),
      ref v => Err(Error::Conversion(v.native_type())),
    }
  }
}
impl ToValue for [u8] {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Bytes(self.to_vec())
  }
}
impl ToValue for Vec<u8> {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Bytes(self.clone())
  }
}
impl FromValue for Lob {
  fn from_value(value: &Value) -> Result<Self> {
    match *value {
      Value::Lob(ref lob) => Ok(lob.clone()),
      ref v => Err(Error::Conversion(v.native_type())),
    }
  }
}
impl ToValue for Lob {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Lob(self.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numbers_are_narrowed_with_checks() {
    assert_eq!(42u8, u8::from_value(&Value::Int(42)).unwrap());
    assert!(u8::from_value(&Value::Int(300)).is_err());
    assert!(u32::from_value(&Value::Int(-1)).is_err());
    assert_eq!(9, i32::from_value(&Value::Float(9.9)).unwrap());
    assert_eq!(17, i64::from_value(&Value::Str(" 17 ".into())).unwrap());
  }

  #[test]
  fn null_needs_option() {
    assert!(i32::from_value(&Value::Null).is_err());
    assert_eq!(None, Option::<i32>::from_value(&Value::Null).unwrap());
    assert_eq!(Value::Null, None::<i32>.to_value());
  }

  #[test]
  fn coercion_to_declared_type() {
    assert_eq!(Value::Str("5".into()), Value::Int(5).coerce(ParamType::Str));
    assert_eq!(Value::Int(5), Value::Str("5".into()).coerce(ParamType::Int));
    assert_eq!(Value::Str("X".into()), Value::Str("X".into()).coerce(ParamType::Int));
    assert_eq!(Value::Bool(true), Value::Int(1).coerce(ParamType::Bool));
    assert_eq!(Value::Null, Value::Null.coerce(ParamType::Str));
  }

  #[test]
  fn scalars() {
    assert!(Value::Int(0).is_scalar());
    assert!(Value::Str(String::new()).is_scalar());
    assert!(!Value::Null.is_scalar());
    assert!(!Value::Lob(Lob::clob("")).is_scalar());
  }
}
