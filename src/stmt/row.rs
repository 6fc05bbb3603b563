//! Формы, в которых строки выборки возвращаются клиенту.

use std::str::FromStr;

use crate::Result;
use crate::convert::{FromValue, Value};
use crate::error::Error;

use super::index::RowIndex;

/// Форма, в которой [`fetch()`][1] возвращает строку.
///
/// [1]: struct.Statement.html#method.fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchStyle {
  /// Колонки доступны только по именам, [`Row::Assoc`](enum.Row.html#variant.Assoc).
  Assoc,
  /// Колонки доступны только по номерам, [`Row::Num`](enum.Row.html#variant.Num).
  Num,
  /// Колонки доступны и по именам, и по номерам, [`Row::Both`](enum.Row.html#variant.Both).
  Both,
  /// Значения колонок записываются в связанные ячейки, [`Row::Bound`](enum.Row.html#variant.Bound).
  Bound,
  /// Строка возвращается в виде записи, [`Row::Object`](enum.Row.html#variant.Object).
  Obj,
}
impl Default for FetchStyle {
  fn default() -> Self { FetchStyle::Both }
}
impl FromStr for FetchStyle {
  type Err = ();
  fn from_str(s: &str) -> std::result::Result<Self, ()> {
    match s {
      "assoc" => Ok(FetchStyle::Assoc),
      "num" => Ok(FetchStyle::Num),
      "both" => Ok(FetchStyle::Both),
      "bound" => Ok(FetchStyle::Bound),
      "obj" => Ok(FetchStyle::Obj),
      _ => Err(()),
    }
  }
}

/// Направление перемещения курсора при извлечении строки. Курсоры только однонаправленные,
/// поэтому поддерживается лишь [`Next`](#variant.Next).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
  /// Следующая строка.
  Next,
  /// Предыдущая строка.
  Prior,
  /// Первая строка.
  First,
  /// Последняя строка.
  Last,
  /// Строка с указанным номером.
  Absolute,
  /// Строка, отстоящая от текущей на указанное смещение.
  Relative,
}
impl Default for Orientation {
  fn default() -> Self { Orientation::Next }
}

//-------------------------------------------------------------------------------------------------
/// Набор именованных значений одной строки. Порядок колонок сохраняется.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
  names: Vec<String>,
  values: Vec<Value>,
}
impl Record {
  /// Создает запись из имен колонок и их значений. Длины должны совпадать, лишние элементы отбрасываются.
  pub fn new(mut names: Vec<String>, mut values: Vec<Value>) -> Self {
    let len = names.len().min(values.len());
    names.truncate(len);
    values.truncate(len);
    Record { names: names, values: values }
  }
  /// Имена колонок.
  #[inline]
  pub fn names(&self) -> &[String] {
    &self.names
  }
  /// Значения колонок в порядке их следования в списке выбора.
  #[inline]
  pub fn values(&self) -> &[Value] {
    &self.values
  }
  /// Количество колонок.
  #[inline]
  pub fn len(&self) -> usize {
    self.values.len()
  }
  /// Проверяет, что запись не содержит колонок.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
  /// Итератор по парам имя/значение.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.names.iter().map(String::as_str).zip(self.values.iter())
  }
  /// Значение колонки с указанным именем. Если несколько колонок имеют одинаковое имя, возвращается последняя.
  pub fn value(&self, name: &str) -> Option<&Value> {
    name.idx(Some(&self.names[..]), 0).map(|i| &self.values[i])
  }
  /// Значение колонки с указанным именем, преобразованное в тип Rust.
  pub fn get<T: FromValue>(&self, name: &str) -> Result<T> {
    self.value(name).ok_or(Error::InvalidColumn).and_then(T::from_value)
  }
}

/// Строится из строки выборки при вызове [`fetch_object()`][1].
///
/// [1]: struct.Statement.html#method.fetch_object
pub trait FromRecord : Sized {
  /// Создает объект из значений колонок. Отсутствие нужной колонки или невозможность
  /// преобразования ее значения должны приводить к ошибке.
  fn from_record(record: &Record) -> Result<Self>;
}
impl FromRecord for Record {
  fn from_record(record: &Record) -> Result<Self> {
    Ok(record.clone())
  }
}

//-------------------------------------------------------------------------------------------------
/// Одна строка выборки в форме, запрошенной в [`fetch()`][1].
///
/// [1]: struct.Statement.html#method.fetch
#[derive(Clone, Debug, PartialEq)]
pub enum Row {
  /// Значения, доступные только по именам колонок.
  Assoc(Record),
  /// Значения, доступные только по номерам колонок (нумерация с 0).
  Num(Vec<Value>),
  /// Значения, доступные и по именам, и по номерам.
  Both(Record),
  /// Значения были записаны в связанные с колонками ячейки.
  Bound,
  /// Анонимная запись с полем для каждой колонки.
  Object(Record),
}
impl Row {
  /// Сырое значение колонки, если оно есть в строке данной формы.
  pub fn value<I: RowIndex>(&self, index: I) -> Option<&Value> {
    let (names, values, positions) = match *self {
      Row::Assoc(ref r) | Row::Object(ref r) => (Some(r.names()), r.values(), 0),
      Row::Both(ref r) => (Some(r.names()), r.values(), r.len()),
      Row::Num(ref v) => (None, &v[..], v.len()),
      Row::Bound => return None,
    };
    index.idx(names, positions).map(|i| &values[i])
  }
  /// Получает значение колонки, преобразованное в тип Rust. Если колонки нет, возвращает
  /// ошибку [`InvalidColumn`](../error/enum.Error.html#variant.InvalidColumn).
  pub fn get<I: RowIndex, T: FromValue>(&self, index: I) -> Result<T> {
    self.value(index).ok_or(Error::InvalidColumn).and_then(T::from_value)
  }
  /// Количество колонок в строке.
  pub fn len(&self) -> usize {
    match *self {
      Row::Assoc(ref r) | Row::Both(ref r) | Row::Object(ref r) => r.len(),
      Row::Num(ref v) => v.len(),
      Row::Bound => 0,
    }
  }
  /// Проверяет, что строка не содержит колонок.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
