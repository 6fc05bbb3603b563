//! Способы указать колонку строки выборки и переменную запроса.
use std::fmt;

/// Тип, значением которого можно указать колонку строки выборки: номер колонки (`usize`, нумерация
/// с 0) или ее имя (`&str`). Позволяет использовать один метод [`get()`][get] для обоих случаев.
///
/// [get]: enum.Row.html#method.get
pub trait RowIndex {
  /// Находит номер колонки в строке или возвращает `None`, если такой колонки нет. В последнем
  /// случае [`get()`][get] вернет ошибку [`InvalidColumn`][err].
  ///
  /// # Параметры
  /// - `names`:
  ///   Имена колонок, если строка их хранит.
  /// - `positions`:
  ///   Сколько колонок можно указать номером. Для строк, доступных только по именам, равно `0`.
  ///
  /// [get]: enum.Row.html#method.get
  /// [err]: ../error/enum.Error.html#variant.InvalidColumn
  fn idx(&self, names: Option<&[String]>, positions: usize) -> Option<usize>;
}

impl RowIndex for usize {
  fn idx(&self, _: Option<&[String]>, positions: usize) -> Option<usize> {
    Some(*self).filter(|&i| i < positions)
  }
}
impl<'a> RowIndex for &'a str {
  /// При повторяющихся именах выбирается последняя колонка.
  fn idx(&self, names: Option<&[String]>, _: usize) -> Option<usize> {
    names?.iter().rposition(|name| name == self)
  }
}

/// Переменная запроса, с которой связывается параметр, или колонка результата, с которой
/// связывается ячейка. Благодаря `From` методы связывания принимают и имена, и номера.
///
/// Переменные запроса связываются только по имени: связывание переменной по номеру (`?`) всегда
/// завершается неудачей.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindIndex<'a> {
  /// Имя переменной или колонки.
  Name(&'a str),
  /// Номер переменной или колонки, нумерация с 1.
  Index(usize)
}
impl<'a> fmt::Display for BindIndex<'a> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      BindIndex::Name(name) => f.write_str(name),
      BindIndex::Index(pos) => write!(f, "#{}", pos),
    }
  }
}

impl<'a> From<usize> for BindIndex<'a> {
  fn from(pos: usize) -> Self { BindIndex::Index(pos) }
}
impl<'a> From<&'a str> for BindIndex<'a> {
  fn from(name: &'a str) -> Self { BindIndex::Name(name) }
}
impl<'a> From<&'a String> for BindIndex<'a> {
  fn from(name: &'a String) -> Self { BindIndex::Name(name) }
}
