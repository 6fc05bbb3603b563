//! Описание колонки результата в том виде, в каком его возвращает [`get_column_meta()`][1].
//!
//! [1]: struct.Statement.html#method.get_column_meta

use crate::driver::Column;
use crate::options::Case;
use crate::types::{ParamType, Type};

/// Метаданные одной колонки списка выбора.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMeta {
  /// Тип колонки, как его сообщил драйвер.
  pub native_type: Type,
  /// Имя типа колонки в том виде, в каком оно записывается в DDL.
  pub decl_type: &'static str,
  /// Дополнительные признаки колонки. Драйвер их не сообщает, поэтому список всегда пуст.
  pub flags: Vec<String>,
  /// Имя колонки в регистре, выбранном в настройках выражения.
  pub name: String,
  /// Таблица, из которой выбирается колонка, или пустая строка, если ее не удалось определить.
  pub table: String,
  /// Максимальная ширина значения колонки в байтах.
  pub len: u32,
  /// Количество значащих цифр левее десятичной точки, `precision - scale`.
  pub precision: i32,
  /// Обобщенный тип, соответствующий типу колонки.
  pub pdo_type: ParamType,
}
impl ColumnMeta {
  pub(crate) fn new(column: &Column, case: Case, table: String) -> Self {
    let decl_type = column.type_.decl_name();
    ColumnMeta {
      native_type: column.type_,
      decl_type: decl_type,
      flags: Vec::new(),
      name: case.apply(&column.name),
      table: table,
      len: column.size,
      precision: column.precision as i32 - column.scale as i32,
      pdo_type: ParamType::from_decl(decl_type),
    }
  }
}
