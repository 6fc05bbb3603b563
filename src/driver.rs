//! Типажи, через которые библиотека обращается к нативному драйверу Oracle.
//!
//! Библиотека не реализует сетевой протокол сама. Драйвер предоставляет разбор текста запроса,
//! связывание переменных, выполнение, извлечение строк, описание колонок, отмену курсора,
//! фиксацию и откат транзакции и получение последней ошибки. Все ошибки драйвера возвращаются
//! в виде [`DbError`][1] и классифицируются библиотекой перед тем, как попасть к клиенту.
//!
//! [1]: ../error/enum.DbError.html

use std::fmt;

use crate::DbResult;
use crate::convert::Value;
use crate::error::Info;
use crate::params::ConnectParams;
use crate::types::{StatementType, Type};
use crate::version::Version;

/// Режим выполнения выражения.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecuteMode {
  /// Изменения остаются в текущей транзакции до явного вызова `commit` или `rollback`.
  Default = 0,
  /// Выражение только разбирается и описывается сервером, но не выполняется. Используется для
  /// получения метаданных колонок.
  DescribeOnly = 1 << 4,
  /// Транзакция автоматически фиксируется после успешного выполнения выражения.
  CommitOnSuccess = 1 << 5,
}
impl Default for ExecuteMode {
  fn default() -> Self { ExecuteMode::Default }
}

//-------------------------------------------------------------------------------------------------
/// Структура для представления колонки базы данных из списка выбора
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
  /// Порядковый номер колонки в списке выбора (нумерация с 0)
  pub pos: usize,
  /// Тип колонки в базе данных.
  pub type_: Type,
  /// Название колонки в списке выбора (т.е. либо название колонки в базе данных, либо ее псевдоним).
  pub name: String,
  /// Ширина колонки в байтах. Показывает, сколько байт максимум может занимать значение колонки,
  /// а не занимаемый реально данными объем.
  pub size: u32,
  /// Количество десятичных цифр для представления чисел для числовых данных.
  pub precision: i16,
  /// Количество цифр справа от десятичной точки. Для чисел с плавающей точкой равно `-127`.
  pub scale: i8,
}

/// Фабрика соединений конкретного драйвера.
pub trait Driver {
  /// Устанавливает соединение с базой данных.
  fn connect(&self, params: &ConnectParams) -> DbResult<Box<dyn NativeConnection>>;
}

/// Нативное соединение.
pub trait NativeConnection : fmt::Debug {
  /// Разбирает текст запроса и создает курсор для его выполнения.
  fn parse(&self, sql: &str) -> DbResult<Box<dyn NativeStatement>>;
  /// Фиксирует текущую транзакцию.
  fn commit(&self) -> DbResult<()>;
  /// Откатывает текущую транзакцию.
  fn rollback(&self) -> DbResult<()>;
  /// Последняя ошибка, случившаяся в соединении, или `None`, если ошибок не было.
  fn last_error(&self) -> Option<Info>;
  /// Версия клиентской библиотеки.
  fn client_version(&self) -> Version;
  /// Версия сервера, к которому установлено соединение.
  fn server_version(&self) -> DbResult<Version>;
}

/// Нативный курсор, связанный с одним разобранным выражением.
pub trait NativeStatement : fmt::Debug {
  /// Вид выражения.
  fn statement_type(&self) -> StatementType;
  /// Связывает значение с именованной переменной `:name`.
  ///
  /// # Параметры
  /// - `name`:
  ///   Имя переменной вместе с ведущим двоеточием.
  /// - `value`:
  ///   Значение, которое будет использоваться при следующем выполнении.
  /// - `ty`:
  ///   Тип, в котором значение передается серверу.
  /// - `max_len`:
  ///   Максимальная длина значения в байтах, если она задана.
  fn bind_by_name(&mut self, name: &str, value: &Value, ty: Type, max_len: Option<usize>) -> DbResult<()>;
  /// Выполняет выражение в указанном режиме.
  fn execute(&mut self, mode: ExecuteMode) -> DbResult<()>;
  /// Описание колонок списка выбора. Для не-`SELECT` выражений список пуст.
  fn columns(&self) -> DbResult<Vec<Column>>;
  /// Извлекает следующую строку или `None`, если строк больше нет.
  fn fetch(&mut self) -> DbResult<Option<Vec<Value>>>;
  /// Количество строк, затронутых или извлеченных последним выполнением.
  fn row_count(&self) -> u64;
  /// Отменяет текущую выборку и освобождает ее ресурсы на сервере.
  fn cancel(&mut self) -> DbResult<()>;
  /// Устанавливает количество строк, запрашиваемых у сервера заранее.
  fn set_prefetch(&mut self, rows: u32) -> DbResult<()>;
  /// Человекочитаемое описание нативного ресурса, для диагностики.
  fn debug_info(&self) -> String;
}
