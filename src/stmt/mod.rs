//! Содержит определение подготовленных выражений, которые используются для исполнения запросов,
//! и структур, связанных с ними.
//!
//! Выражение владеет одним нативным курсором. Жизненный цикл выражения: создание, связывание
//! параметров, выполнение, извлечение строк, закрытие. Связывать параметры и выполнять выражение
//! можно сколько угодно раз, каждое выполнение использует текущие значения связанных ячеек.
pub mod index;
mod meta;
mod row;
mod scan;
mod slot;

use std::collections::HashMap;
use std::vec;

use tracing::{debug, trace};

use crate::{Connection, DbResult, Result};
use crate::convert::{ToValue, Value};
use crate::driver::{Column, ExecuteMode, NativeStatement};
use crate::error::{Error, ErrorInfo, Info};
use crate::options::{Case, NullHandling, StatementOptions};
use crate::sqlstate::SqlState;
use crate::types::{ParamType, StatementType, Type};

pub use self::index::{BindIndex, RowIndex};
pub use self::meta::ColumnMeta;
pub use self::row::{FetchStyle, FromRecord, Orientation, Record, Row};
pub use self::slot::Slot;

/// Код, с которым завершаются неудачные попытки связывания переменных.
const ILLEGAL_VARIABLE: isize = 1036;

//-------------------------------------------------------------------------------------------------
/// Связанный с переменной запроса параметр.
#[derive(Clone, Debug)]
struct Param {
  /// Имя переменной так, как его указал клиент, с ведущим двоеточием.
  name: String,
  /// Ячейка, текущее значение которой используется при выполнении.
  slot: Slot,
  /// Объявленный клиентом тип.
  ty: ParamType,
  /// Тип, в котором значение передается драйверу.
  native_type: Type,
  max_len: Option<usize>,
  /// Смещение первого вхождения переменной в тексте запроса.
  position: usize,
}

/// Колонка результата, к которой привязана ячейка.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Target {
  Name(String),
  /// Номер колонки, нумерация с 0.
  Position(usize),
}

#[derive(Clone, Debug)]
struct BoundColumn {
  target: Target,
  slot: Slot,
  ty: ParamType,
}

//-------------------------------------------------------------------------------------------------
/// Подготовленное выражение.
#[derive(Debug)]
pub struct Statement<'conn> {
  /// Соединение, которое подготовило данное выражение
  conn: &'conn Connection,
  /// Текст запроса, не меняется после создания
  sql: String,
  /// Нативный курсор
  native: Box<dyn NativeStatement>,
  /// Связанные параметры по нормализованному имени переменной
  params: HashMap<String, Param>,
  columns_bound: Vec<BoundColumn>,
  /// Описание колонок результата последнего выполнения
  columns: Option<Vec<Column>>,
  /// Последняя ошибка, случившаяся при работе с выражением
  error: Option<Info>,
  /// Строки, материализованные при первом обращении к итератору
  buffer: Option<vec::IntoIter<Row>>,
  options: StatementOptions,
}
impl<'conn> Statement<'conn> {
  pub(crate) fn new(conn: &'conn Connection, sql: &str) -> DbResult<Self> {
    let mut native = conn.native().parse(sql)?;
    native.set_prefetch(conn.options().prefetch)?;
    debug!(sql = %sql, kind = ?native.statement_type(), "prepare");

    Ok(Statement {
      conn: conn,
      sql: sql.to_owned(),
      native: native,
      params: HashMap::new(),
      columns_bound: Vec::new(),
      columns: None,
      error: None,
      buffer: None,
      options: conn.options().statement_options(),
    })
  }
  /// Запоминает ошибку и сообщает о ней способом, выбранным в настройках выражения.
  fn fail<T>(&mut self, info: Info, sentinel: T) -> Result<T> {
    self.error = Some(info.clone());
    self.options.err_mode.dispatch(info, sentinel)
  }
  fn bind_failed(&mut self) -> Result<bool> {
    self.fail(Info::new(ILLEGAL_VARIABLE, "ORA-01036: illegal variable name/number"), false)
  }

  /// Текст запроса, из которого было подготовлено выражение.
  #[inline]
  pub fn sql(&self) -> &str {
    &self.sql
  }
  /// Текущие настройки выражения.
  #[inline]
  pub fn options(&self) -> &StatementOptions {
    &self.options
  }
  /// Устанавливает форму строк, используемую итератором.
  #[inline]
  pub fn set_fetch_mode(&mut self, style: FetchStyle) {
    self.options.fetch_mode = style;
  }
  /// Устанавливает регистр имен колонок в возвращаемых строках.
  #[inline]
  pub fn set_case(&mut self, case: Case) {
    self.options.case = case;
  }

  //-----------------------------------------------------------------------------------------------
  /// Связывает ячейку с именованной переменной запроса. При каждом выполнении выражения в базу будет
  /// передаваться значение, которое находится в ячейке в этот момент. Повторное связывание той же
  /// переменной заменяет предыдущее.
  ///
  /// Имена переменных сравниваются без учета регистра, ведущее двоеточие можно не указывать.
  ///
  /// # Параметры
  /// - `index`:
  ///   Имя переменной. Связывание по позиции не поддерживается.
  /// - `slot`:
  ///   Ячейка со значением.
  /// - `ty`:
  ///   Тип параметра. Типы [`Stmt`][1] и [`InputOutput`][2] не поддерживаются.
  /// - `max_len`:
  ///   Максимальная длина значения в байтах, если ее нужно ограничить.
  ///
  /// # Возвращаемое значение
  /// `Ok(true)`, если параметр связан. Если переменная не встречается в тексте запроса, указана по
  /// позиции или тип не поддерживается, ничего не связывается, запоминается ошибка `ORA-01036`
  /// и возвращается `Ok(false)` или ошибка, в зависимости от режима сообщения об ошибках.
  ///
  /// [1]: ../types/enum.ParamType.html#variant.Stmt
  /// [2]: ../types/enum.ParamType.html#variant.InputOutput
  pub fn bind_param<'i, I>(&mut self, index: I, slot: &Slot, ty: ParamType, max_len: Option<usize>) -> Result<bool>
    where I: Into<BindIndex<'i>>
  {
    let name = match index.into() {
      BindIndex::Name(name) => name.trim(),
      BindIndex::Index(_) => return self.bind_failed(),
    };
    let native_type = match ty.driver_type() {
      Some(t) => t,
      None => return self.bind_failed(),
    };
    let key = scan::normalize(name);
    let position = match scan::find(&self.sql, &key) {
      Some(p) => p,
      None => return self.bind_failed(),
    };
    let name = if name.starts_with(':') { name.to_owned() } else { format!(":{}", name) };
    trace!(%name, ?ty, position, "bind");

    self.params.insert(key, Param {
      name: name,
      slot: slot.clone(),
      ty: ty,
      native_type: native_type,
      max_len: max_len,
      position: position,
    });
    Ok(true)
  }
  /// Связывает с переменной запроса постоянное значение. Аналогично [`bind_param()`](#method.bind_param)
  /// с ячейкой, недоступной клиенту.
  pub fn bind_value<'i, I, T>(&mut self, index: I, value: T, ty: ParamType) -> Result<bool>
    where I: Into<BindIndex<'i>>,
          T: ToValue
  {
    let slot = Slot::new(value);
    self.bind_param(index, &slot, ty, None)
  }
  /// Связывает ячейку с колонкой результата. При каждом извлечении строки значение колонки,
  /// приведенное к типу `ty`, записывается в ячейку.
  ///
  /// # Параметры
  /// - `column`:
  ///   Имя колонки (без учета регистра) или ее номер. Нумерация колонок начинается с 1,
  ///   связывание колонки с номером `0` завершается неудачей.
  pub fn bind_column<'i, I>(&mut self, column: I, slot: &Slot, ty: ParamType) -> Result<bool>
    where I: Into<BindIndex<'i>>
  {
    let target = match column.into() {
      BindIndex::Name(name) => Target::Name(name.to_owned()),
      BindIndex::Index(0) => return Ok(false),
      BindIndex::Index(pos) => Target::Position(pos - 1),
    };
    self.columns_bound.retain(|c| c.target != target);
    self.columns_bound.push(BoundColumn { target: target, slot: slot.clone(), ty: ty });
    Ok(true)
  }

  //-----------------------------------------------------------------------------------------------
  fn bind_all(&mut self) -> DbResult<()> {
    let mut params: Vec<&Param> = self.params.values().collect();
    params.sort_by_key(|p| p.position);
    for p in params {
      let value = p.slot.get().coerce(p.ty);
      self.native.bind_by_name(&p.name, &value, p.native_type, p.max_len)?;
    }
    Ok(())
  }
  /// Выполняет выражение с текущими значениями связанных параметров. Если у соединения включена
  /// автоматическая фиксация и явная транзакция не начата, изменения фиксируются сразу после
  /// успешного выполнения.
  ///
  /// Возвращает `Ok(true)` в случае успеха. Ошибка драйвера запоминается и возвращается в виде
  /// `Ok(false)` или `Err`, в зависимости от режима сообщения об ошибках.
  pub fn execute(&mut self) -> Result<bool> {
    self.error = None;
    self.buffer = None;
    self.columns = None;
    if let Err(e) = self.bind_all() {
      return self.fail(e.info(), false);
    }
    let mode = self.conn.commit_mode();
    debug!(sql = %self.sql, ?mode, "execute");

    if let Err(e) = self.native.execute(mode) {
      return self.fail(e.info(), false);
    }
    match self.native.columns() {
      Ok(columns) => self.columns = Some(columns),
      Err(e) => return self.fail(e.info(), false),
    }
    Ok(true)
  }
  /// Связывает переданные значения как строковые параметры и выполняет выражение. Значения,
  /// указанные по позиции, не могут быть связаны, в этом случае выражение не выполняется.
  pub fn execute_with(&mut self, inputs: &[(BindIndex, Value)]) -> Result<bool> {
    self.error = None;
    for &(index, ref value) in inputs {
      if !self.bind_value(index, value, ParamType::Str)? {
        return Ok(false);
      }
    }
    self.execute()
  }

  //-----------------------------------------------------------------------------------------------
  /// Имена колонок результата в регистре, выбранном в настройках.
  fn column_names(&self) -> Vec<String> {
    let case = self.options.case;
    match self.columns {
      Some(ref columns) => columns.iter().map(|c| case.apply(&c.name)).collect(),
      None => Vec::new(),
    }
  }
  /// Применяет к извлеченным значениям настройки выражения.
  fn shape(&self, values: Vec<Value>) -> Result<Vec<Value>> {
    values.into_iter().map(|v| -> Result<Value> {
      let v = match v {
        Value::Lob(ref lob) if self.options.return_lobs => lob.materialize()?,
        v => v,
      };
      let v = match (self.options.oracle_nulls, v) {
        (NullHandling::EmptyString, Value::Str(ref s)) if s.is_empty() => Value::Null,
        (NullHandling::ToString, Value::Null) => Value::Str(String::new()),
        (_, v) => v,
      };
      Ok(match v {
        Value::Bool(_) | Value::Int(_) | Value::Float(_) if self.options.stringify_fetches => {
          v.to_text().map_or(Value::Null, Value::Str)
        },
        v => v,
      })
    }).collect()
  }
  /// Записывает значения строки в связанные с колонками ячейки.
  fn write_bound(&self, values: &[Value]) {
    for bound in &self.columns_bound {
      let idx = match bound.target {
        Target::Position(pos) if pos < values.len() => Some(pos),
        Target::Position(_) => None,
        Target::Name(ref name) => self.columns.as_ref().and_then(|columns| {
          columns.iter().position(|c| c.name.eq_ignore_ascii_case(name))
        }),
      };
      if let Some(value) = idx.and_then(|i| values.get(i)) {
        bound.slot.set(value.clone().coerce(bound.ty));
      }
    }
  }
  /// Извлекает следующую строку результата и возвращает ее в запрошенной форме, или `None`,
  /// если строк больше нет.
  ///
  /// При каждом извлечении значения колонок записываются в связанные с ними ячейки, независимо
  /// от запрошенной формы. Форма [`FetchStyle::Bound`][1] только записывает значения в ячейки.
  ///
  /// [1]: enum.FetchStyle.html#variant.Bound
  pub fn fetch(&mut self, style: FetchStyle) -> Result<Option<Row>> {
    let values = match self.native.fetch() {
      Ok(Some(values)) => values,
      Ok(None) => return Ok(None),
      Err(e) => return self.fail(e.info(), None),
    };
    let values = self.shape(values)?;
    trace!(columns = values.len(), "fetch");
    self.write_bound(&values);

    Ok(Some(match style {
      FetchStyle::Assoc => Row::Assoc(Record::new(self.column_names(), values)),
      FetchStyle::Num   => Row::Num(values),
      FetchStyle::Both  => Row::Both(Record::new(self.column_names(), values)),
      FetchStyle::Bound => Row::Bound,
      FetchStyle::Obj   => Row::Object(Record::new(self.column_names(), values)),
    }))
  }
  /// Извлекает следующую строку с указанием направления перемещения курсора. Курсоры только
  /// однонаправленные, поэтому любое направление, кроме [`Next`][1], приводит к ошибке
  /// [`Unsupported`][2]. Смещение игнорируется.
  ///
  /// [1]: enum.Orientation.html#variant.Next
  /// [2]: ../error/enum.Error.html#variant.Unsupported
  pub fn fetch_oriented(&mut self, style: FetchStyle, orientation: Orientation, _offset: isize) -> Result<Option<Row>> {
    match orientation {
      Orientation::Next => self.fetch(style),
      _ => Err(Error::Unsupported("scrollable cursor")),
    }
  }
  /// Извлекает следующую строку и строит из нее объект.
  pub fn fetch_object<T: FromRecord>(&mut self) -> Result<Option<T>> {
    match self.fetch(FetchStyle::Obj)? {
      Some(Row::Object(ref record)) => T::from_record(record).map(Some),
      _ => Ok(None),
    }
  }
  /// Извлекает следующую строку и возвращает значение колонки с номером `column` (нумерация с 0).
  /// Возвращает `None`, если строк больше нет или такой колонки в результате нет.
  pub fn fetch_column(&mut self, column: usize) -> Result<Option<Value>> {
    match self.fetch(FetchStyle::Num)? {
      Some(Row::Num(values)) => Ok(values.into_iter().nth(column)),
      _ => Ok(None),
    }
  }
  /// Извлекает все оставшиеся строки. Для исчерпанного курсора возвращает пустой вектор.
  pub fn fetch_all(&mut self, style: FetchStyle) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    while let Some(row) = self.fetch(style)? {
      rows.push(row);
    }
    Ok(rows)
  }

  //-----------------------------------------------------------------------------------------------
  /// Количество строк, затронутых последним выполнением `INSERT/UPDATE/DELETE`, или количество
  /// строк, извлеченных из результата `SELECT` к текущему моменту.
  #[inline]
  pub fn row_count(&self) -> u64 {
    self.native.row_count()
  }
  /// Количество колонок в результате последнего выполнения, `0`, если результата нет.
  pub fn column_count(&self) -> usize {
    self.columns.as_ref().map_or(0, |c| c.len())
  }
  /// Описывает колонки результата через отдельный курсор, не выполняя запрос.
  fn describe(&self) -> DbResult<Vec<Column>> {
    let mut native = self.conn.native().parse(&self.sql)?;
    native.execute(ExecuteMode::DescribeOnly)?;
    native.columns()
  }
  /// Описание колонки результата. Для не-`SELECT` выражений возвращает `None`.
  ///
  /// Для получения описания текст запроса разбирается заново и выполняется в режиме
  /// [`DescribeOnly`][1], поэтому курсор текущего выражения и уже извлеченные строки не меняются.
  /// Ошибка драйвера запоминается и возвращается в виде `Ok(None)` или `Err`, в зависимости от
  /// режима сообщения об ошибках.
  ///
  /// [1]: ../driver/enum.ExecuteMode.html#variant.DescribeOnly
  pub fn get_column_meta<I: RowIndex>(&mut self, index: I) -> Result<Option<ColumnMeta>> {
    if self.native.statement_type() != StatementType::SELECT {
      return Ok(None);
    }
    let columns = match self.describe() {
      Ok(columns) => columns,
      Err(e) => return self.fail(e.info(), None),
    };
    let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();

    Ok(index.idx(Some(&names[..]), columns.len()).map(|i| {
      ColumnMeta::new(&columns[i], self.options.case, scan::table_name(&self.sql))
    }))
  }
  /// Текстовое описание связанных параметров. Параметры перечисляются в порядке первого вхождения
  /// их переменных в текст запроса.
  ///
  /// # Пример
  /// ```text
  /// SQL: [38] SELECT * FROM T WHERE A = :a OR B = :b
  /// Params: 1
  /// Key: Name: [2] :a
  /// paramno=1
  /// name=[2]:a
  /// is_param=1
  /// param_type=2
  /// ```
  pub fn debug_dump_params(&self) -> String {
    let mut params: Vec<&Param> = self.params.values().collect();
    params.sort_by_key(|p| p.position);

    let mut lines = vec![
      format!("SQL: [{}] {}", self.sql.len(), self.sql),
      format!("Params: {}", params.len()),
    ];
    for (i, p) in params.into_iter().enumerate() {
      lines.push(format!("Key: Name: [{}] {}", p.name.len(), p.name));
      lines.push(format!("paramno={}", i + 1));
      lines.push(format!("name=[{}]{}", p.name.len(), p.name));
      lines.push("is_param=1".to_owned());
      lines.push(format!("param_type={}", p.ty.code()));
    }
    lines.join("\n")
  }
  /// Закрывает курсор, освобождая результат на сервере. Выражение после этого можно выполнить снова.
  /// Вызов безопасен, даже если строки не извлекались.
  pub fn close_cursor(&mut self) -> Result<bool> {
    self.buffer = None;
    match self.native.cancel() {
      Ok(()) => Ok(true),
      Err(e) => self.fail(e.info(), false),
    }
  }
  /// Освобождает выражение и его нативный курсор.
  pub fn close(self) {
    debug!(sql = %self.sql, "close");
  }

  //-----------------------------------------------------------------------------------------------
  /// Вид выражения, как его определил драйвер.
  #[inline]
  pub fn statement_kind(&self) -> StatementType {
    self.native.statement_type()
  }
  /// Описание нативного курсора для диагностики.
  #[inline]
  pub fn native_debug_info(&self) -> String {
    self.native.debug_info()
  }
  /// Класс последней ошибки выражения или `None`, если ошибок не было.
  pub fn error_code(&self) -> Option<SqlState> {
    self.error.as_ref().map(Info::sql_state)
  }
  /// Полное описание последней ошибки выражения.
  pub fn error_info(&self) -> ErrorInfo {
    self.error.as_ref().into()
  }
}

/// Итерирование по выражению возвращает строки в форме, установленной
/// [`set_fetch_mode()`](struct.Statement.html#method.set_fetch_mode). При первом вызове `next()`
/// извлекаются все оставшиеся строки результата, поэтому строки, извлеченные после этого через
/// [`fetch()`](struct.Statement.html#method.fetch), итератору уже не видны. Ошибки извлечения
/// завершают итерацию и доступны через [`error_info()`](struct.Statement.html#method.error_info).
impl<'conn> Iterator for Statement<'conn> {
  type Item = Row;

  fn next(&mut self) -> Option<Row> {
    if self.buffer.is_none() {
      let style = self.options.fetch_mode;
      let rows = self.fetch_all(style).unwrap_or_default();
      self.buffer = Some(rows.into_iter());
    }
    self.buffer.as_mut().and_then(Iterator::next)
  }
}
