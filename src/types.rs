//! Перечисляемые типы данных, используемые при работе с библиотекой

/// Типы колонок и переменных, которыми оперирует драйвер. Числовые значения совпадают с
/// внешними кодами типов Oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
#[repr(u16)]
pub enum Type {
  /// `VARCHAR2` в представлении сетевого протокола
  CHR  = 1,
  /// Число Oracle, `NUMBER`
  NUM  = 2,
  /// Целое число
  INT  = 3,
  /// Число с плавающей точкой
  FLT  = 4,
  /// Строка, завершающаяся нулем
  STR  = 5,
  /// `LONG`
  LNG  = 8,
  /// Строка переменной длины
  VCS  = 9,
  /// `ROWID`
  RID  = 11,
  /// Дата во внутреннем формате Oracle
  DAT  = 12,
  /// `BINARY_FLOAT`
  BFLOAT = 21,
  /// `BINARY_DOUBLE`
  BDOUBLE = 22,
  /// Двоичные данные, `RAW`
  BIN  = 23,
  /// Строка фиксированной длины, `CHAR`
  AFC  = 96,
  /// Строка переменной длины по ANSI
  AVC  = 97,
  /// Курсор
  CUR  = 102,
  /// Символьный большой объект
  CLOB = 112,
  /// Двоичный большой объект
  BLOB = 113,
  /// Внешний файл, `BFILE`
  BFILEE = 114,

  /// `TIMESTAMP`
  TIMESTAMP     = 187,
  /// `TIMESTAMP WITH TIME ZONE`
  TIMESTAMP_TZ  = 188,
  /// `INTERVAL DAY TO SECOND`
  INTERVAL_DS   = 190,

  /// Логический тип PL/SQL
  BOL    = 252,
}
impl Type {
  /// Имя типа в том виде, в каком оно записывается в DDL. Именно это имя отображается в
  /// [`ColumnMeta::decl_type`][1].
  ///
  /// [1]: ../stmt/struct.ColumnMeta.html#structfield.decl_type
  pub fn decl_name(&self) -> &'static str {
    use self::Type::*;

    match *self {
      CHR | STR | VCS | AVC => "VARCHAR2",
      AFC => "CHAR",
      NUM | INT | FLT => "NUMBER",
      BFLOAT => "BINARY_FLOAT",
      BDOUBLE => "BINARY_DOUBLE",
      LNG => "LONG",
      RID => "ROWID",
      DAT => "DATE",
      BIN => "RAW",
      CUR => "REF CURSOR",
      CLOB => "CLOB",
      BLOB => "BLOB",
      BFILEE => "BFILE",
      TIMESTAMP => "TIMESTAMP",
      TIMESTAMP_TZ => "TIMESTAMP WITH TIME ZONE",
      INTERVAL_DS => "INTERVAL DAY TO SECOND",
      BOL => "BOOLEAN",
    }
  }
}

/// Вид выражения, как его определил драйвер при разборе текста.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum StatementType {
  /// Выражение не удалось отнести ни к одному из известных видов.
  UNKNOWN = 0,
  /// Выборка, единственный вид выражений, возвращающий набор строк.
  SELECT  = 1,
  /// `UPDATE`
  UPDATE  = 2,
  /// `DELETE`
  DELETE  = 3,
  /// `INSERT`
  INSERT  = 4,
  /// `CREATE`
  CREATE  = 5,
  /// `DROP`
  DROP    = 6,
  /// `ALTER`
  ALTER   = 7,
  /// Анонимный блок PL/SQL, начинающийся с `BEGIN`
  BEGIN   = 8,
  /// Анонимный блок PL/SQL, начинающийся с `DECLARE`
  DECLARE = 9,
  /// Вызов процедуры, `CALL`
  CALL    = 10,
  /// `MERGE`
  MERGE   = 16,
}
impl Default for StatementType {
  fn default() -> Self { StatementType::UNKNOWN }
}

/// Привилегии, с которыми открывается сессия. Задается опцией
/// [`session_mode`](../options/struct.Options.html#structfield.session_mode).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
  /// Обычная пользовательская сессия
  Default = 0,
  /// Сессия с привилегиями `SYSDBA`
  SysDba      = 1 << 1,
  /// Сессия с привилегиями `SYSOPER`
  SysOper     = 1 << 2,
  /// Предварительное подключение для административных задач. Допустимо только вместе
  /// с `SysDba` или `SysOper`.
  PrelimAuth  = 1 << 3,
}
impl Default for AuthMode {
  fn default() -> Self { AuthMode::Default }
}

/// Обобщенный тип параметра, который клиент указывает при связывании переменных и колонок.
/// Числовые значения совпадают с константами `PDO::PARAM_*`, они же печатаются в
/// [`debug_dump_params()`][1].
///
/// [1]: ../stmt/struct.Statement.html#method.debug_dump_params
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ParamType {
  /// SQL `NULL`
  Null = 0,
  /// Целое число
  Int  = 1,
  /// Строка, тип по умолчанию
  Str  = 2,
  /// Большой объект
  Lob  = 3,
  /// Набор записей. Связывание параметров такого типа не поддерживается.
  Stmt = 4,
  /// Логическое значение
  Bool = 5,
  /// Выходной или входной-выходной параметр хранимой процедуры. Связывание параметров такого
  /// типа не поддерживается.
  InputOutput = 0x8000_0000,
}
impl ParamType {
  /// Нативный тип, с которым значение передается в драйвер, или `None`, если связывание
  /// параметров данного типа не поддерживается.
  pub fn driver_type(&self) -> Option<Type> {
    match *self {
      ParamType::Bool => Some(Type::BOL),
      ParamType::Int => Some(Type::INT),
      ParamType::Lob => Some(Type::CLOB),
      ParamType::Null | ParamType::Str => Some(Type::CHR),
      ParamType::Stmt | ParamType::InputOutput => None,
    }
  }
  /// Определяет обобщенный тип колонки по имени ее типа в базе данных. Неизвестные имена
  /// считаются строками.
  pub fn from_decl(name: &str) -> Self {
    match name {
      "NUMBER" => ParamType::Int,
      "CHAR" | "VARCHAR2" | "NVARCHAR2" => ParamType::Str,
      "LOB" | "CLOB" | "BLOB" | "NCLOB" => ParamType::Lob,
      "BOOLEAN" => ParamType::Bool,
      _ => ParamType::Str,
    }
  }
  /// Числовой код типа.
  #[inline]
  pub fn code(&self) -> u32 {
    *self as u32
  }
}
impl Default for ParamType {
  fn default() -> Self { ParamType::Str }
}
