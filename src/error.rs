//! Виды ошибок, которые могут генерироваться библиотекой.

use std::fmt;

use thiserror::Error;

use crate::sqlstate::{classify, SqlState};
use crate::types::Type;

/// Информация об одной ошибке/предупреждении Oracle
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Info {
  /// Код ошибки оракла, `ORA-xxxxx`.
  pub code: isize,
  /// Сообщение оракла об ошибке, как его вернул драйвер.
  pub message: String,
}
impl Info {
  /// Создает описание ошибки с указанным кодом и сообщением.
  pub fn new<S: Into<String>>(code: isize, message: S) -> Self {
    Info { code: code, message: message.into() }
  }
  /// Стандартный класс, к которому относится данная ошибка.
  #[inline]
  pub fn sql_state(&self) -> SqlState {
    classify(self.code)
  }
}
impl fmt::Display for Info {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.message)
  }
}

/// Ошибки, возникающие при вызове нативных функций драйвера.
#[derive(Error, Debug)]
pub enum DbError {
  /// Ошибка вызова одной из функций драйвера. Содержит код и сообщение об ошибке.
  #[error("{0}")]
  Fault(Info),
  /// Хендл, переданный в функцию, оказался некорректным (код `OCI_INVALID_HANDLE (==-2)`).
  #[error("Invalid handle passed to function")]
  InvalidHandle,
  /// Функция вернула неизвестный код ошибки, не покрытый ни одним из предыдущих вариантов
  #[error("Unknown return code {0}")]
  Unknown(isize),
}
impl DbError {
  /// Приводит ошибку к паре код/сообщение, которую можно классифицировать и показать клиенту.
  pub fn info(&self) -> Info {
    match *self {
      DbError::Fault(ref info) => info.clone(),
      DbError::InvalidHandle => Info::new(-2, self.to_string()),
      DbError::Unknown(code) => Info::new(code, self.to_string()),
    }
  }
}
impl From<Info> for DbError {
  fn from(info: Info) -> Self {
    DbError::Fault(info)
  }
}

/// Ошибка, которую может вернуть библиотека. Включает ошибки конфигурации, ошибки взаимодействия с базой
/// данных и ошибки конвертации значений.
#[derive(Error, Debug)]
pub enum Error {
  /// Строка подключения не соответствует формату `oci:database=<db>[;charset=<name>]`.
  #[error("Invalid DSN: {0}")]
  Dsn(String),
  /// Опция с таким именем не поддерживается.
  #[error("Unknown option `{0}`")]
  UnknownOption(String),
  /// Значение опции не может быть использовано.
  #[error("Invalid value `{value}` for option `{name}`")]
  InvalidOption {
    /// Имя опции
    name: String,
    /// Отвергнутое значение
    value: String,
  },
  /// Не удалось установить соединение с базой данных.
  #[error("Can't connect to database: {0}")]
  Connect(Info),
  /// Ошибка базы данных, уже отнесенная к стандартному классу.
  #[error("SQLSTATE[{state}]: {info}")]
  Db {
    /// Класс ошибки, вычисленный по ее коду
    state: SqlState,
    /// Исходный код и сообщение драйвера
    info: Info,
  },
  /// Попытка завершить транзакцию, которая не была начата.
  #[error("There is no active transaction")]
  NoTransaction,
  /// Ошибка преобразования значения Rust в значение базы данных или наоборот
  #[error("Can't convert value from/to database type {0:?}")]
  Conversion(Type),
  /// Возникает при получении элемента из строки выборки, если индекс, по которому получается элемент,
  /// не существует в выборке.
  #[error("Nonexisting column")]
  InvalidColumn,
  /// Операция не поддерживается драйвером.
  #[error("Unsupported operation: {0}")]
  Unsupported(&'static str),
}
impl Error {
  /// Стандартный класс ошибки для ошибок базы данных и соединения, `None` для остальных.
  pub fn sql_state(&self) -> Option<SqlState> {
    match *self {
      Error::Db { state, .. } => Some(state),
      Error::Connect(ref info) => Some(info.sql_state()),
      _ => None,
    }
  }
}
impl From<Info> for Error {
  fn from(info: Info) -> Self {
    Error::Db { state: info.sql_state(), info: info }
  }
}
impl From<DbError> for Error {
  fn from(err: DbError) -> Self {
    err.info().into()
  }
}

/// Стандартизированное описание последней ошибки, тройка (класс, нативный код, нативное сообщение).
/// Отсутствие ошибки представляется как `("00000", None, None)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorInfo {
  /// Класс ошибки.
  pub state: SqlState,
  /// Нативный код ошибки, если она была.
  pub code: Option<isize>,
  /// Нативное сообщение об ошибке, если она была.
  pub message: Option<String>,
}
impl<'a> From<Option<&'a Info>> for ErrorInfo {
  fn from(info: Option<&'a Info>) -> Self {
    match info {
      Some(info) => ErrorInfo {
        state: info.sql_state(),
        code: Some(info.code),
        message: Some(info.message.clone()),
      },
      None => ErrorInfo::default(),
    }
  }
}
