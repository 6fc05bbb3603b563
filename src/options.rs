//! Настройки поведения соединения и выражений.
//!
//! Все настройки собраны в структуре [`Options`][1] с именованными полями и значениями по умолчанию.
//! Настройки проверяются один раз при открытии соединения и после этого не меняются. Выражения
//! получают копию той части настроек, которая влияет на их поведение ([`StatementOptions`][2]).
//!
//! [1]: struct.Options.html
//! [2]: struct.StatementOptions.html

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::Result;
use crate::error::{Error, Info};
use crate::stmt::FetchStyle;
use crate::types::AuthMode;

/// Способ сообщения об ошибках выполнения выражений.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrMode {
  /// Ошибка только запоминается и доступна через `error_info()`, метод возвращает признак неудачи.
  Silent,
  /// Как `Silent`, но дополнительно выводится предупреждение через `tracing`.
  Warning,
  /// Метод возвращает `Err(Error::Db)`.
  Exception,
}
impl ErrMode {
  /// Сообщает об ошибке драйвера выбранным способом. В режимах `Silent` и `Warning` возвращает
  /// `Ok(sentinel)`, в режиме `Exception` возвращает классифицированную ошибку.
  pub(crate) fn dispatch<T>(&self, info: Info, sentinel: T) -> Result<T> {
    match *self {
      ErrMode::Silent => Ok(sentinel),
      ErrMode::Warning => {
        warn!(code = info.code, state = %info.sql_state(), "{}", info.message);
        Ok(sentinel)
      },
      ErrMode::Exception => Err(info.into()),
    }
  }
}
impl Default for ErrMode {
  fn default() -> Self { ErrMode::Silent }
}
impl FromStr for ErrMode {
  type Err = ();
  fn from_str(s: &str) -> std::result::Result<Self, ()> {
    match s {
      "silent" => Ok(ErrMode::Silent),
      "warning" => Ok(ErrMode::Warning),
      "exception" => Ok(ErrMode::Exception),
      _ => Err(()),
    }
  }
}

/// Регистр имен колонок в возвращаемых строках.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Case {
  /// Имена возвращаются так, как их вернула база (для Oracle обычно в верхнем регистре).
  Natural,
  /// Имена приводятся к верхнему регистру.
  Upper,
  /// Имена приводятся к нижнему регистру.
  Lower,
}
impl Case {
  /// Приводит имя колонки к данному регистру.
  pub fn apply(&self, name: &str) -> String {
    match *self {
      Case::Natural => name.to_owned(),
      Case::Upper => name.to_uppercase(),
      Case::Lower => name.to_lowercase(),
    }
  }
}
impl Default for Case {
  fn default() -> Self { Case::Natural }
}
impl FromStr for Case {
  type Err = ();
  fn from_str(s: &str) -> std::result::Result<Self, ()> {
    match s {
      "natural" => Ok(Case::Natural),
      "upper" => Ok(Case::Upper),
      "lower" => Ok(Case::Lower),
      _ => Err(()),
    }
  }
}

/// Преобразование `NULL`-ов и пустых строк при извлечении данных.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullHandling {
  /// Значения не преобразуются.
  Natural,
  /// Пустые строки превращаются в `NULL`.
  EmptyString,
  /// `NULL` превращается в пустую строку.
  ToString,
}
impl Default for NullHandling {
  fn default() -> Self { NullHandling::Natural }
}
impl FromStr for NullHandling {
  type Err = ();
  fn from_str(s: &str) -> std::result::Result<Self, ()> {
    match s {
      "natural" => Ok(NullHandling::Natural),
      "empty_string" => Ok(NullHandling::EmptyString),
      "to_string" => Ok(NullHandling::ToString),
      _ => Err(()),
    }
  }
}

//-------------------------------------------------------------------------------------------------
/// Настройки соединения.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
  /// Фиксировать ли изменения сразу после успешного выполнения выражения, если явная транзакция
  /// не начата. По умолчанию `true`.
  pub autocommit: bool,
  /// Способ сообщения об ошибках. По умолчанию [`ErrMode::Silent`](enum.ErrMode.html#variant.Silent).
  pub err_mode: ErrMode,
  /// Регистр имен колонок. По умолчанию [`Case::Natural`](enum.Case.html#variant.Natural).
  pub case: Case,
  /// Форма строк, возвращаемых по умолчанию. Допустимы только `Assoc`, `Num` и `Both`,
  /// по умолчанию `Both`.
  pub fetch_mode: FetchStyle,
  /// Возвращать содержимое больших объектов вместо их дескрипторов. По умолчанию `false`.
  pub return_lobs: bool,
  /// Режим сессии, с которым устанавливается соединение.
  pub session_mode: AuthMode,
  /// Количество строк, которые драйвер запрашивает у сервера заранее. По умолчанию `100`.
  pub prefetch: u32,
  /// Таймаут вызовов к серверу, передается драйверу при подключении. По умолчанию 600 секунд.
  pub timeout: Duration,
  /// Запрашивать у драйвера постоянное соединение. По умолчанию `false`.
  pub persistent: bool,
  /// Преобразование `NULL`-ов при извлечении данных.
  pub oracle_nulls: NullHandling,
  /// Превращать все скалярные значения в строки при извлечении данных. По умолчанию `false`.
  pub stringify_fetches: bool,
}
impl Default for Options {
  fn default() -> Self {
    Options {
      autocommit: true,
      err_mode: ErrMode::Silent,
      case: Case::Natural,
      fetch_mode: FetchStyle::Both,
      return_lobs: false,
      session_mode: AuthMode::Default,
      prefetch: 100,
      timeout: Duration::from_secs(600),
      persistent: false,
      oracle_nulls: NullHandling::Natural,
      stringify_fetches: false,
    }
  }
}
impl Options {
  /// Наибольшее значение [`prefetch`](#structfield.prefetch), которое принимает драйвер.
  pub const MAX_PREFETCH: u32 = 65535;

  /// Проверяет согласованность настроек.
  pub fn validate(&self) -> Result<()> {
    match self.fetch_mode {
      FetchStyle::Assoc | FetchStyle::Num | FetchStyle::Both => {},
      other => return Err(invalid("default_fetch_mode", format!("{:?}", other))),
    }
    if self.prefetch > Self::MAX_PREFETCH {
      return Err(invalid("prefetch", self.prefetch.to_string()));
    }
    if self.timeout == Duration::from_secs(0) {
      return Err(invalid("timeout", "0".to_owned()));
    }
    Ok(())
  }
  /// Строит настройки из текстовых пар ключ/значение, начиная с настроек по умолчанию.
  /// Неизвестные ключи и некорректные значения приводят к ошибке.
  ///
  /// # Пример
  /// ```
  /// use oci_pdo::options::{Case, Options};
  ///
  /// let options = Options::from_pairs(&[("case", "lower"), ("prefetch", "10")]).unwrap();
  /// assert_eq!(Case::Lower, options.case);
  /// assert_eq!(10, options.prefetch);
  /// assert!(Options::from_pairs(&[("no_such_option", "1")]).is_err());
  /// ```
  pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
    let mut o = Options::default();
    for &(key, value) in pairs {
      match key {
        "autocommit"         => o.autocommit        = parse_bool(key, value)?,
        "errmode"            => o.err_mode          = parse(key, value)?,
        "case"               => o.case              = parse(key, value)?,
        "default_fetch_mode" => o.fetch_mode        = parse(key, value)?,
        "return_lobs"        => o.return_lobs       = parse_bool(key, value)?,
        "session_mode"       => o.session_mode      = parse_session_mode(key, value)?,
        "prefetch"           => o.prefetch          = parse(key, value)?,
        "timeout"            => o.timeout           = Duration::from_secs(parse(key, value)?),
        "persistent"         => o.persistent        = parse_bool(key, value)?,
        "oracle_nulls"       => o.oracle_nulls      = parse(key, value)?,
        "stringify_fetches"  => o.stringify_fetches = parse_bool(key, value)?,
        _ => return Err(Error::UnknownOption(key.to_owned())),
      }
    }
    o.validate()?;
    Ok(o)
  }
  /// Часть настроек, которая копируется в каждое выражение.
  pub fn statement_options(&self) -> StatementOptions {
    StatementOptions {
      err_mode: self.err_mode,
      case: self.case,
      fetch_mode: self.fetch_mode,
      return_lobs: self.return_lobs,
      oracle_nulls: self.oracle_nulls,
      stringify_fetches: self.stringify_fetches,
    }
  }
}

/// Настройки, влияющие на поведение одного выражения. Выражение получает их копию при создании
/// и может менять независимо от соединения.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatementOptions {
  /// Способ сообщения об ошибках.
  pub err_mode: ErrMode,
  /// Регистр имен колонок.
  pub case: Case,
  /// Форма строк по умолчанию.
  pub fetch_mode: FetchStyle,
  /// Возвращать содержимое больших объектов вместо их дескрипторов.
  pub return_lobs: bool,
  /// Преобразование `NULL`-ов.
  pub oracle_nulls: NullHandling,
  /// Превращать скалярные значения в строки.
  pub stringify_fetches: bool,
}
impl Default for StatementOptions {
  fn default() -> Self {
    Options::default().statement_options()
  }
}

//-------------------------------------------------------------------------------------------------
fn invalid(name: &str, value: String) -> Error {
  Error::InvalidOption { name: name.to_owned(), value: value }
}
fn parse<T: FromStr>(key: &str, value: &str) -> Result<T> {
  value.trim().parse().map_err(|_| invalid(key, value.to_owned()))
}
fn parse_bool(key: &str, value: &str) -> Result<bool> {
  match value.trim() {
    "1" | "true" | "on" | "yes" => Ok(true),
    "0" | "false" | "off" | "no" => Ok(false),
    _ => Err(invalid(key, value.to_owned())),
  }
}
fn parse_session_mode(key: &str, value: &str) -> Result<AuthMode> {
  match value.trim() {
    "default" => Ok(AuthMode::Default),
    "sysdba" => Ok(AuthMode::SysDba),
    "sysoper" => Ok(AuthMode::SysOper),
    "prelim_auth" => Ok(AuthMode::PrelimAuth),
    _ => Err(invalid(key, value.to_owned())),
  }
}
