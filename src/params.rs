//! Содержит структуры, описывающие параметры подключения к базе данных, и разбор строки подключения.
//!
//! Строка подключения имеет вид `oci:database=<db>[;charset=<name>]`, где `<db>` это либо имя
//! сервиса на локальной машине, либо адрес вида `//host[:port]/service`. Схема и имена
//! нечувствительны к регистру.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;
use crate::types::AuthMode;

/// Порт, используемый, если в строке подключения он не указан.
pub const DEFAULT_PORT: u16 = 1521;
/// Кодировка клиента, используемая, если в строке подключения она не указана.
pub const DEFAULT_CHARSET: &str = "AL32UTF8";

/// Разобранная строка подключения.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dsn {
  /// Имя хоста или IPv4 адрес сервера базы данных.
  pub host: String,
  /// Порт, на котором слушает сервер.
  pub port: u16,
  /// Имя сервиса.
  pub service: String,
  /// Кодировка клиента.
  pub charset: String,
}
impl Dsn {
  /// Адрес базы в формате Easy Connect, `//host:port/service`.
  pub fn dblink(&self) -> String {
    format!("//{}:{}/{}", self.host, self.port, self.service)
  }
}
impl fmt::Display for Dsn {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "oci:database={};charset={}", self.dblink(), self.charset)
  }
}
impl FromStr for Dsn {
  type Err = Error;

  fn from_str(dsn: &str) -> Result<Self, Error> {
    parse(dsn).ok_or_else(|| Error::Dsn(dsn.to_owned()))
  }
}

/// Содержит учетные данные пользователя, которые должны использоваться для аутентификации в базе.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
  /// База будет проводить аутентификацию по паре пользователь/пароль.
  Rdbms {
    /// Имя пользователя, под которым установить соединение к базе данных
    username: String,
    /// Пароль пользователя, под которым установить соединение к базе данных
    password: String,
  },
  /// База будет проводить аутентификацию, используя внешние учетные данные.
  Ext,
}
impl Credentials {
  /// Пустое имя пользователя означает внешнюю аутентификацию.
  pub fn new(username: &str, password: &str) -> Self {
    if username.is_empty() {
      return Credentials::Ext;
    }
    Credentials::Rdbms { username: username.to_owned(), password: password.to_owned() }
  }
}

/// Параметры подключения к базе данных, передаваемые драйверу.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectParams {
  /// Адрес базы и указатель сервиса, к которому следует подключиться, `//host:port/service`.
  pub dblink: String,
  /// Кодировка клиента.
  pub charset: String,
  /// Учетные данные, используемые для логина в базу
  pub credentials: Credentials,
  /// Режим аутентификации, позволяющий задать дополнительные привелегии при подключении к базе данных.
  pub auth_mode: AuthMode,
  /// Использовать постоянное соединение, которое драйвер может переиспользовать между подключениями.
  pub persistent: bool,
  /// Таймаут вызовов к серверу, который драйвер устанавливает для сессии.
  pub timeout: Duration,
}

//-------------------------------------------------------------------------------------------------
/// Отрезает от начала строки префикс без учета регистра.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
  if s.len() >= prefix.len() && s.is_char_boundary(prefix.len()) && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
    return Some(&s[prefix.len()..]);
  }
  None
}
/// `[a-z_][a-z0-9_-]*`
fn is_name(s: &str) -> bool {
  let mut chars = s.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
/// Метка имени хоста: `[a-z]` или `[a-z][a-z0-9_-]*[a-z0-9]`
fn is_label(s: &str) -> bool {
  let bytes = s.as_bytes();
  match (bytes.first(), bytes.last()) {
    (Some(f), Some(l)) => {
      f.is_ascii_alphabetic()
        && l.is_ascii_alphanumeric()
        && bytes.iter().all(|c| c.is_ascii_alphanumeric() || *c == b'_' || *c == b'-')
    },
    _ => false,
  }
}
/// Октет IPv4 адреса, `0..=255` без ведущих нулей
fn is_octet(s: &str) -> bool {
  if s.is_empty() || s.len() > 3 || !s.bytes().all(|c| c.is_ascii_digit()) {
    return false;
  }
  if s.len() > 1 && s.starts_with('0') {
    return false;
  }
  s.parse::<u16>().map_or(false, |n| n <= 255)
}
fn is_host(s: &str) -> bool {
  let parts: Vec<&str> = s.split('.').collect();
  if parts.len() == 4 && parts.iter().all(|p| is_octet(p)) {
    return true;
  }
  parts.iter().all(|p| is_label(p))
}
/// `[a-z0-9_-]+`
fn is_charset(s: &str) -> bool {
  !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Разбирает `//host[:port]/service` или `service`.
fn parse_database(db: &str) -> Option<(String, u16, String)> {
  let rest = match db.starts_with("//") {
    false if is_name(db) => return Some(("localhost".to_owned(), DEFAULT_PORT, db.to_owned())),
    false => return None,
    true => &db[2..],
  };
  let slash = rest.find('/')?;
  let (addr, service) = (&rest[..slash], &rest[slash + 1..]);
  if !is_name(service) {
    return None;
  }
  let (host, port) = match addr.find(':') {
    Some(colon) => {
      let port = &addr[colon + 1..];
      if port.is_empty() || !port.bytes().all(|c| c.is_ascii_digit()) {
        return None;
      }
      (&addr[..colon], port.parse().ok()?)
    },
    None => (addr, DEFAULT_PORT),
  };
  if !is_host(host) {
    return None;
  }
  Some((host.to_owned(), port, service.to_owned()))
}

fn parse(dsn: &str) -> Option<Dsn> {
  let rest = strip_prefix_ci(dsn, "oci:")?;
  let rest = strip_prefix_ci(rest, "database=")?;

  let (database, tail) = match rest.find(';') {
    Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
    None => (rest, None),
  };
  let charset = match tail {
    // Допускается завершающая `;` без кодировки
    None | Some("") => DEFAULT_CHARSET.to_owned(),
    Some(tail) => {
      let charset = strip_prefix_ci(tail, "charset=")?;
      if !is_charset(charset) {
        return None;
      }
      charset.to_owned()
    },
  };
  let (host, port, service) = parse_database(database)?;
  Some(Dsn { host: host, port: port, service: service, charset: charset })
}
