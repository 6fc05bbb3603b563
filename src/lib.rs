//! Обобщенный интерфейс доступа к базам данных поверх Oracle Call Interface
//! -----------------------------------------------------------------------
//! Библиотека предоставляет клиентскому коду привычную модель работы с базой данных: подготовка
//! выражений, связывание параметров, извлечение строк в разных формах и управление транзакциями.
//! Нативные вызовы (разбор, связывание, выполнение, извлечение, описание колонок, отмена курсора,
//! фиксация и откат) выполняет драйвер, реализующий типажи из модуля [`driver`](driver/index.html).
//!
//! Все ошибки драйвера перед тем, как попасть к клиенту, относятся к одному из стандартных
//! классов SQLSTATE (см. модуль [`sqlstate`](sqlstate/index.html)).
//!
//! # Пример использования
//! ```rust,no_run
//! use oci_pdo::Connection;
//! use oci_pdo::driver::Driver;
//! use oci_pdo::options::Options;
//! use oci_pdo::stmt::{FetchStyle, Slot};
//! use oci_pdo::types::ParamType;
//!
//! fn dump(driver: &dyn Driver) -> oci_pdo::Result<()> {
//!   // Строка подключения: сервис XE на локальном сервере, кодировка по умолчанию
//!   let conn = Connection::open(driver, "oci:database=//localhost:1521/XE", "scott", "tiger", Options::default())?;
//!
//!   if let Some(mut stmt) = conn.prepare("SELECT DUMMY FROM SYS.DUAL WHERE DUMMY LIKE :dummy")? {
//!     let pattern = Slot::new("X");
//!     stmt.bind_param("dummy", &pattern, ParamType::Str, None)?;
//!     stmt.execute()?;
//!
//!     while let Some(row) = stmt.fetch(FetchStyle::Assoc)? {
//!       let dummy: String = row.get("DUMMY")?;
//!       println!("dummy: {}", dummy);
//!     }
//!   }
//!   Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod driver;
pub mod error;
pub mod lob;
pub mod options;
pub mod params;
pub mod sqlstate;
pub mod stmt;
pub mod types;
pub mod version;

/// Тип результата, возвращаемый всеми функциями библиотеки, которые могут привести к ошибке.
/// Библиотека никогда не генерирует панику, всегда возвращая ошибочный результат в виде ошибки.
pub type Result<T> = std::result::Result<T, error::Error>;
/// Тип результата, возвращаемый нативными функциями драйвера.
pub(crate) type DbResult<T> = std::result::Result<T, error::DbError>;

use std::cell::Cell;

use tracing::{debug, warn};

use crate::convert::Value;
use crate::driver::{Driver, ExecuteMode, NativeConnection};
use crate::error::{Error, ErrorInfo};
use crate::options::Options;
use crate::params::{ConnectParams, Credentials, Dsn};
use crate::sqlstate::SqlState;
use crate::stmt::Statement;
use crate::types::ParamType;
use crate::version::Version;

/// Имена драйверов, через которые библиотека умеет работать с базой.
const DRIVERS: &[&str] = &["oci"];

//-------------------------------------------------------------------------------------------------
/// Представляет соединение к базе данных, с определенным пользователем и паролем.
///
/// Соединение отслеживает состояние транзакции. Пока явная транзакция не начата и включена
/// автоматическая фиксация, каждое успешно выполненное выражение фиксируется сразу. Вызов
/// [`begin_transaction()`](#method.begin_transaction) откладывает фиксацию до вызова
/// [`commit()`](#method.commit) или [`rollback()`](#method.rollback). Если соединение открыто с
/// выключенной автоматической фиксацией, оно всегда находится в неявной транзакции, которую
/// завершают те же методы.
#[derive(Debug)]
pub struct Connection {
  /// Нативное соединение драйвера
  native: Box<dyn NativeConnection>,
  /// Настройки, с которыми было открыто соединение
  options: Options,
  autocommit: Cell<bool>,
  /// Открыта ли транзакция, явная или неявная
  in_transaction: Cell<bool>,
}
impl Connection {
  /// Осуществляет подключение к базе данных.
  ///
  /// # Параметры
  /// - `driver`:
  ///   Драйвер, через который устанавливается соединение.
  /// - `dsn`:
  ///   Строка подключения вида `oci:database=<db>[;charset=<name>]`. Базой может быть имя сервиса
  ///   на локальном сервере или адрес `//host[:port]/service`.
  /// - `username`, `password`:
  ///   Учетные данные. Пустое имя пользователя означает внешнюю аутентификацию.
  /// - `options`:
  ///   Настройки соединения.
  ///
  /// # Ошибки
  /// Некорректные настройки и строка подключения приводят к ошибкам [`InvalidOption`][1] и [`Dsn`][2],
  /// отказ драйвера в подключении к ошибке [`Connect`][3].
  ///
  /// [1]: error/enum.Error.html#variant.InvalidOption
  /// [2]: error/enum.Error.html#variant.Dsn
  /// [3]: error/enum.Error.html#variant.Connect
  pub fn open(driver: &dyn Driver, dsn: &str, username: &str, password: &str, options: Options) -> Result<Self> {
    options.validate()?;
    let dsn: Dsn = dsn.parse()?;
    let params = ConnectParams {
      dblink: dsn.dblink(),
      charset: dsn.charset.clone(),
      credentials: Credentials::new(username, password),
      auth_mode: options.session_mode,
      persistent: options.persistent,
      timeout: options.timeout,
    };
    debug!(%dsn, persistent = options.persistent, "connect");

    let native = driver.connect(&params).map_err(|e| Error::Connect(e.info()))?;
    Ok(Connection {
      native: native,
      autocommit: Cell::new(options.autocommit),
      in_transaction: Cell::new(!options.autocommit),
      options: options,
    })
  }
  #[inline]
  pub(crate) fn native(&self) -> &dyn NativeConnection {
    &*self.native
  }
  /// Режим выполнения выражений при текущем состоянии транзакции.
  pub(crate) fn commit_mode(&self) -> ExecuteMode {
    if self.autocommit.get() && !self.in_transaction.get() {
      ExecuteMode::CommitOnSuccess
    } else {
      ExecuteMode::Default
    }
  }
  /// Настройки, с которыми было открыто соединение.
  #[inline]
  pub fn options(&self) -> &Options {
    &self.options
  }

  //-----------------------------------------------------------------------------------------------
  /// Подготавливает выражение для выполнения.
  ///
  /// Если драйвер не смог разобрать текст запроса, возвращает `Ok(None)` или ошибку, в зависимости
  /// от режима сообщения об ошибках. Описание ошибки доступно через [`error_info()`](#method.error_info).
  pub fn prepare(&self, sql: &str) -> Result<Option<Statement>> {
    match Statement::new(self, sql) {
      Ok(stmt) => Ok(Some(stmt)),
      Err(e) => self.options.err_mode.dispatch(e.info(), None),
    }
  }
  /// Подготавливает и сразу выполняет выражение. Возвращает `Ok(None)`, если подготовить или
  /// выполнить выражение не удалось.
  pub fn query(&self, sql: &str) -> Result<Option<Statement>> {
    let mut stmt = match self.prepare(sql)? {
      Some(stmt) => stmt,
      None => return Ok(None),
    };
    if stmt.execute()? {
      return Ok(Some(stmt));
    }
    Ok(None)
  }
  /// Выполняет выражение, не возвращающее строк, и возвращает количество затронутых им строк.
  /// Для запросов, текст которых начинается с `SELECT` (с учетом регистра), а также при неудачной
  /// подготовке или выполнении возвращает `Ok(None)`.
  pub fn exec(&self, sql: &str) -> Result<Option<u64>> {
    if sql.starts_with("SELECT") {
      return Ok(None);
    }
    Ok(self.query(sql)?.map(|stmt| stmt.row_count()))
  }

  //-----------------------------------------------------------------------------------------------
  /// Начинает явную транзакцию: до вызова [`commit()`](#method.commit) или
  /// [`rollback()`](#method.rollback) изменения не фиксируются. Если транзакция уже начата,
  /// возвращает `Ok(false)`. Соединение, открытое с выключенной автоматической фиксацией, всегда
  /// находится в транзакции, поэтому для него метод также возвращает `Ok(false)`.
  pub fn begin_transaction(&self) -> Result<bool> {
    if self.in_transaction.get() {
      return Ok(false);
    }
    debug!("begin transaction");
    self.in_transaction.set(true);
    self.autocommit.set(false);
    Ok(true)
  }
  /// Завершает транзакцию. Даже если драйвер вернул ошибку, соединение возвращается в режим,
  /// заданный при открытии: без транзакции с автоматической фиксацией или в новой неявной
  /// транзакции, если автоматическая фиксация была выключена.
  fn finish<F>(&self, action: &'static str, f: F) -> Result<bool>
    where F: FnOnce(&dyn NativeConnection) -> DbResult<()>
  {
    if !self.in_transaction.get() {
      return Err(Error::NoTransaction);
    }
    debug!(action, "finish transaction");
    let result = f(&*self.native);
    self.autocommit.set(self.options.autocommit);
    self.in_transaction.set(!self.options.autocommit);

    match result {
      Ok(()) => Ok(true),
      Err(e) => {
        let info = e.info();
        warn!(action, code = info.code, state = %info.sql_state(), "{}", info.message);
        Ok(false)
      },
    }
  }
  /// Фиксирует текущую транзакцию. Если транзакция не была начата, возвращает ошибку
  /// [`NoTransaction`](error/enum.Error.html#variant.NoTransaction). Если драйвер не смог
  /// зафиксировать изменения, возвращает `Ok(false)`.
  pub fn commit(&self) -> Result<bool> {
    self.finish("commit", |c| c.commit())
  }
  /// Откатывает текущую транзакцию. Ошибки аналогичны [`commit()`](#method.commit).
  pub fn rollback(&self) -> Result<bool> {
    self.finish("rollback", |c| c.rollback())
  }
  /// Проверяет, открыта ли транзакция: явная или неявная при выключенной автоматической фиксации.
  #[inline]
  pub fn in_transaction(&self) -> bool {
    self.in_transaction.get()
  }
  /// Включена ли в данный момент автоматическая фиксация.
  #[inline]
  pub fn autocommit(&self) -> bool {
    self.autocommit.get()
  }

  //-----------------------------------------------------------------------------------------------
  /// Класс последней ошибки соединения или `None`, если ошибок не было.
  pub fn error_code(&self) -> Option<SqlState> {
    self.native.last_error().map(|info| info.sql_state())
  }
  /// Полное описание последней ошибки соединения.
  pub fn error_info(&self) -> ErrorInfo {
    self.native.last_error().as_ref().into()
  }
  /// Превращает значение в строковый литерал SQL. Для строковых параметров экранированные обратной
  /// косой чертой кавычки заменяются обычными, после чего все одинарные кавычки удваиваются.
  /// Значения остальных типов только заключаются в кавычки. Для `NULL` и больших объектов
  /// возвращает `None`.
  ///
  /// # Пример
  /// ```
  /// # use oci_pdo::convert::Value;
  /// # use oci_pdo::types::ParamType;
  /// assert_eq!(Some("'Naughty '' string'".to_owned()), oci_pdo::Connection::quote_literal(&Value::Str("Naughty \\' string".into()), ParamType::Str));
  /// ```
  pub fn quote(&self, value: &Value, ty: ParamType) -> Option<String> {
    Self::quote_literal(value, ty)
  }
  /// То же, что и [`quote()`](#method.quote), но без соединения.
  pub fn quote_literal(value: &Value, ty: ParamType) -> Option<String> {
    if !value.is_scalar() {
      return None;
    }
    let text = value.to_text()?;
    if ty != ParamType::Str {
      return Some(format!("'{}'", text));
    }
    Some(format!("'{}'", text.replace("\\'", "'").replace('\'', "''")))
  }
  /// Текущее значение последовательности в данной сессии, `SELECT <sequence>.currval FROM dual`.
  /// Возвращает `Ok(None)`, если значение получить не удалось.
  pub fn last_insert_id(&self, sequence: &str) -> Result<Option<Value>> {
    let sql = format!("SELECT {}.currval FROM dual", sequence);
    match self.query(&sql)? {
      Some(mut stmt) => stmt.fetch_column(0),
      None => Ok(None),
    }
  }
  /// Имена драйверов, через которые библиотека умеет работать с базой.
  #[inline]
  pub fn available_drivers() -> &'static [&'static str] {
    DRIVERS
  }
  /// Версия клиентской библиотеки драйвера.
  #[inline]
  pub fn client_version(&self) -> Version {
    self.native.client_version()
  }
  /// Версия сервера, к которому установлено соединение.
  pub fn server_version(&self) -> Result<Version> {
    self.native.server_version().map_err(Into::into)
  }
}
