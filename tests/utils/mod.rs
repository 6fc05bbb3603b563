#![allow(dead_code)]
//! Драйвер, хранящий заранее заданные результаты запросов в памяти, и журнал обращений к нему.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tracing::Level;

use oci_pdo::Connection;
use oci_pdo::convert::Value;
use oci_pdo::driver::{Column, Driver, ExecuteMode, NativeConnection, NativeStatement};
use oci_pdo::error::{DbError, Info};
use oci_pdo::lob::Lob;
use oci_pdo::options::Options;
use oci_pdo::params::ConnectParams;
use oci_pdo::types::{StatementType, Type};
use oci_pdo::version::Version;

type DbResult<T> = Result<T, DbError>;

pub const DSN: &str = "oci:database=//localhost:1521/XE;charset=AL32UTF8";

pub const DUAL: &str = "SELECT DUMMY FROM SYS.DUAL";
pub const DUAL_LIKE: &str = "SELECT 'X' DUMMY FROM SYS.DUAL WHERE DUMMY LIKE '%'";
pub const DUAL_PARAMS: &str = "SELECT DUMMY FROM SYS.DUAL WHERE DUMMY LIKE :dummy1 OR DUMMY LIKE :dummy2";
pub const DUAL_FLOAT: &str = "SELECT DUMMY, CAST(9.9 AS FLOAT) AS D_FLOAT FROM SYS.DUAL";
pub const DUAL_NESTED: &str = "SELECT 'X' DUMMY FROM (SELECT * FROM SYS.DUAL)";
pub const DUAL_INSERT: &str = "INSERT (DUMMY) INTO SYS.DUAL VALUES ('X')";
pub const PEOPLE: &str = "SELECT ID, NAME, NOTE FROM PEOPLE";
pub const PEOPLE_INSERT: &str = "INSERT INTO PEOPLE (ID, NAME) VALUES (:id, :name)";
pub const PEOPLE_UPDATE: &str = "UPDATE PEOPLE SET NAME = UPPER(NAME)";
pub const PEOPLE_CURRVAL: &str = "SELECT PEOPLE_SEQ.currval FROM dual";
pub const BROKEN: &str = "SELEC * FROM SYS.DUAL";
pub const BANNER: &str = "Oracle Database 11g Enterprise Edition Release 11.2.0.4.0 - 64bit Production";

/// Результат выполнения запроса.
#[derive(Clone, Debug)]
pub enum Outcome {
  Rows { columns: Vec<Column>, rows: Vec<Vec<Value>> },
  Affected(u64),
  Fail(isize, String),
}

/// Обращение к драйверу.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
  Connect(ConnectParams),
  Parse(String),
  Prefetch(u32),
  Bind { name: String, value: Value, ty: Type },
  Execute(ExecuteMode),
  Cancel,
  Commit,
  Rollback,
}

#[derive(Debug, Default)]
pub struct Db {
  outcomes: HashMap<String, Outcome>,
  parse_errors: HashMap<String, Info>,
  commit_error: Option<Info>,
  connect_error: Option<Info>,
  last_error: Option<Info>,
  events: Vec<Event>,
}
impl Db {
  fn fail<T>(&mut self, info: Info) -> DbResult<T> {
    self.last_error = Some(info.clone());
    Err(DbError::Fault(info))
  }
}

pub fn column(pos: usize, name: &str, type_: Type, size: u32, precision: i16, scale: i8) -> Column {
  Column { pos: pos, type_: type_, name: name.into(), size: size, precision: precision, scale: scale }
}
fn dummy() -> Column {
  column(0, "DUMMY", Type::AFC, 1, 0, 0)
}
fn x() -> Vec<Value> {
  vec![Value::Str("X".into())]
}

//-------------------------------------------------------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct MemoryDriver(Rc<RefCell<Db>>);
impl MemoryDriver {
  /// Драйвер с набором стандартных таблиц.
  pub fn new() -> Self {
    let driver = MemoryDriver::default();
    for sql in &[DUAL, DUAL_LIKE, DUAL_PARAMS, DUAL_NESTED] {
      driver.rows(sql, vec![dummy()], vec![x()]);
    }
    driver.rows(DUAL_FLOAT, vec![dummy(), column(1, "D_FLOAT", Type::NUM, 22, 126, -127)], vec![
      vec![Value::Str("X".into()), Value::Float(9.9)],
    ]);
    driver.rows(PEOPLE, vec![
      column(0, "ID", Type::NUM, 22, 10, 0),
      column(1, "NAME", Type::VCS, 40, 0, 0),
      column(2, "NOTE", Type::CLOB, 4000, 0, 0),
    ], vec![
      vec![Value::Int(1), Value::Str("Ann".into()), Value::Lob(Lob::clob("first"))],
      vec![Value::Int(2), Value::Str("Bob".into()), Value::Null],
      vec![Value::Int(3), Value::Str("".into()), Value::Null],
      vec![Value::Int(4), Value::Null, Value::Null],
    ]);
    driver.rows(PEOPLE_CURRVAL, vec![column(0, "CURRVAL", Type::NUM, 22, 0, -127)], vec![vec![Value::Int(42)]]);
    driver.script(DUAL_INSERT, Outcome::Affected(1));
    driver.script(PEOPLE_INSERT, Outcome::Affected(1));
    driver.script(PEOPLE_UPDATE, Outcome::Affected(4));
    driver.fail_parse(BROKEN, 900, "ORA-00900: invalid SQL statement");
    driver
  }
  pub fn script(&self, sql: &str, outcome: Outcome) {
    self.0.borrow_mut().outcomes.insert(sql.to_owned(), outcome);
  }
  pub fn rows(&self, sql: &str, columns: Vec<Column>, rows: Vec<Vec<Value>>) {
    self.script(sql, Outcome::Rows { columns: columns, rows: rows });
  }
  pub fn fail_parse(&self, sql: &str, code: isize, message: &str) {
    self.0.borrow_mut().parse_errors.insert(sql.to_owned(), Info::new(code, message));
  }
  pub fn fail_commit(&self, code: isize, message: &str) {
    self.0.borrow_mut().commit_error = Some(Info::new(code, message));
  }
  pub fn fail_connect(&self, code: isize, message: &str) {
    self.0.borrow_mut().connect_error = Some(Info::new(code, message));
  }
  pub fn events(&self) -> Vec<Event> {
    self.0.borrow().events.clone()
  }
  pub fn clear_events(&self) {
    self.0.borrow_mut().events.clear();
  }
  /// Режимы всех выполнений, в порядке их следования.
  pub fn executions(&self) -> Vec<ExecuteMode> {
    self.events().into_iter().filter_map(|e| match e {
      Event::Execute(mode) => Some(mode),
      _ => None,
    }).collect()
  }
  /// Связанные значения, в порядке связывания.
  pub fn binds(&self) -> Vec<(String, Value)> {
    self.events().into_iter().filter_map(|e| match e {
      Event::Bind { name, value, .. } => Some((name, value)),
      _ => None,
    }).collect()
  }
  pub fn count(&self, event: &Event) -> usize {
    self.events().iter().filter(|e| *e == event).count()
  }
}
impl Driver for MemoryDriver {
  fn connect(&self, params: &ConnectParams) -> DbResult<Box<dyn NativeConnection>> {
    let mut db = self.0.borrow_mut();
    db.events.push(Event::Connect(params.clone()));
    if let Some(info) = db.connect_error.clone() {
      return db.fail(info);
    }
    Ok(Box::new(MemoryConnection(self.0.clone())))
  }
}

pub fn connect(driver: &MemoryDriver) -> Connection {
  connect_with(driver, Options::default())
}
pub fn connect_with(driver: &MemoryDriver, options: Options) -> Connection {
  Connection::open(driver, DSN, "username", "password", options).expect("Can't connect to in-memory database")
}

//-------------------------------------------------------------------------------------------------
#[derive(Debug)]
struct MemoryConnection(Rc<RefCell<Db>>);
impl NativeConnection for MemoryConnection {
  fn parse(&self, sql: &str) -> DbResult<Box<dyn NativeStatement>> {
    let mut db = self.0.borrow_mut();
    db.events.push(Event::Parse(sql.to_owned()));
    if let Some(info) = db.parse_errors.get(sql).cloned() {
      return db.fail(info);
    }
    Ok(Box::new(MemoryStatement {
      db: self.0.clone(),
      sql: sql.to_owned(),
      columns: Vec::new(),
      rows: VecDeque::new(),
      row_count: 0,
      executed: false,
    }))
  }
  fn commit(&self) -> DbResult<()> {
    let mut db = self.0.borrow_mut();
    db.events.push(Event::Commit);
    match db.commit_error.take() {
      Some(info) => db.fail(info),
      None => Ok(()),
    }
  }
  fn rollback(&self) -> DbResult<()> {
    self.0.borrow_mut().events.push(Event::Rollback);
    Ok(())
  }
  fn last_error(&self) -> Option<Info> {
    self.0.borrow().last_error.clone()
  }
  fn client_version(&self) -> Version {
    Version::minor(12, 2)
  }
  fn server_version(&self) -> DbResult<Version> {
    Version::from_banner(BANNER).ok_or(DbError::Unknown(-1))
  }
}

#[derive(Debug)]
struct MemoryStatement {
  db: Rc<RefCell<Db>>,
  sql: String,
  columns: Vec<Column>,
  rows: VecDeque<Vec<Value>>,
  row_count: u64,
  executed: bool,
}
impl NativeStatement for MemoryStatement {
  fn statement_type(&self) -> StatementType {
    let keyword = self.sql.trim_start().split(|c: char| !c.is_ascii_alphabetic()).next().unwrap_or("");
    match keyword.to_ascii_uppercase().as_str() {
      "SELECT" => StatementType::SELECT,
      "UPDATE" => StatementType::UPDATE,
      "DELETE" => StatementType::DELETE,
      "INSERT" => StatementType::INSERT,
      "CREATE" => StatementType::CREATE,
      "DROP" => StatementType::DROP,
      "ALTER" => StatementType::ALTER,
      "BEGIN" => StatementType::BEGIN,
      "DECLARE" => StatementType::DECLARE,
      "MERGE" => StatementType::MERGE,
      _ => StatementType::UNKNOWN,
    }
  }
  fn bind_by_name(&mut self, name: &str, value: &Value, ty: Type, _: Option<usize>) -> DbResult<()> {
    self.db.borrow_mut().events.push(Event::Bind { name: name.to_owned(), value: value.clone(), ty: ty });
    Ok(())
  }
  fn execute(&mut self, mode: ExecuteMode) -> DbResult<()> {
    let mut db = self.db.borrow_mut();
    db.events.push(Event::Execute(mode));
    let outcome = db.outcomes.get(&self.sql).cloned()
      .unwrap_or_else(|| Outcome::Fail(942, "ORA-00942: table or view does not exist".into()));

    self.rows.clear();
    self.row_count = 0;
    match outcome {
      Outcome::Rows { columns, rows } => {
        self.columns = columns;
        if mode != ExecuteMode::DescribeOnly {
          self.rows = rows.into_iter().collect();
        }
      },
      Outcome::Affected(n) => {
        self.columns = Vec::new();
        self.row_count = n;
      },
      Outcome::Fail(code, message) => return db.fail(Info::new(code, message)),
    }
    self.executed = true;
    Ok(())
  }
  fn columns(&self) -> DbResult<Vec<Column>> {
    Ok(self.columns.clone())
  }
  fn fetch(&mut self) -> DbResult<Option<Vec<Value>>> {
    if !self.executed {
      return self.db.borrow_mut().fail(Info::new(1002, "ORA-01002: fetch out of sequence"));
    }
    let row = self.rows.pop_front();
    if row.is_some() {
      self.row_count += 1;
    }
    Ok(row)
  }
  fn row_count(&self) -> u64 {
    self.row_count
  }
  fn cancel(&mut self) -> DbResult<()> {
    self.db.borrow_mut().events.push(Event::Cancel);
    self.rows.clear();
    Ok(())
  }
  fn set_prefetch(&mut self, rows: u32) -> DbResult<()> {
    self.db.borrow_mut().events.push(Event::Prefetch(rows));
    Ok(())
  }
  fn debug_info(&self) -> String {
    format!("MemoryStatement {{ sql: {:?}, executed: {} }}", self.sql, self.executed)
  }
}

//-------------------------------------------------------------------------------------------------
/// Буфер, в который подписчик `tracing` пишет отформатированные события.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);
impl io::Write for LogBuffer {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().expect("Log buffer poisoned").extend_from_slice(buf);
    Ok(buf.len())
  }
  fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

/// Выполняет `f` и возвращает ее результат вместе с предупреждениями, выведенными в процессе.
pub fn warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
  let buffer = LogBuffer::default();
  let writer = buffer.clone();
  let subscriber = tracing_subscriber::fmt()
    .with_writer(move || writer.clone())
    .with_max_level(Level::WARN)
    .with_ansi(false)
    .without_time()
    .finish();
  let result = tracing::subscriber::with_default(subscriber, f);

  let bytes = buffer.0.lock().expect("Log buffer poisoned").clone();
  let text = String::from_utf8(bytes).expect("Log is not UTF-8");
  (result, text.lines().map(str::to_owned).collect())
}
