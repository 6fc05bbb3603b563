//! Поддержка колонок с датой и временем из ящика `chrono`. Драйвер отдает даты строками в формате
//! `NLS_DATE_FORMAT = 'YYYY-MM-DD'` и `NLS_TIMESTAMP_FORMAT = 'YYYY-MM-DD HH24:MI:SS.FF'`.

use ::chrono::{NaiveDate, NaiveDateTime};

use crate::Result;
use crate::error::Error;
use crate::types::Type;

use super::{FromValue, ToValue, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

impl FromValue for NaiveDate {
  fn from_value(value: &Value) -> Result<Self> {
    match *value {
      Value::Str(ref s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        // Колонка DATE в Oracle всегда содержит и время
        .or_else(|_| NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).map(|dt| dt.date()))
        .map_err(|_| Error::Conversion(Type::DAT)),
      ref v => Err(Error::Conversion(v.native_type())),
    }
  }
}
impl ToValue for NaiveDate {
  fn to_value(&self) -> Value {
    Value::Str(self.format(DATE_FORMAT).to_string())
  }
}

impl FromValue for NaiveDateTime {
  fn from_value(value: &Value) -> Result<Self> {
    match *value {
      Value::Str(ref s) => NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| Error::Conversion(Type::TIMESTAMP)),
      ref v => Err(Error::Conversion(v.native_type())),
    }
  }
}
impl ToValue for NaiveDateTime {
  fn to_value(&self) -> Value {
    Value::Str(self.format(TIMESTAMP_FORMAT).to_string())
  }
}
