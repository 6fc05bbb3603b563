//! Содержит типы для работы с большими объектами.
//!
//! Пока опция [`return_lobs`][1] выключена, значения колонок `CLOB` и `BLOB` возвращаются клиенту
//! не в виде строк, а в виде дескриптора [`Lob`][2], содержимое которого можно прочитать через
//! стандартный типаж [`io::Read`][3].
//!
//! [1]: ../options/struct.Options.html#structfield.return_lobs
//! [2]: struct.Lob.html
//! [3]: https://doc.rust-lang.org/std/io/trait.Read.html

use std::io;
use std::rc::Rc;
use std::str;

use crate::Result;
use crate::convert::Value;
use crate::error::Error;
use crate::types::Type;

/// Тип, представляющий размер в байтах.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct Bytes(pub u64);
/// Тип, представляющий размер в символах. Следует учитывать, что "символ" в понимании Oracle -- это
/// один юнит кодировки UTF-16, занимающий 2 байта. Таким образом, кодовые точки Юникода, представленные
/// [суррогатными парами][utf-16] в UTF-16, считаются, как 2 символа.
///
/// [utf-16]: https://ru.wikipedia.org/wiki/UTF-16#.D0.9F.D1.80.D0.B8.D0.BD.D1.86.D0.B8.D0.BF_.D0.BA.D0.BE.D0.B4.D0.B8.D1.80.D0.BE.D0.B2.D0.B0.D0.BD.D0.B8.D1.8F
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct Chars(pub u64);

/// Вид большого объекта.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum LobKind {
  /// Символьный объект, `CLOB`. Содержимое всегда в UTF-8.
  Clob,
  /// Двоичный объект, `BLOB`.
  Blob,
}
impl LobKind {
  /// Нативный тип, соответствующий данному виду объекта.
  #[inline]
  pub fn native_type(&self) -> Type {
    match *self {
      LobKind::Clob => Type::CLOB,
      LobKind::Blob => Type::BLOB,
    }
  }
}

//-------------------------------------------------------------------------------------------------
/// Дескриптор большого объекта, полученного из базы. Клонирование дескриптора не копирует содержимое.
#[derive(Debug, Clone, PartialEq)]
pub struct Lob {
  kind: LobKind,
  data: Rc<[u8]>,
}
impl Lob {
  /// Создает символьный объект с указанным содержимым.
  pub fn clob<S: Into<String>>(text: S) -> Self {
    Lob { kind: LobKind::Clob, data: text.into().into_bytes().into() }
  }
  /// Создает двоичный объект с указанным содержимым.
  pub fn blob<B: Into<Vec<u8>>>(bytes: B) -> Self {
    Lob { kind: LobKind::Blob, data: bytes.into().into() }
  }
  /// Вид объекта.
  #[inline]
  pub fn kind(&self) -> LobKind {
    self.kind
  }
  /// Получает количество байт, содержащихся в данном объекте.
  #[inline]
  pub fn len(&self) -> Bytes {
    Bytes(self.data.len() as u64)
  }
  /// Проверяет, что объект не содержит данных.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }
  /// Получает количество символов, содержащихся в символьном объекте, в понимании Oracle (юнитов UTF-16).
  /// Для двоичных объектов возвращает ошибку.
  pub fn char_len(&self) -> Result<Chars> {
    let text = self.as_str()?;
    Ok(Chars(text.encode_utf16().count() as u64))
  }
  /// Создает читателя, позволяющего последовательно прочитать содержимое объекта.
  #[inline]
  pub fn reader(&self) -> io::Cursor<&[u8]> {
    io::Cursor::new(&self.data[..])
  }
  /// Возвращает содержимое символьного объекта. Для двоичных объектов, а также при невалидном
  /// UTF-8, возвращает ошибку конвертации.
  pub fn as_str(&self) -> Result<&str> {
    match self.kind {
      LobKind::Clob => str::from_utf8(&self.data).map_err(|_| Error::Conversion(Type::CLOB)),
      LobKind::Blob => Err(Error::Conversion(Type::BLOB)),
    }
  }
  /// Возвращает сырое содержимое объекта.
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }
  /// Материализует содержимое объекта: `CLOB` превращается в строку, `BLOB` в массив байт.
  pub fn materialize(&self) -> Result<Value> {
    match self.kind {
      LobKind::Clob => self.as_str().map(|s| Value::Str(s.to_owned())),
      LobKind::Blob => Ok(Value::Bytes(self.data.to_vec())),
    }
  }
}
