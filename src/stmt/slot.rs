//! Ячейки, через которые выражение читает значения связанных параметров и записывает значения
//! связанных колонок.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Result;
use crate::convert::{FromValue, ToValue, Value};

/// Разделяемая между клиентом и выражением ячейка со значением. Клоны ячейки ссылаются на одно и то же
/// значение, поэтому изменения, сделанные клиентом после связывания, видны выражению при следующем
/// выполнении, а значения, записанные выражением при извлечении строк, видны клиенту.
///
/// # Пример
/// ```
/// use oci_pdo::convert::Value;
/// use oci_pdo::stmt::Slot;
///
/// let slot = Slot::new(1);
/// let alias = slot.clone();
/// alias.set(2);
/// assert_eq!(Value::Int(2), slot.get());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Slot(Rc<RefCell<Value>>);
impl Slot {
  /// Создает ячейку с указанным начальным значением.
  pub fn new<T: ToValue>(value: T) -> Self {
    Slot(Rc::new(RefCell::new(value.to_value())))
  }
  /// Создает ячейку, содержащую `NULL`.
  #[inline]
  pub fn null() -> Self {
    Slot::default()
  }
  /// Возвращает копию текущего значения.
  #[inline]
  pub fn get(&self) -> Value {
    self.0.borrow().clone()
  }
  /// Возвращает текущее значение, преобразованное в тип Rust.
  pub fn get_as<T: FromValue>(&self) -> Result<T> {
    T::from_value(&self.0.borrow())
  }
  /// Заменяет значение в ячейке.
  #[inline]
  pub fn set<T: ToValue>(&self, value: T) {
    *self.0.borrow_mut() = value.to_value();
  }
}
