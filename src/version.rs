//! Версии клиентской библиотеки драйвера и сервера базы данных.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Ошибка разбора строкового представления версии.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseVersionError {
  /// Часть версии с указанным номером (нумерация с 0) не является неотрицательным целым числом.
  #[error("Part {0} of version is not a number: {1}")]
  Part(u8, ParseIntError),
  /// Версия состоит более чем из пяти частей.
  #[error("Version contains more than 5 parts")]
  Count,
}

/// Версия Oracle из пяти частей, `major.minor.update.patch.port_update`. Версии сравниваются
/// покомпонентно, начиная со старшей части.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
  /// Номер релиза, `12` для `12.2.0.1.0`.
  pub major: i32,
  /// Номер выпуска внутри релиза, `2` для `12.2.0.1.0`.
  pub minor: i32,
  /// Номер обновления.
  pub update: i32,
  /// Номер установленного исправления.
  pub patch: i32,
  /// Номер исправления, специфичного для платформы.
  pub port_update: i32,
}
impl Version {
  /// Версия `major.minor.0.0.0`.
  #[inline]
  pub fn minor(major: i32, minor: i32) -> Self {
    Self::patch(major, minor, 0, 0)
  }
  /// Версия `major.minor.update.patch.0`.
  #[inline]
  pub fn patch(major: i32, minor: i32, update: i32, patch: i32) -> Self {
    Version { major, minor, update, patch, port_update: 0 }
  }
  /// Извлекает версию из баннера сервера, например
  /// `Oracle Database 11g Express Edition Release 11.2.0.2.0 - 64bit Production`.
  /// Используется первое слово баннера, которое разбирается как версия из двух и более частей.
  pub fn from_banner(banner: &str) -> Option<Self> {
    banner.split_whitespace()
      .filter(|word| word.contains('.'))
      .filter_map(|word| word.parse().ok())
      .next()
  }
}
impl fmt::Display for Version {
  /// Все пять частей через точку. Результат разбирается обратно через `FromStr`.
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}.{}.{}.{}.{}", self.major, self.minor, self.update, self.patch, self.port_update)
  }
}
impl FromStr for Version {
  type Err = ParseVersionError;

  /// Принимает от одной до пяти частей, отсутствующие части считаются равными `0`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parts = [0i32; 5];
    let mut count = 0;
    for part in s.split('.') {
      let slot = parts.get_mut(count).ok_or(ParseVersionError::Count)?;
      *slot = part.parse().map_err(|e| ParseVersionError::Part(count as u8, e))?;
      count += 1;
    }
    let [major, minor, update, patch, port_update] = parts;
    Ok(Version { major, minor, update, patch, port_update })
  }
}
