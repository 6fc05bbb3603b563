//! Лексический разбор текста запроса: поиск именованных переменных и имени таблицы.
//!
//! Разбор намеренно поверхностный, это не парсер SQL. Строковые литералы (`'...'`), идентификаторы
//! в кавычках (`"..."`) и комментарии (`-- ...` и `/* ... */`) пропускаются целиком, поэтому
//! двоеточие внутри них не считается началом переменной.

/// Приводит имя переменной к ключу, по которому хранится связанный параметр: добавляет ведущее
/// двоеточие, если его нет, и переводит имя в верхний регистр. Oracle сравнивает имена переменных
/// без учета регистра.
pub fn normalize(name: &str) -> String {
  let name = name.trim();
  let mut key = String::with_capacity(name.len() + 1);
  if !name.starts_with(':') {
    key.push(':');
  }
  key.push_str(name);
  key.to_uppercase()
}

#[inline]
fn is_name_byte(c: u8) -> bool {
  c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c == b'#'
}

/// Находит все переменные вида `:name` в тексте запроса. Возвращает нормализованные имена
/// вместе со смещением в байтах их первого вхождения, в порядке появления в тексте.
pub fn placeholders(sql: &str) -> Vec<(String, usize)> {
  let bytes = sql.as_bytes();
  let mut result: Vec<(String, usize)> = Vec::new();
  let mut i = 0;
  while i < bytes.len() {
    match bytes[i] {
      q @ b'\'' | q @ b'"' => {
        i += 1;
        while i < bytes.len() && bytes[i] != q {
          i += 1;
        }
        i += 1;
      },
      b'-' if bytes.get(i + 1) == Some(&b'-') => {
        while i < bytes.len() && bytes[i] != b'\n' {
          i += 1;
        }
      },
      b'/' if bytes.get(i + 1) == Some(&b'*') => {
        i += 2;
        while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
          i += 1;
        }
        i += 2;
      },
      b':' => {
        let start = i;
        i += 1;
        while i < bytes.len() && is_name_byte(bytes[i]) {
          i += 1;
        }
        // Одиночное двоеточие или `:=`
        if i > start + 1 {
          let key = normalize(&sql[start..i]);
          if !result.iter().any(|&(ref k, _)| *k == key) {
            result.push((key, start));
          }
        }
      },
      _ => i += 1,
    }
  }
  result
}

/// Смещение первого вхождения переменной с указанным нормализованным именем, или `None`,
/// если в тексте запроса такой переменной нет.
pub fn find(sql: &str, key: &str) -> Option<usize> {
  placeholders(sql).into_iter().find(|&(ref k, _)| k == key).map(|(_, pos)| pos)
}

/// Имя таблицы из секции `FROM` запроса, без учета регистра ключевого слова. Возвращает пустую
/// строку, если секции нет или источником данных является подзапрос.
pub fn table_name(sql: &str) -> String {
  let upper = sql.to_ascii_uppercase();
  let table = match upper.find(" FROM ") {
    Some(idx) => sql[idx + 6..].trim(),
    None => return String::new(),
  };
  if table.contains('(') {
    return String::new();
  }
  match table.find(char::is_whitespace) {
    Some(end) => table[..end].to_owned(),
    None => table.to_owned(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keys_are_normalized() {
    assert_eq!(":DUMMY1", normalize("dummy1"));
    assert_eq!(":DUMMY1", normalize(":Dummy1"));
  }

  #[test]
  fn finds_placeholders_in_order() {
    let sql = "SELECT DUMMY FROM SYS.DUAL WHERE DUMMY LIKE :dummy1 OR DUMMY LIKE :dummy2";
    assert_eq!(vec![(":DUMMY1".to_owned(), 44), (":DUMMY2".to_owned(), 66)], placeholders(sql));
  }

  #[test]
  fn repeated_placeholder_keeps_first_position() {
    let sql = "SELECT :a, :b, :a FROM DUAL";
    assert_eq!(vec![(":A".to_owned(), 7), (":B".to_owned(), 11)], placeholders(sql));
  }

  #[test]
  fn skips_literals_and_comments() {
    let sql = "SELECT ':x', \":y\" -- :z\n FROM t /* :w */ WHERE a = :v";
    assert_eq!(vec![(":V".to_owned(), sql.find(":v").unwrap())], placeholders(sql));
    assert_eq!(None, find(sql, ":X"));
  }

  #[test]
  fn assignment_is_not_a_placeholder() {
    assert!(placeholders("BEGIN x := 1; END;").is_empty());
    assert_eq!(Some(19), find("BEGIN x := 1; y := :y; END;", ":Y"));
  }

  #[test]
  fn tables() {
    assert_eq!("SYS.DUAL", table_name("SELECT 'X' DUMMY FROM SYS.DUAL WHERE DUMMY LIKE '%'"));
    assert_eq!("SYS.DUAL", table_name("SELECT DUMMY, CAST(9.9 AS FLOAT) AS D_FLOAT FROM SYS.DUAL"));
    assert_eq!("dual", table_name("select 1 from dual"));
    assert_eq!("", table_name("SELECT 'X' DUMMY FROM (SELECT * FROM SYS.DUAL)"));
    assert_eq!("", table_name("SELECT SYSDATE"));
  }
}
