//! Классификация кодов ошибок Oracle (`ORA-xxxxx` и `SQL-xxxxx`) в стандартные пятисимвольные
//! коды [SQLSTATE][1].
//!
//! Соответствие задается упорядоченной таблицей правил: точных значений и диапазонов (границы включаются).
//! Код проверяется правилами в порядке их объявления, выигрывает первое подходящее правило. Код, не
//! подошедший ни под одно правило, относится к классу [`GeneralError`][2].
//!
//! [1]: https://docs.oracle.com/cd/F49540_01/DOC/server.815/a58231/appd.htm
//! [2]: enum.SqlState.html#variant.GeneralError

use std::fmt;

/// Стандартный класс ошибки. Строковое представление класса можно получить методом [`code()`][1].
///
/// [1]: #method.code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SqlState {
  /// `00000`: successful completion
  SuccessfulCompletion,
  /// `02000`: no data
  NoData,
  /// `07008`: invalid descriptor count
  InvalidDescriptorCount,
  /// `08003`: connection does not exist
  ConnectionDoesNotExist,
  /// `0A000`: feature not supported
  FeatureNotSupported,
  /// `21000`: cardinality violation
  CardinalityViolation,
  /// `22001`: string data, right truncation
  StringDataRightTruncation,
  /// `22002`: null value, no indicator parameter
  IndicatorVariableNotSupplied,
  /// `22003`: numeric value out of range
  NumericValueOutOfRange,
  /// `22008`: datetime field overflow
  DatetimeFieldOverflow,
  /// `22012`: division by zero
  DivisionByZero,
  /// `22019`: invalid escape character
  InvalidEscapeCharacter,
  /// `22022`: indicator overflow
  IndicatorOverflow,
  /// `22023`: invalid parameter value
  InvalidParameterValue,
  /// `22024`: unterminated C string
  UnterminatedCString,
  /// `22025`: invalid escape sequence
  InvalidEscapeSequence,
  /// `23000`: integrity constraint violation
  IntegrityConstraintViolation,
  /// `24000`: invalid cursor state
  InvalidCursorState,
  /// `40000`: transaction rollback
  TransactionRollback,
  /// `42000`: syntax error or access rule violation
  SyntaxErrorOrAccessRuleViolation,
  /// `44000`: with check option violation
  WithCheckOptionViolation,
  /// `60000`: system errors
  SystemError,
  /// `61000`: resource error
  ResourceError,
  /// `62000`: multi-threaded server and detached process errors
  MultiThreadedServerError,
  /// `63000`: Oracle*XA and two-task interface errors
  XaAndTwoTaskInterfaceError,
  /// `64000`: control file, database file, and redo file errors; archival and media recovery errors
  ArchivalAndMediaRecoveryError,
  /// `65000`: PL/SQL errors
  PlSqlError,
  /// `66000`: SQL*Net driver errors
  SqlNetDriverError,
  /// `67000`: licensing errors
  LicensingError,
  /// `69000`: SQL*Connect errors
  SqlConnectError,
  /// `72000`: SQL execute phase errors
  SqlExecutePhaseError,
  /// `82100`: out of memory (could not allocate)
  OutOfMemory,
  /// `82101`: inconsistent cursor cache: unit cursor/global cursor mismatch
  InconsistentCursorCacheMismatch,
  /// `82102`: inconsistent cursor cache: no global cursor entry
  InconsistentCursorCacheNoEntry,
  /// `82103`: inconsistent cursor cache: out of range cursor cache reference
  InconsistentCursorCacheRefOutOfRange,
  /// `82104`: inconsistent host cache: no cursor cache available
  InconsistentHostCacheNotAvailable,
  /// `82105`: inconsistent cursor cache: global cursor not found
  InconsistentCursorCacheNotFound,
  /// `82106`: inconsistent cursor cache: invalid Oracle cursor number
  InconsistentCursorCacheInvalidNumber,
  /// `82107`: program too old for runtime library
  ProgramTooOld,
  /// `82108`: invalid descriptor passed to runtime library
  InvalidDescriptorPassed,
  /// `82109`: inconsistent host cache: out of range SIT reference
  InconsistentHostCacheRefOutOfRange,
  /// `82110`: inconsistent host cache: invalid SQL type
  InconsistentHostCacheInvalidEntryType,
  /// `82111`: heap consistency error
  HeapConsistencyError,
  /// `82112`: unable to open message file
  UnableToOpenMessageFile,
  /// `82113`: code generation internal consistency failed
  CodeGenerationInternalConsistencyFailed,
  /// `82114`: reentrant code generator gave invalid context
  ReentrantCodeGeneratorGaveInvalidContext,
  /// `82115`: invalid hstdef argument
  InvalidHstdefArgument,
  /// `82116`: first and second arguments to sqlrcn both null
  FirstAndSecondArgsToSqlrcnBothNull,
  /// `82117`: invalid OPEN or PREPARE for this connection
  InvalidOpenOrPrepare,
  /// `82118`: application context not found
  ApplicationContextNotFound,
  /// `82119`: connect error; can't get error text
  ConnectionErrorNoErrorText,
  /// `82120`: precompiler/SQLLIB version mismatch
  PrecompilerVersionMismatch,
  /// `82121`: FETCHed number of bytes is odd
  FetchedNumberOfBytesIsOdd,
  /// `82122`: EXEC TOOLS interface is not available
  ExecToolsInterfaceNotAvailable,
  /// `90000`: debug events
  DebugEvents,
  /// `HY000`: general error, все коды, не попавшие ни в один другой класс
  GeneralError,
}
impl SqlState {
  /// Возвращает пятисимвольный код класса.
  pub fn code(&self) -> &'static str {
    use self::SqlState::*;

    match *self {
      SuccessfulCompletion => "00000",
      NoData => "02000",
      InvalidDescriptorCount => "07008",
      ConnectionDoesNotExist => "08003",
      FeatureNotSupported => "0A000",
      CardinalityViolation => "21000",
      StringDataRightTruncation => "22001",
      IndicatorVariableNotSupplied => "22002",
      NumericValueOutOfRange => "22003",
      DatetimeFieldOverflow => "22008",
      DivisionByZero => "22012",
      InvalidEscapeCharacter => "22019",
      IndicatorOverflow => "22022",
      InvalidParameterValue => "22023",
      UnterminatedCString => "22024",
      InvalidEscapeSequence => "22025",
      IntegrityConstraintViolation => "23000",
      InvalidCursorState => "24000",
      TransactionRollback => "40000",
      SyntaxErrorOrAccessRuleViolation => "42000",
      WithCheckOptionViolation => "44000",
      SystemError => "60000",
      ResourceError => "61000",
      MultiThreadedServerError => "62000",
      XaAndTwoTaskInterfaceError => "63000",
      ArchivalAndMediaRecoveryError => "64000",
      PlSqlError => "65000",
      SqlNetDriverError => "66000",
      LicensingError => "67000",
      SqlConnectError => "69000",
      SqlExecutePhaseError => "72000",
      OutOfMemory => "82100",
      InconsistentCursorCacheMismatch => "82101",
      InconsistentCursorCacheNoEntry => "82102",
      InconsistentCursorCacheRefOutOfRange => "82103",
      InconsistentHostCacheNotAvailable => "82104",
      InconsistentCursorCacheNotFound => "82105",
      InconsistentCursorCacheInvalidNumber => "82106",
      ProgramTooOld => "82107",
      InvalidDescriptorPassed => "82108",
      InconsistentHostCacheRefOutOfRange => "82109",
      InconsistentHostCacheInvalidEntryType => "82110",
      HeapConsistencyError => "82111",
      UnableToOpenMessageFile => "82112",
      CodeGenerationInternalConsistencyFailed => "82113",
      ReentrantCodeGeneratorGaveInvalidContext => "82114",
      InvalidHstdefArgument => "82115",
      FirstAndSecondArgsToSqlrcnBothNull => "82116",
      InvalidOpenOrPrepare => "82117",
      ApplicationContextNotFound => "82118",
      ConnectionErrorNoErrorText => "82119",
      PrecompilerVersionMismatch => "82120",
      FetchedNumberOfBytesIsOdd => "82121",
      ExecToolsInterfaceNotAvailable => "82122",
      DebugEvents => "90000",
      GeneralError => "HY000",
    }
  }
  /// Возвращает `true` для класса, означающего отсутствие ошибки.
  #[inline]
  pub fn is_success(&self) -> bool {
    *self == SqlState::SuccessfulCompletion
  }
}
impl Default for SqlState {
  fn default() -> Self { SqlState::SuccessfulCompletion }
}
impl fmt::Display for SqlState {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.code())
  }
}

//-------------------------------------------------------------------------------------------------
/// Условие одного правила классификации.
#[derive(Clone, Copy, Debug)]
enum Rule {
  /// Код в точности равен значению.
  Is(isize),
  /// Код попадает в диапазон, обе границы включаются.
  Range(isize, isize),
}
impl Rule {
  #[inline]
  fn matches(&self, code: isize) -> bool {
    match *self {
      Rule::Is(v) => code == v,
      Rule::Range(lo, hi) => lo <= code && code <= hi,
    }
  }
}

use self::Rule::{Is, Range};
use self::SqlState::*;

/// Упорядоченная таблица правил. Условия внутри одной записи объединяются по ИЛИ.
/// Порядок записей значим: диапазоны исполнительной фазы перекрываются с более ранними точными кодами.
static RULES: &[(&[Rule], SqlState)] = &[
  (&[Is(0)], SuccessfulCompletion),
  (&[Is(1095), Is(1403)], NoData),
  (&[Is(2126)], InvalidDescriptorCount),
  (&[Is(2121)], ConnectionDoesNotExist),
  (&[Range(3000, 3099)], FeatureNotSupported),
  (&[Is(1427), Is(2112)], CardinalityViolation),
  (&[Is(1401), Is(1406)], StringDataRightTruncation),
  (&[Is(1405), Is(2124)], IndicatorVariableNotSupplied),
  (&[Is(1426), Is(1438), Is(1455), Is(1457)], NumericValueOutOfRange),
  (&[Range(1800, 1899)], DatetimeFieldOverflow),
  (&[Is(1476)], DivisionByZero),
  (&[Is(911), Is(1425)], InvalidEscapeCharacter),
  (&[Is(1411)], IndicatorOverflow),
  (&[Is(1025), Is(1488), Range(4000, 4019)], InvalidParameterValue),
  (&[Range(1479, 1480)], UnterminatedCString),
  (&[Is(1424)], InvalidEscapeSequence),
  (&[Is(1), Range(2290, 2299)], IntegrityConstraintViolation),
  (&[
    Range(1001, 1003), Is(1410), Is(8006),
    Is(2114), Is(2117), Is(2118), Is(2122),
  ], InvalidCursorState),
  (&[Is(2091), Is(2092)], TransactionRollback),
  (&[
    Is(22), Is(251), Range(900, 999), Is(1031),
    Range(1490, 1493), Range(1700, 1799), Range(1900, 2099), Range(2140, 2289),
    Range(2420, 2424), Range(2450, 2499), Range(3276, 3299), Range(4040, 4059),
    Range(4070, 4099),
  ], SyntaxErrorOrAccessRuleViolation),
  (&[Is(1402)], WithCheckOptionViolation),
  (&[
    Range(370, 429), Range(600, 899), Range(6430, 6449), Range(7200, 7999),
    Range(9700, 9999),
  ], SystemError),
  (&[Range(18, 35), Range(50, 68), Range(2376, 2399), Range(4020, 4039)], ResourceError),
  (&[Range(100, 120), Range(440, 569)], MultiThreadedServerError),
  (&[
    Range(150, 159), Is(2128), Range(2700, 2899), Range(3100, 3199),
    Range(6200, 6249),
  ], XaAndTwoTaskInterfaceError),
  (&[Range(200, 369), Range(1100, 1250)], ArchivalAndMediaRecoveryError),
  (&[Range(6500, 6599)], PlSqlError),
  (&[
    Range(6000, 6149), Range(6250, 6429), Range(6600, 6999), Range(12100, 12299),
    Range(12500, 12599),
  ], SqlNetDriverError),
  (&[Range(430, 439)], LicensingError),
  (&[Range(570, 599), Range(7000, 7199)], SqlConnectError),
  (&[
    Range(1000, 1099), Range(1400, 1489), Range(1495, 1499), Range(1500, 1699),
    Range(2400, 2419), Range(2425, 2449), Range(4060, 4069), Range(8000, 8190),
    Range(12000, 12019), Range(12300, 12499), Range(12700, 21999),
  ], SqlExecutePhaseError),
  (&[Is(2100)], OutOfMemory),
  (&[Is(2101)], InconsistentCursorCacheMismatch),
  (&[Is(2102)], InconsistentCursorCacheNoEntry),
  (&[Is(2103)], InconsistentCursorCacheRefOutOfRange),
  (&[Is(2104)], InconsistentHostCacheNotAvailable),
  (&[Is(2105)], InconsistentCursorCacheNotFound),
  (&[Is(2106)], InconsistentCursorCacheInvalidNumber),
  (&[Is(2107)], ProgramTooOld),
  (&[Is(2108)], InvalidDescriptorPassed),
  (&[Is(2109)], InconsistentHostCacheRefOutOfRange),
  (&[Is(2110)], InconsistentHostCacheInvalidEntryType),
  (&[Is(2111)], HeapConsistencyError),
  (&[Is(2113)], UnableToOpenMessageFile),
  (&[Is(2115)], CodeGenerationInternalConsistencyFailed),
  (&[Is(2116)], ReentrantCodeGeneratorGaveInvalidContext),
  (&[Is(2119)], InvalidHstdefArgument),
  (&[Is(2120)], FirstAndSecondArgsToSqlrcnBothNull),
  // Недостижимо: 2122 уже отнесен к InvalidCursorState
  (&[Is(2122)], InvalidOpenOrPrepare),
  (&[Is(2123)], ApplicationContextNotFound),
  (&[Is(2125)], ConnectionErrorNoErrorText),
  (&[Is(2127)], PrecompilerVersionMismatch),
  (&[Is(2129)], FetchedNumberOfBytesIsOdd),
  (&[Is(2130)], ExecToolsInterfaceNotAvailable),
  (&[Range(10000, 10999)], DebugEvents),
];

/// Определяет стандартный класс для нативного кода ошибки Oracle. Функция тотальна и детерминирована:
/// любой код, включая отрицательные, отображается ровно в один класс, а коды, не описанные ни одним
/// правилом, отображаются в [`SqlState::GeneralError`][1].
///
/// # Пример
/// ```
/// use oci_pdo::sqlstate::{classify, SqlState};
///
/// assert_eq!(SqlState::SyntaxErrorOrAccessRuleViolation, classify(942));
/// assert_eq!("22008", classify(1800).code());
/// assert_eq!("HY000", classify(99999).code());
/// ```
///
/// [1]: enum.SqlState.html#variant.GeneralError
pub fn classify(code: isize) -> SqlState {
  RULES.iter()
       .find(|&&(rules, _)| rules.iter().any(|r| r.matches(code)))
       .map_or(GeneralError, |&(_, state)| state)
}
