//! Общие константы формата IBAN.

// =============================================================================
// Раскладка IBAN
// =============================================================================

/// Длина кода страны (ISO 3166-1 alpha-2).
pub const COUNTRY_CODE_LENGTH: usize = 2;
/// Длина контрольных цифр.
pub const CHECK_DIGIT_LENGTH: usize = 2;
/// Смещение BBAN от начала IBAN.
pub const BBAN_OFFSET: usize = COUNTRY_CODE_LENGTH + CHECK_DIGIT_LENGTH;

/// Заглушка контрольных цифр при их вычислении.
pub const DEFAULT_CHECK_DIGIT: &str = "00";

// =============================================================================
// MOD-97-10 (ISO 7064)
// =============================================================================

/// Модуль контрольной суммы.
pub const MOD: u32 = 97;
/// Остаток корректного IBAN.
pub const VALID_REMAINDER: u32 = 1;
/// Из этого значения вычитается остаток при расчете контрольных цифр.
pub const CHECK_DIGIT_BASE: u32 = 98;

// =============================================================================
// Печатная форма
// =============================================================================

/// Размер группы символов в печатной форме.
pub const GROUP_SIZE: usize = 4;
/// Разделитель групп.
pub const GROUP_SEPARATOR: char = ' ';
