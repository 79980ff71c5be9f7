//! Модуль обработки ошибок библиотеки.

use crate::bban::BbanEntryType;
use thiserror::Error;

/// Вид нарушения формата IBAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatViolation {
    /// Значение отсутствует.
    IbanNotNull,
    /// Пустая строка.
    IbanNotEmpty,
    /// Строка короче кода страны и контрольных цифр.
    IbanTooShort,
    /// Нарушена группировка по 4 символа.
    IbanFormatting,
    /// Код страны не состоит из двух букв.
    CountryCodeTwoLetters,
    /// Код страны содержит строчные буквы.
    CountryCodeUpperCaseLetters,
    /// Контрольных цифр не две.
    CheckDigitTwoDigits,
    /// Контрольные цифры содержат не цифры.
    CheckDigitOnlyDigits,
    /// Длина BBAN не совпадает со структурой страны.
    BbanLength,
    /// Не задано обязательное поле BBAN.
    BbanEntryMissing,
    /// Длина поля не совпадает с длиной в структуре.
    BbanEntryLength,
    /// В числовом поле встретился не цифровой символ.
    BbanOnlyDigits,
    /// В буквенном поле встретился символ, отличный от A-Z.
    BbanOnlyUpperCaseLetters,
    /// В буквенно-цифровом поле встретился недопустимый символ.
    BbanOnlyDigitsOrLetters,
}

/// Подробности нарушения формата.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormatError {
    /// Вид нарушения.
    pub violation: FormatViolation,
    /// Ожидаемое значение или длина.
    pub expected: Option<String>,
    /// Фактическое значение.
    pub actual: Option<String>,
    /// Поле BBAN, к которому относится нарушение.
    pub entry_type: Option<BbanEntryType>,
    /// Недопустимый символ.
    pub invalid_character: Option<char>,
    /// Позиция недопустимого символа в BBAN.
    pub position: Option<usize>,
    /// Текст сообщения.
    pub message: String,
}

impl FormatError {
    /// Создает ошибку формата с сообщением.
    pub fn new(violation: FormatViolation, message: impl Into<String>) -> Self {
        Self {
            violation,
            expected: None,
            actual: None,
            entry_type: None,
            invalid_character: None,
            position: None,
            message: message.into(),
        }
    }

    pub fn with_expected(mut self, expected: impl ToString) -> Self {
        self.expected = Some(expected.to_string());
        self
    }

    pub fn with_actual(mut self, actual: impl ToString) -> Self {
        self.actual = Some(actual.to_string());
        self
    }

    pub fn with_entry_type(mut self, entry_type: BbanEntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    /// Запоминает недопустимый символ и его позицию.
    pub fn with_character(mut self, character: char, position: usize) -> Self {
        self.invalid_character = Some(character);
        self.position = Some(position);
        self
    }
}

/// Категория ошибки, по которой вызывающий код выбирает реакцию.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Некорректный ввод.
    Format,
    /// Страна не поддерживает IBAN.
    UnsupportedCountry,
    /// Формат верен, но контрольная сумма нет.
    InvalidCheckDigit,
}

/// Основной тип ошибки библиотеки.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Неверный формат данных
    #[error("Неверный формат: {0}")]
    Format(#[from] FormatError),
    /// Страна не указана или не поддерживает IBAN
    #[error(
        "Страна не поддерживается: {}",
        .country.as_deref().unwrap_or("код страны не указан")
    )]
    UnsupportedCountry { country: Option<String> },
    /// Контрольные цифры не проходят проверку MOD-97
    #[error("Неверные контрольные цифры: ожидалось {expected}, получено {actual}")]
    InvalidCheckDigit { expected: String, actual: String },
}

impl Error {
    /// Возвращает категорию ошибки.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Format(_) => ErrorKind::Format,
            Error::UnsupportedCountry { .. } => ErrorKind::UnsupportedCountry,
            Error::InvalidCheckDigit { .. } => ErrorKind::InvalidCheckDigit,
        }
    }

    /// Подробности нарушения формата, если ошибка форматная.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            Error::Format(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn unsupported(country: impl Into<String>) -> Self {
        Error::UnsupportedCountry {
            country: Some(country.into()),
        }
    }
}

/// Тип Result с ошибкой библиотеки.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display_uses_message() {
        let err: Error = FormatError::new(FormatViolation::IbanNotEmpty, "IBAN пуст").into();
        assert_eq!(err.to_string(), "Неверный формат: IBAN пуст");
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_unsupported_country_display() {
        let missing = Error::UnsupportedCountry { country: None };
        assert!(missing.to_string().contains("код страны не указан"));

        let known = Error::unsupported("AM");
        assert!(known.to_string().contains("AM"));
        assert_eq!(known.kind(), ErrorKind::UnsupportedCountry);
        assert!(known.format_error().is_none());
    }

    #[test]
    fn test_format_error_context() {
        let err = FormatError::new(FormatViolation::BbanOnlyDigits, "bad")
            .with_entry_type(BbanEntryType::AccountNumber)
            .with_character('A', 5)
            .with_expected(11)
            .with_actual("A0234573201");

        assert_eq!(err.entry_type, Some(BbanEntryType::AccountNumber));
        assert_eq!(err.invalid_character, Some('A'));
        assert_eq!(err.position, Some(5));
        assert_eq!(err.expected.as_deref(), Some("11"));
        assert_eq!(err.actual.as_deref(), Some("A0234573201"));
    }
}
