//! # YPBank IBAN
//!
//! Библиотека для проверки, построения и канонического представления
//! международных номеров банковских счетов (IBAN, ISO 13616).
//!
//! ## Возможности
//!
//! - **Разбор** строки в [`Iban`] с проверкой структуры BBAN страны
//! - **Построение** IBAN из отдельных полей через [`IbanBuilder`]
//! - **MOD-97-10** (ISO 7064): расчет и проверка контрольных цифр
//! - **Печатная форма** с группами по 4 символа
//! - **Генерация** случайных корректных IBAN
//!
//! ## Пример использования
//!
//! ```rust
//! use ypbank_iban::{CountryCode, Iban};
//!
//! let iban = Iban::parse("AT611904300234573201")?;
//! assert_eq!(iban.country_code(), CountryCode::AT);
//! assert_eq!(iban.to_formatted_string(), "AT61 1904 3002 3457 3201");
//! # Ok::<(), ypbank_iban::Error>(())
//! ```

pub mod error;
pub mod types;
pub mod country;
pub mod bban;
pub mod checksum;
pub mod iban;
pub mod generator;

pub use bban::{
    iban_length, is_supported as is_supported_country, supported_countries, BbanCharacterType,
    BbanEntryType, BbanStructure, BbanStructureEntry,
};
pub use country::CountryCode;
pub use error::{Error, ErrorKind, FormatError, FormatViolation, Result};
pub use iban::{Iban, IbanBuilder};

/// Формы записи IBAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IbanFormat {
    /// Без пробелов: `AT611904300234573201`
    Compact,
    /// Группы по 4 символа: `AT61 1904 3002 3457 3201`
    Grouped,
}

impl std::str::FromStr for IbanFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" | "none" | "electronic" => Ok(IbanFormat::Compact),
            "grouped" | "print" | "default" => Ok(IbanFormat::Grouped),
            _ => Err(()),
        }
    }
}

impl IbanFormat {
    /// Парсит форму записи из строки.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Записывает IBAN в этой форме.
    pub fn format(self, iban: &Iban) -> String {
        match self {
            IbanFormat::Compact => iban.to_string(),
            IbanFormat::Grouped => iban.to_formatted_string(),
        }
    }
}

/// Разбирает IBAN в заданной форме записи.
pub fn parse_iban(input: &str, format: IbanFormat) -> Result<Iban> {
    match format {
        IbanFormat::Compact => Iban::parse(input),
        IbanFormat::Grouped => Iban::parse_formatted(input),
    }
}

/// Проверяет IBAN в компактной форме, не возвращая значения.
pub fn validate(input: &str) -> Result<()> {
    Iban::parse(input).map(|_| ())
}

/// Проверяет IBAN в компактной форме.
pub fn is_valid(input: &str) -> bool {
    validate(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iban_format_from_str() {
        assert_eq!(IbanFormat::parse("compact"), Some(IbanFormat::Compact));
        assert_eq!(IbanFormat::parse("NONE"), Some(IbanFormat::Compact));
        assert_eq!(IbanFormat::parse("Grouped"), Some(IbanFormat::Grouped));
        assert_eq!(IbanFormat::parse("print"), Some(IbanFormat::Grouped));
        assert_eq!(IbanFormat::parse("xml"), None);
    }

    #[test]
    fn test_parse_iban_dispatch() {
        let compact = parse_iban("AT611904300234573201", IbanFormat::Compact).unwrap();
        let grouped = parse_iban("AT61 1904 3002 3457 3201", IbanFormat::Grouped).unwrap();
        assert_eq!(compact, grouped);
        assert!(parse_iban("AT61 1904 3002 3457 3201", IbanFormat::Compact).is_err());

        assert_eq!(IbanFormat::Grouped.format(&compact), "AT61 1904 3002 3457 3201");
        assert_eq!(IbanFormat::Compact.format(&grouped), "AT611904300234573201");
    }

    #[test]
    fn test_validate() {
        assert!(validate("DE89370400440532013000").is_ok());
        assert!(is_valid("GB29NWBK60161331926819"));
        assert!(!is_valid("GB28NWBK60161331926819"));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_supported_country_helpers() {
        assert!(is_supported_country(CountryCode::NL));
        assert!(!is_supported_country(CountryCode::US));
        assert_eq!(iban_length(CountryCode::NL), Some(18));
        assert!(supported_countries().any(|c| c == CountryCode::XK));
    }
}
