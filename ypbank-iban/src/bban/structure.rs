//! Структура BBAN: упорядоченный набор полей фиксированной длины.

use std::fmt;
use std::ops::Range;

use crate::error::{FormatError, FormatViolation, Result};

/// Смысловая роль поля BBAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BbanEntryType {
    BankCode,
    BranchCode,
    NationalCheckDigit,
    AccountNumber,
    AccountType,
    OwnerAccountNumber,
    IdentificationNumber,
}

impl BbanEntryType {
    /// Все виды полей.
    pub const ALL: [BbanEntryType; 7] = [
        BbanEntryType::BankCode,
        BbanEntryType::BranchCode,
        BbanEntryType::NationalCheckDigit,
        BbanEntryType::AccountNumber,
        BbanEntryType::AccountType,
        BbanEntryType::OwnerAccountNumber,
        BbanEntryType::IdentificationNumber,
    ];

    /// Человекочитаемое название поля.
    pub fn description(self) -> &'static str {
        match self {
            BbanEntryType::BankCode => "код банка",
            BbanEntryType::BranchCode => "код отделения",
            BbanEntryType::NationalCheckDigit => "национальный контрольный разряд",
            BbanEntryType::AccountNumber => "номер счета",
            BbanEntryType::AccountType => "тип счета",
            BbanEntryType::OwnerAccountNumber => "тип счета владельца",
            BbanEntryType::IdentificationNumber => "идентификационный номер",
        }
    }
}

impl fmt::Display for BbanEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Допустимый алфавит поля BBAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BbanCharacterType {
    /// Цифры 0-9.
    Numeric,
    /// Заглавные латинские буквы A-Z.
    Alpha,
    /// Цифры или заглавные буквы.
    AlphaNumeric,
}

impl BbanCharacterType {
    /// Проверяет, входит ли символ в алфавит.
    pub fn matches(self, c: char) -> bool {
        match self {
            BbanCharacterType::Numeric => c.is_ascii_digit(),
            BbanCharacterType::Alpha => c.is_ascii_uppercase(),
            BbanCharacterType::AlphaNumeric => c.is_ascii_digit() || c.is_ascii_uppercase(),
        }
    }

    /// Однобуквенное обозначение из реестра SWIFT (n, a, c).
    pub fn code(self) -> char {
        match self {
            BbanCharacterType::Numeric => 'n',
            BbanCharacterType::Alpha => 'a',
            BbanCharacterType::AlphaNumeric => 'c',
        }
    }

    fn violation(self) -> FormatViolation {
        match self {
            BbanCharacterType::Numeric => FormatViolation::BbanOnlyDigits,
            BbanCharacterType::Alpha => FormatViolation::BbanOnlyUpperCaseLetters,
            BbanCharacterType::AlphaNumeric => FormatViolation::BbanOnlyDigitsOrLetters,
        }
    }

    fn requirement(self) -> &'static str {
        match self {
            BbanCharacterType::Numeric => "только цифры",
            BbanCharacterType::Alpha => "только заглавные буквы",
            BbanCharacterType::AlphaNumeric => "только цифры или заглавные буквы",
        }
    }
}

/// Поле структуры BBAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BbanStructureEntry {
    pub entry_type: BbanEntryType,
    pub character_type: BbanCharacterType,
    /// Длина в символах, всегда больше нуля.
    pub length: usize,
}

impl fmt::Display for BbanStructureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.character_type.code())
    }
}

/// Структура BBAN страны.
///
/// Поля идут подряд без пропусков: смещение поля равно сумме длин
/// предыдущих. Один вид поля встречается в структуре не более одного раза.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BbanStructure {
    pub(crate) entries: &'static [BbanStructureEntry],
}

impl BbanStructure {
    /// Поля в порядке следования.
    pub fn entries(&self) -> &'static [BbanStructureEntry] {
        self.entries
    }

    /// Суммарная длина BBAN.
    pub fn length(&self) -> usize {
        self.entries.iter().map(|e| e.length).sum()
    }

    /// Проверяет, есть ли в структуре поле данного вида.
    pub fn contains(&self, entry_type: BbanEntryType) -> bool {
        self.entry(entry_type).is_some()
    }

    /// Описание поля данного вида.
    pub fn entry(&self, entry_type: BbanEntryType) -> Option<&'static BbanStructureEntry> {
        self.entries.iter().find(|e| e.entry_type == entry_type)
    }

    /// Диапазон символов поля внутри BBAN.
    pub fn range_of(&self, entry_type: BbanEntryType) -> Option<Range<usize>> {
        let mut offset = 0;
        for entry in self.entries {
            if entry.entry_type == entry_type {
                return Some(offset..offset + entry.length);
            }
            offset += entry.length;
        }
        None
    }

    /// Вырезает значение поля из BBAN.
    ///
    /// Возвращает `None`, если в структуре нет такого поля или BBAN
    /// короче структуры.
    pub fn extract_field<'a>(&self, bban: &'a str, entry_type: BbanEntryType) -> Option<&'a str> {
        self.range_of(entry_type).and_then(|range| bban.get(range))
    }

    /// Проверяет BBAN на соответствие структуре.
    ///
    /// Сначала проверяется общая длина, затем алфавит каждого поля.
    /// Возвращается первое найденное нарушение.
    pub fn validate(&self, bban: &str) -> Result<()> {
        let expected = self.length();
        let actual = bban.chars().count();
        if actual != expected {
            return Err(FormatError::new(
                FormatViolation::BbanLength,
                format!(
                    "Длина BBAN должна быть {}, получено {}: {}",
                    expected, actual, bban
                ),
            )
            .with_expected(expected)
            .with_actual(actual)
            .into());
        }

        let mut chars = bban.chars();
        let mut position = 0;
        for entry in self.entries {
            for c in chars.by_ref().take(entry.length) {
                if !entry.character_type.matches(c) {
                    return Err(FormatError::new(
                        entry.character_type.violation(),
                        format!(
                            "Поле «{}» должно содержать {}, недопустимый символ '{}' в позиции {}",
                            entry.entry_type,
                            entry.character_type.requirement(),
                            c,
                            position
                        ),
                    )
                    .with_entry_type(entry.entry_type)
                    .with_character(c, position)
                    .with_actual(bban)
                    .into());
                }
                position += 1;
            }
        }

        Ok(())
    }
}

impl fmt::Display for BbanStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const AT: BbanStructure = BbanStructure {
        entries: &[
            BbanStructureEntry {
                entry_type: BbanEntryType::BankCode,
                character_type: BbanCharacterType::Numeric,
                length: 5,
            },
            BbanStructureEntry {
                entry_type: BbanEntryType::AccountNumber,
                character_type: BbanCharacterType::Numeric,
                length: 11,
            },
        ],
    };

    const GB: BbanStructure = BbanStructure {
        entries: &[
            BbanStructureEntry {
                entry_type: BbanEntryType::BankCode,
                character_type: BbanCharacterType::Alpha,
                length: 4,
            },
            BbanStructureEntry {
                entry_type: BbanEntryType::BranchCode,
                character_type: BbanCharacterType::Numeric,
                length: 6,
            },
            BbanStructureEntry {
                entry_type: BbanEntryType::AccountNumber,
                character_type: BbanCharacterType::AlphaNumeric,
                length: 8,
            },
        ],
    };

    fn violation(err: Error) -> FormatError {
        match err {
            Error::Format(e) => e,
            other => panic!("ожидалась ошибка формата, получено {:?}", other),
        }
    }

    #[test]
    fn test_length_and_ranges() {
        assert_eq!(AT.length(), 16);
        assert_eq!(GB.length(), 18);
        assert_eq!(GB.range_of(BbanEntryType::BranchCode), Some(4..10));
        assert_eq!(AT.range_of(BbanEntryType::BranchCode), None);
        assert!(GB.contains(BbanEntryType::BankCode));
        assert!(!AT.contains(BbanEntryType::NationalCheckDigit));
    }

    #[test]
    fn test_extract_field() {
        let bban = "NWBK60161331926819";
        assert_eq!(GB.extract_field(bban, BbanEntryType::BankCode), Some("NWBK"));
        assert_eq!(GB.extract_field(bban, BbanEntryType::BranchCode), Some("601613"));
        assert_eq!(GB.extract_field(bban, BbanEntryType::AccountNumber), Some("31926819"));
        assert_eq!(GB.extract_field(bban, BbanEntryType::AccountType), None);
        assert_eq!(GB.extract_field("NWBK", BbanEntryType::AccountNumber), None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(AT.validate("1904300234573201").is_ok());
        assert!(GB.validate("NWBK60161331926819").is_ok());
    }

    #[test]
    fn test_validate_length() {
        let err = violation(AT.validate("190430023457320").unwrap_err());
        assert_eq!(err.violation, FormatViolation::BbanLength);
        assert_eq!(err.expected.as_deref(), Some("16"));
        assert_eq!(err.actual.as_deref(), Some("15"));
    }

    #[test]
    fn test_validate_reports_entry_and_position() {
        let err = violation(AT.validate("19043A0234573201").unwrap_err());
        assert_eq!(err.violation, FormatViolation::BbanOnlyDigits);
        assert_eq!(err.entry_type, Some(BbanEntryType::AccountNumber));
        assert_eq!(err.invalid_character, Some('A'));
        assert_eq!(err.position, Some(5));

        let err = violation(GB.validate("NwBK60161331926819").unwrap_err());
        assert_eq!(err.violation, FormatViolation::BbanOnlyUpperCaseLetters);
        assert_eq!(err.entry_type, Some(BbanEntryType::BankCode));
        assert_eq!(err.position, Some(1));

        let err = violation(GB.validate("NWBK6016133192681-").unwrap_err());
        assert_eq!(err.violation, FormatViolation::BbanOnlyDigitsOrLetters);
        assert_eq!(err.invalid_character, Some('-'));
        assert_eq!(err.position, Some(17));
    }

    #[test]
    fn test_validate_non_ascii_does_not_panic() {
        let err = violation(AT.validate("1904300234573ä01").unwrap_err());
        assert_eq!(err.invalid_character, Some('ä'));
        assert_eq!(err.position, Some(13));
    }

    #[test]
    fn test_character_types() {
        assert!(BbanCharacterType::Numeric.matches('7'));
        assert!(!BbanCharacterType::Numeric.matches('A'));
        assert!(BbanCharacterType::Alpha.matches('Z'));
        assert!(!BbanCharacterType::Alpha.matches('z'));
        assert!(BbanCharacterType::AlphaNumeric.matches('Q'));
        assert!(!BbanCharacterType::AlphaNumeric.matches(' '));
    }

    #[test]
    fn test_display() {
        assert_eq!(GB.to_string(), "4a 6n 8c");
        assert_eq!(BbanEntryType::BankCode.to_string(), "код банка");
    }
}
