//! Реестр структур BBAN по странам.
//!
//! Таблица статическая: добавление страны сводится к новой строке.

use super::structure::{BbanCharacterType, BbanEntryType, BbanStructure, BbanStructureEntry};
use crate::country::CountryCode;
use crate::types::BBAN_OFFSET;

macro_rules! entry_type {
    (bank) => { BbanEntryType::BankCode };
    (branch) => { BbanEntryType::BranchCode };
    (check) => { BbanEntryType::NationalCheckDigit };
    (account) => { BbanEntryType::AccountNumber };
    (account_type) => { BbanEntryType::AccountType };
    (owner) => { BbanEntryType::OwnerAccountNumber };
    (identification) => { BbanEntryType::IdentificationNumber };
}

macro_rules! character_type {
    (n) => { BbanCharacterType::Numeric };
    (a) => { BbanCharacterType::Alpha };
    (c) => { BbanCharacterType::AlphaNumeric };
}

macro_rules! bban {
    ($($kind:ident $length:literal $class:ident),+ $(,)?) => {
        &BbanStructure {
            entries: &[$(BbanStructureEntry {
                entry_type: entry_type!($kind),
                character_type: character_type!($class),
                length: $length,
            }),+],
        }
    };
}

/// Возвращает структуру BBAN страны или `None`, если страна не поддерживает IBAN.
pub fn structure_for(country: CountryCode) -> Option<&'static BbanStructure> {
    let structure: &'static BbanStructure = match country {
        CountryCode::AD => bban![bank 4 n, branch 4 n, account 12 c],
        CountryCode::AE => bban![bank 3 n, account 16 n],
        CountryCode::AL => bban![bank 3 n, branch 4 n, check 1 n, account 16 c],
        CountryCode::AT => bban![bank 5 n, account 11 n],
        CountryCode::AZ => bban![bank 4 a, account 20 c],
        CountryCode::BA => bban![bank 3 n, branch 3 n, account 8 n, check 2 n],
        CountryCode::BE => bban![bank 3 n, account 7 n, check 2 n],
        CountryCode::BG => bban![bank 4 a, branch 4 n, account_type 2 n, account 8 c],
        CountryCode::BH => bban![bank 4 a, account 14 c],
        CountryCode::BR => bban![bank 8 n, branch 5 n, account 10 n, account_type 1 a, owner 1 c],
        CountryCode::BY => bban![bank 4 c, branch 4 n, account 16 c],
        CountryCode::CH => bban![bank 5 n, account 12 c],
        CountryCode::CR => bban![bank 4 n, account 14 n],
        CountryCode::CY => bban![bank 3 n, branch 5 n, account 16 c],
        CountryCode::CZ => bban![bank 4 n, account 16 n],
        CountryCode::DE => bban![bank 8 n, account 10 n],
        CountryCode::DK => bban![bank 4 n, account 10 n],
        CountryCode::DO => bban![bank 4 c, account 20 n],
        CountryCode::EE => bban![bank 2 n, branch 2 n, account 11 n, check 1 n],
        CountryCode::EG => bban![bank 4 n, branch 4 n, account 17 n],
        CountryCode::ES => bban![bank 4 n, branch 4 n, check 2 n, account 10 n],
        CountryCode::FI => bban![bank 6 n, account 7 n, check 1 n],
        CountryCode::FO => bban![bank 4 n, account 9 n, check 1 n],
        CountryCode::FR => bban![bank 5 n, branch 5 n, account 11 c, check 2 n],
        CountryCode::GB => bban![bank 4 a, branch 6 n, account 8 n],
        CountryCode::GE => bban![bank 2 a, account 16 n],
        CountryCode::GI => bban![bank 4 a, account 15 c],
        CountryCode::GL => bban![bank 4 n, account 9 n, check 1 n],
        CountryCode::GR => bban![bank 3 n, branch 4 n, account 16 c],
        CountryCode::GT => bban![bank 4 c, account 20 c],
        CountryCode::HR => bban![bank 7 n, account 10 n],
        CountryCode::HU => bban![bank 3 n, branch 4 n, account 16 n, check 1 n],
        CountryCode::IE => bban![bank 4 a, branch 6 n, account 8 n],
        CountryCode::IL => bban![bank 3 n, branch 3 n, account 13 n],
        CountryCode::IQ => bban![bank 4 a, branch 3 n, account 12 n],
        CountryCode::IS => bban![bank 4 n, branch 2 n, account 6 n, identification 10 n],
        CountryCode::IT => bban![check 1 a, bank 5 n, branch 5 n, account 12 c],
        CountryCode::JO => bban![bank 4 a, branch 4 n, account 18 c],
        CountryCode::KW => bban![bank 4 a, account 22 c],
        CountryCode::KZ => bban![bank 3 n, account 13 c],
        CountryCode::LB => bban![bank 4 n, account 20 c],
        CountryCode::LC => bban![bank 4 a, account 24 c],
        CountryCode::LI => bban![bank 5 n, account 12 c],
        CountryCode::LT => bban![bank 5 n, account 11 n],
        CountryCode::LU => bban![bank 3 n, account 13 c],
        CountryCode::LV => bban![bank 4 a, account 13 c],
        CountryCode::LY => bban![bank 3 n, branch 3 n, account 15 n],
        CountryCode::MC => bban![bank 5 n, branch 5 n, account 11 c, check 2 n],
        CountryCode::MD => bban![bank 2 c, account 18 c],
        CountryCode::ME => bban![bank 3 n, account 13 n, check 2 n],
        CountryCode::MK => bban![bank 3 n, account 10 c, check 2 n],
        CountryCode::MR => bban![bank 5 n, branch 5 n, account 11 n, check 2 n],
        CountryCode::MT => bban![bank 4 a, branch 5 n, account 18 c],
        CountryCode::MU => bban![bank 6 c, branch 2 n, account 18 c],
        CountryCode::NL => bban![bank 4 a, account 10 n],
        CountryCode::NO => bban![bank 4 n, account 6 n, check 1 n],
        CountryCode::PK => bban![bank 4 c, account 16 n],
        CountryCode::PL => bban![bank 3 n, branch 4 n, check 1 n, account 16 n],
        CountryCode::PS => bban![bank 4 a, account 21 c],
        CountryCode::PT => bban![bank 4 n, branch 4 n, account 11 n, check 2 n],
        CountryCode::QA => bban![bank 4 a, account 21 c],
        CountryCode::RO => bban![bank 4 a, account 16 c],
        CountryCode::RS => bban![bank 3 n, account 13 n, check 2 n],
        CountryCode::SA => bban![bank 2 n, account 18 c],
        CountryCode::SD => bban![bank 2 n, account 12 n],
        CountryCode::SE => bban![bank 3 n, account 16 n, check 1 n],
        CountryCode::SI => bban![bank 2 n, branch 3 n, account 8 n, check 2 n],
        CountryCode::SK => bban![bank 4 n, account 16 n],
        CountryCode::SM => bban![check 1 a, bank 5 n, branch 5 n, account 12 c],
        CountryCode::ST => bban![bank 4 n, branch 4 n, account 11 n, check 2 n],
        CountryCode::SV => bban![bank 4 a, account 20 n],
        CountryCode::TL => bban![bank 3 n, account 14 n, check 2 n],
        CountryCode::TN => bban![bank 2 n, branch 3 n, account 13 n, check 2 n],
        CountryCode::TR => bban![bank 5 n, check 1 c, account 16 c],
        CountryCode::UA => bban![bank 6 n, account 19 c],
        CountryCode::VA => bban![bank 3 n, account 15 n],
        CountryCode::VG => bban![bank 4 a, account 16 n],
        CountryCode::XK => bban![bank 2 n, branch 2 n, account 10 n, check 2 n],
        _ => return None,
    };
    Some(structure)
}

/// Проверяет, поддерживает ли страна IBAN.
pub fn is_supported(country: CountryCode) -> bool {
    structure_for(country).is_some()
}

/// Страны с зарегистрированной структурой BBAN.
pub fn supported_countries() -> impl Iterator<Item = CountryCode> {
    CountryCode::ALL.iter().copied().filter(|&c| is_supported(c))
}

/// Полная длина IBAN страны.
pub fn iban_length(country: CountryCode) -> Option<usize> {
    structure_for(country).map(|s| BBAN_OFFSET + s.length())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_supported_countries() {
        assert_eq!(supported_countries().count(), 78);
        assert!(is_supported(CountryCode::AT));
        assert!(is_supported(CountryCode::XK));
        assert!(!is_supported(CountryCode::AM));
        assert!(!is_supported(CountryCode::US));
        assert!(structure_for(CountryCode::RU).is_none());
    }

    #[test]
    fn test_iban_lengths() {
        assert_eq!(iban_length(CountryCode::AT), Some(20));
        assert_eq!(iban_length(CountryCode::DE), Some(22));
        assert_eq!(iban_length(CountryCode::NO), Some(15));
        assert_eq!(iban_length(CountryCode::LC), Some(32));
        assert_eq!(iban_length(CountryCode::MT), Some(31));
        assert_eq!(iban_length(CountryCode::US), None);
    }

    #[test]
    fn test_structures_are_well_formed() {
        for country in supported_countries() {
            let structure = structure_for(country).unwrap();
            assert!(!structure.entries().is_empty(), "{}", country);
            assert!(structure.entries().iter().all(|e| e.length > 0), "{}", country);

            let mut seen = HashSet::new();
            for entry in structure.entries() {
                assert!(seen.insert(entry.entry_type), "{}: {:?}", country, entry.entry_type);
            }

            assert!(structure.contains(BbanEntryType::BankCode), "{}", country);
            assert!(structure.contains(BbanEntryType::AccountNumber), "{}", country);
        }
    }

    #[test]
    fn test_at_structure() {
        let structure = structure_for(CountryCode::AT).unwrap();
        assert_eq!(structure.to_string(), "5n 11n");
        assert_eq!(structure.length(), 16);
    }
}
