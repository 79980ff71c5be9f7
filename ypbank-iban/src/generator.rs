//! Генерация случайных корректных IBAN для тестов и фикстур.

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::bban::{self, BbanCharacterType, BbanStructureEntry};
use crate::country::CountryCode;
use crate::error::{Error, FormatError, FormatViolation, Result};
use crate::iban::{Iban, IbanBuilder};

const DIGITS: &[u8] = b"0123456789";
const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn random_char<R: Rng + ?Sized>(rng: &mut R, character_type: BbanCharacterType) -> char {
    let alphabet = match character_type {
        BbanCharacterType::Numeric => DIGITS,
        BbanCharacterType::Alpha => LETTERS,
        BbanCharacterType::AlphaNumeric => ALPHANUMERIC,
    };
    alphabet[rng.gen_range(0..alphabet.len())] as char
}

fn random_value<R: Rng + ?Sized>(rng: &mut R, entry: &BbanStructureEntry) -> String {
    (0..entry.length)
        .map(|_| random_char(rng, entry.character_type))
        .collect()
}

impl IbanBuilder {
    /// Заполняет незаданные поля случайными значениями и собирает IBAN.
    ///
    /// Заданные поля должны совпадать по длине с полями структуры.
    pub fn build_random(self) -> Result<Iban> {
        self.build_random_with(&mut rand::thread_rng())
    }

    /// То же, что [`IbanBuilder::build_random`], с переданным генератором.
    pub fn build_random_with<R: Rng + ?Sized>(mut self, rng: &mut R) -> Result<Iban> {
        let (_, structure) = self.resolve_country()?;

        for entry in structure.entries() {
            match self.field(entry.entry_type) {
                Some(value) => {
                    let length = value.chars().count();
                    if length != entry.length {
                        return Err(FormatError::new(
                            FormatViolation::BbanEntryLength,
                            format!(
                                "Длина поля «{}» должна быть {}, получено {}",
                                entry.entry_type, entry.length, length
                            ),
                        )
                        .with_entry_type(entry.entry_type)
                        .with_expected(entry.length)
                        .with_actual(value)
                        .into());
                    }
                }
                None => {
                    let value = random_value(rng, entry);
                    self.set_field(entry.entry_type, value);
                }
            }
        }

        self.build()
    }
}

impl Iban {
    /// Случайный IBAN случайной поддерживаемой страны.
    pub fn random() -> Result<Self> {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        let country = bban::supported_countries()
            .choose(rng)
            .ok_or(Error::UnsupportedCountry { country: None })?;
        Self::random_for_with(country, rng)
    }

    /// Случайный IBAN заданной страны.
    pub fn random_for(country: CountryCode) -> Result<Self> {
        Self::random_for_with(country, &mut rand::thread_rng())
    }

    pub fn random_for_with<R: Rng + ?Sized>(country: CountryCode, rng: &mut R) -> Result<Self> {
        IbanBuilder::new().country_code(country).build_random_with(rng)
    }
}
