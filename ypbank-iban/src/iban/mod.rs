//! Значение IBAN и способы его получения.
//!
//! `Iban` создается только через [`IbanBuilder`] или разбор строки и после
//! создания не меняется. Поля BBAN не хранятся отдельно, а вырезаются из
//! строки по структуре страны при обращении.

pub mod builder;
pub mod parser;

pub use builder::IbanBuilder;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::bban::{BbanEntryType, BbanStructure};
use crate::country::CountryCode;
use crate::error::Error;
use crate::types::{BBAN_OFFSET, COUNTRY_CODE_LENGTH, GROUP_SEPARATOR, GROUP_SIZE};

/// International Bank Account Number.
///
/// Равенство, хеш и порядок определяются канонической строкой.
#[derive(Debug, Clone)]
pub struct Iban {
    value: String,
    country_code: CountryCode,
    structure: &'static BbanStructure,
}

impl Iban {
    /// Собирает IBAN из уже проверенных частей.
    pub(crate) fn from_parts(
        country_code: CountryCode,
        structure: &'static BbanStructure,
        check_digit: &str,
        bban: &str,
    ) -> Self {
        let mut value = String::with_capacity(BBAN_OFFSET + bban.len());
        value.push_str(country_code.alpha2());
        value.push_str(check_digit);
        value.push_str(bban);

        Self {
            value,
            country_code,
            structure,
        }
    }

    /// Создает пустой построитель.
    pub fn builder() -> IbanBuilder {
        IbanBuilder::new()
    }

    /// Код страны.
    pub fn country_code(&self) -> CountryCode {
        self.country_code
    }

    /// Две контрольные цифры.
    pub fn check_digit(&self) -> &str {
        &self.value[COUNTRY_CODE_LENGTH..BBAN_OFFSET]
    }

    /// BBAN без кода страны и контрольных цифр.
    pub fn bban(&self) -> &str {
        &self.value[BBAN_OFFSET..]
    }

    /// Структура BBAN страны.
    pub fn structure(&self) -> &'static BbanStructure {
        self.structure
    }

    /// Значение поля BBAN; `None`, если у страны нет такого поля.
    pub fn field(&self, entry_type: BbanEntryType) -> Option<&str> {
        self.structure.extract_field(self.bban(), entry_type)
    }

    pub fn bank_code(&self) -> Option<&str> {
        self.field(BbanEntryType::BankCode)
    }

    pub fn branch_code(&self) -> Option<&str> {
        self.field(BbanEntryType::BranchCode)
    }

    pub fn account_number(&self) -> Option<&str> {
        self.field(BbanEntryType::AccountNumber)
    }

    pub fn national_check_digit(&self) -> Option<&str> {
        self.field(BbanEntryType::NationalCheckDigit)
    }

    pub fn account_type(&self) -> Option<&str> {
        self.field(BbanEntryType::AccountType)
    }

    pub fn owner_account_number(&self) -> Option<&str> {
        self.field(BbanEntryType::OwnerAccountNumber)
    }

    pub fn identification_number(&self) -> Option<&str> {
        self.field(BbanEntryType::IdentificationNumber)
    }

    /// Каноническая строка без пробелов.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Печатная форма: пробел после каждых 4 символов.
    ///
    /// ```
    /// use ypbank_iban::{CountryCode, Iban};
    ///
    /// let iban = Iban::builder()
    ///     .country_code(CountryCode::AT)
    ///     .bank_code("1904")
    ///     .account_number("102345732012")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(iban.to_formatted_string(), "AT14 1904 1023 4573 2012");
    /// ```
    pub fn to_formatted_string(&self) -> String {
        format_grouped(&self.value)
    }
}

/// Вставляет разделитель после каждых [`GROUP_SIZE`] символов.
pub(crate) fn format_grouped(value: &str) -> String {
    let mut formatted = String::with_capacity(value.len() + value.len() / GROUP_SIZE);
    for (i, c) in value.chars().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            formatted.push(GROUP_SEPARATOR);
        }
        formatted.push(c);
    }
    formatted
}

impl PartialEq for Iban {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Iban {}

impl Hash for Iban {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Iban {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Iban {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Iban {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl FromStr for Iban {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Iban::parse(s)
    }
}

impl TryFrom<&str> for Iban {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Iban::parse(value)
    }
}

impl From<Iban> for String {
    fn from(iban: Iban) -> Self {
        iban.value
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Iban {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Iban {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Iban::parse(&s).map_err(serde::de::Error::custom)
    }
}
