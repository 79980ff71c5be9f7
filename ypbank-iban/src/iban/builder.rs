//! Построитель IBAN из отдельных полей.

use crate::bban::{self, BbanEntryType, BbanStructure};
use crate::checksum;
use crate::country::CountryCode;
use crate::error::{Error, FormatError, FormatViolation, Result};
use crate::iban::Iban;
use crate::types::CHECK_DIGIT_LENGTH;

/// Накапливает поля IBAN и проверяет их целиком в [`IbanBuilder::build`].
///
/// Поля BBAN склеиваются в порядке структуры страны, после чего BBAN
/// проверяется как единое целое: общая длина и алфавит каждой позиции.
///
/// ```
/// use ypbank_iban::{CountryCode, Iban};
///
/// let iban = Iban::builder()
///     .country_code(CountryCode::AT)
///     .bank_code("19043")
///     .account_number("00234573201")
///     .build()
///     .unwrap();
/// assert_eq!(iban.to_string(), "AT611904300234573201");
/// ```
#[derive(Debug, Clone)]
pub struct IbanBuilder {
    country_code: Option<CountryCode>,
    check_digit: Option<String>,
    bank_code: Option<String>,
    branch_code: Option<String>,
    account_number: Option<String>,
    national_check_digit: Option<String>,
    account_type: Option<String>,
    owner_account_number: Option<String>,
    identification_number: Option<String>,
    validate_check_digit: bool,
}

impl Default for IbanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IbanBuilder {
    pub fn new() -> Self {
        Self {
            country_code: None,
            check_digit: None,
            bank_code: None,
            branch_code: None,
            account_number: None,
            national_check_digit: None,
            account_type: None,
            owner_account_number: None,
            identification_number: None,
            validate_check_digit: true,
        }
    }

    pub fn country_code(mut self, country_code: CountryCode) -> Self {
        self.country_code = Some(country_code);
        self
    }

    pub fn bank_code(mut self, bank_code: impl Into<String>) -> Self {
        self.bank_code = Some(bank_code.into());
        self
    }

    pub fn branch_code(mut self, branch_code: impl Into<String>) -> Self {
        self.branch_code = Some(branch_code.into());
        self
    }

    pub fn account_number(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }

    pub fn national_check_digit(mut self, national_check_digit: impl Into<String>) -> Self {
        self.national_check_digit = Some(national_check_digit.into());
        self
    }

    pub fn account_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_type = Some(account_type.into());
        self
    }

    pub fn owner_account_number(mut self, owner_account_number: impl Into<String>) -> Self {
        self.owner_account_number = Some(owner_account_number.into());
        self
    }

    pub fn identification_number(mut self, identification_number: impl Into<String>) -> Self {
        self.identification_number = Some(identification_number.into());
        self
    }

    /// Задает контрольные цифры явно вместо вычисления.
    pub fn check_digit(mut self, check_digit: impl Into<String>) -> Self {
        self.check_digit = Some(check_digit.into());
        self
    }

    /// Включает или отключает проверку явно заданных контрольных цифр.
    ///
    /// По умолчанию проверка включена. Вычисленные цифры верны всегда,
    /// поэтому флаг влияет только на значение из [`IbanBuilder::check_digit`].
    pub fn validate_check_digit(mut self, validate: bool) -> Self {
        self.validate_check_digit = validate;
        self
    }

    /// Значение поля BBAN данного вида.
    pub fn field(&self, entry_type: BbanEntryType) -> Option<&str> {
        let value = match entry_type {
            BbanEntryType::BankCode => &self.bank_code,
            BbanEntryType::BranchCode => &self.branch_code,
            BbanEntryType::NationalCheckDigit => &self.national_check_digit,
            BbanEntryType::AccountNumber => &self.account_number,
            BbanEntryType::AccountType => &self.account_type,
            BbanEntryType::OwnerAccountNumber => &self.owner_account_number,
            BbanEntryType::IdentificationNumber => &self.identification_number,
        };
        value.as_deref()
    }

    pub(crate) fn set_field(&mut self, entry_type: BbanEntryType, value: String) {
        let slot = match entry_type {
            BbanEntryType::BankCode => &mut self.bank_code,
            BbanEntryType::BranchCode => &mut self.branch_code,
            BbanEntryType::NationalCheckDigit => &mut self.national_check_digit,
            BbanEntryType::AccountNumber => &mut self.account_number,
            BbanEntryType::AccountType => &mut self.account_type,
            BbanEntryType::OwnerAccountNumber => &mut self.owner_account_number,
            BbanEntryType::IdentificationNumber => &mut self.identification_number,
        };
        *slot = Some(value);
    }

    /// Собирает IBAN, проверяя явные контрольные цифры согласно флагу.
    pub fn build(self) -> Result<Iban> {
        let validate = self.validate_check_digit;
        self.build_with(validate)
    }

    /// Собирает IBAN с явным указанием, проверять ли контрольные цифры.
    pub fn build_with(self, validate_check_digit: bool) -> Result<Iban> {
        self.try_build(validate_check_digit).inspect_err(|e| {
            tracing::debug!(error = %e, "Не удалось собрать IBAN");
        })
    }

    fn try_build(&self, validate_check_digit: bool) -> Result<Iban> {
        if self.country_code.is_none() {
            return Err(Error::UnsupportedCountry { country: None });
        }
        // Код банка и номер счета есть в структуре любой страны.
        self.require_field(BbanEntryType::BankCode)?;
        self.require_field(BbanEntryType::AccountNumber)?;

        let (country_code, structure) = self.resolve_country()?;
        let bban = self.assemble_bban(structure)?;
        structure.validate(&bban)?;

        let check_digit = match &self.check_digit {
            Some(check_digit) => {
                validate_check_digit_format(check_digit)?;
                check_digit.clone()
            }
            None => checksum::compute_check_digits(country_code.alpha2(), &bban)?,
        };

        let iban = Iban::from_parts(country_code, structure, &check_digit, &bban);
        if self.check_digit.is_some() && validate_check_digit {
            checksum::validate_check_digit(iban.as_str())?;
        }

        Ok(iban)
    }

    pub(crate) fn resolve_country(&self) -> Result<(CountryCode, &'static BbanStructure)> {
        let country_code = self
            .country_code
            .ok_or(Error::UnsupportedCountry { country: None })?;
        let structure = bban::structure_for(country_code)
            .ok_or_else(|| Error::unsupported(country_code.alpha2()))?;
        Ok((country_code, structure))
    }

    fn require_field(&self, entry_type: BbanEntryType) -> Result<&str> {
        self.field(entry_type)
            .ok_or_else(|| missing_field(entry_type).into())
    }

    fn assemble_bban(&self, structure: &BbanStructure) -> Result<String> {
        let mut bban = String::with_capacity(structure.length());

        for entry in structure.entries() {
            let value = self
                .field(entry.entry_type)
                .ok_or_else(|| missing_field(entry.entry_type).with_expected(entry.length))?;
            bban.push_str(value);
        }

        Ok(bban)
    }
}

fn missing_field(entry_type: BbanEntryType) -> FormatError {
    FormatError::new(
        FormatViolation::BbanEntryMissing,
        format!("Не задано обязательное поле: {}", entry_type),
    )
    .with_entry_type(entry_type)
}

fn validate_check_digit_format(check_digit: &str) -> Result<()> {
    if check_digit.chars().count() != CHECK_DIGIT_LENGTH {
        return Err(FormatError::new(
            FormatViolation::CheckDigitTwoDigits,
            format!("Контрольных цифр должно быть две: {}", check_digit),
        )
        .with_expected(CHECK_DIGIT_LENGTH)
        .with_actual(check_digit)
        .into());
    }

    if let Some((i, c)) = check_digit.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(FormatError::new(
            FormatViolation::CheckDigitOnlyDigits,
            format!("Контрольные цифры должны быть цифрами: {}", check_digit),
        )
        .with_character(c, i)
        .with_actual(check_digit)
        .into());
    }

    Ok(())
}
