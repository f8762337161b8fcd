//! Field validators for the registration form.
//!
//! Every predicate here is pure: it looks only at its input (and, for the
//! birth date, at the moment it is given).

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum length of the name, street and city fields.
pub const MIN_TEXT_LEN: usize = 3;

/// Digits, optionally followed by a point and one or two decimals.
static MONTHLY_INCOME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").unwrap());

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// The reason a submission was rejected. `Display` is the message shown
/// back to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Nome deve conter no mínimo 3 caracteres.")]
    NameTooShort,

    #[error("CPF inválido. O CPF deve estar no formato XXX.XXX.XXX-XX.")]
    InvalidCpf,

    #[error("Data de nascimento inválida.")]
    InvalidBirthDate,

    #[error("Estado civil inválido.")]
    InvalidMaritalStatus,

    #[error("Renda mensal inválida. Insira apenas valores numéricos com até duas casas decimais.")]
    InvalidMonthlyIncome,

    #[error("Logradouro deve conter no mínimo 3 caracteres.")]
    StreetTooShort,

    #[error("Número inválido. Insira apenas números inteiros.")]
    InvalidNumber,

    #[error("Cidade deve conter no mínimo 3 caracteres.")]
    CityTooShort,
}

impl ValidationError {
    /// Name of the form field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NameTooShort => "nome",
            ValidationError::InvalidCpf => "cpf",
            ValidationError::InvalidBirthDate => "dataNascimento",
            ValidationError::InvalidMaritalStatus => "estadoCivil",
            ValidationError::InvalidMonthlyIncome => "rendaMensal",
            ValidationError::StreetTooShort => "logradouro",
            ValidationError::InvalidNumber => "numero",
            ValidationError::CityTooShort => "cidade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaritalStatus {
    Single,
    Married,
    Separated,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 5] = [
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Separated,
        MaritalStatus::Divorced,
        MaritalStatus::Widowed,
    ];

    /// The literal value submitted by the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "Solteiro(a)",
            MaritalStatus::Married => "Casado(a)",
            MaritalStatus::Separated => "Separado(a)",
            MaritalStatus::Divorced => "Divorciado(a)",
            MaritalStatus::Widowed => "Viúvo(a)",
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaritalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaritalStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(ValidationError::InvalidMaritalStatus)
    }
}

/// Checks a CPF number, ignoring any punctuation around the digits.
pub fn is_valid_cpf(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    cpf_check_digit(&digits[..9]) == digits[9] && cpf_check_digit(&digits[..10]) == digits[10]
}

/// Weights run from `len + 1` down to 2.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        rest => rest,
    }
}

/// Checks that the birth date lies strictly before the current moment.
pub fn is_valid_birth_date(input: &str) -> bool {
    is_valid_birth_date_at(input, Utc::now())
}

pub fn is_valid_birth_date_at(input: &str, now: DateTime<Utc>) -> bool {
    parse_birth_date(input).is_some_and(|moment| moment < now)
}

/// A bare date is taken as midnight UTC.
fn parse_birth_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|moment| moment.with_timezone(&Utc))
}

pub fn is_valid_monthly_income(input: &str) -> bool {
    MONTHLY_INCOME_RE.is_match(input)
}

pub fn is_numeric(input: &str) -> bool {
    NUMERIC_RE.is_match(input)
}

/// The complement is free text.
pub fn is_valid_complement(_input: &str) -> bool {
    true
}

pub fn has_min_length(input: &str) -> bool {
    input.chars().count() >= MIN_TEXT_LEN
}

pub fn is_valid_marital_status(input: &str) -> bool {
    input.parse::<MaritalStatus>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    #[rstest]
    #[case("52998224725")]
    #[case("529.982.247-25")]
    #[case("111.444.777-35")]
    fn cpf_accepts_valid_numbers(#[case] cpf: &str) {
        assert!(is_valid_cpf(cpf));
    }

    #[rstest]
    #[case("52998224726")]
    #[case("52998224715")]
    #[case("5299822472")]
    #[case("529982247250")]
    #[case("")]
    #[case("abc.def.ghi-jk")]
    fn cpf_rejects_bad_checksum_or_length(#[case] cpf: &str) {
        assert!(!is_valid_cpf(cpf));
    }

    #[test]
    fn cpf_rejects_repeated_digits() {
        for digit in 0..=9 {
            let cpf = digit.to_string().repeat(11);
            assert!(!is_valid_cpf(&cpf), "{cpf} should be rejected");
        }
    }

    #[test]
    fn birth_date_must_be_in_the_past() {
        let now = Utc::now();
        let yesterday = (now - Duration::days(1)).format("%Y-%m-%d").to_string();
        let tomorrow = (now + Duration::days(1)).format("%Y-%m-%d").to_string();

        assert!(is_valid_birth_date(&yesterday));
        assert!(!is_valid_birth_date(&tomorrow));
    }

    #[test]
    fn birth_date_compares_against_given_moment() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        assert!(is_valid_birth_date_at("2024-06-15", now));
        assert!(is_valid_birth_date_at("1990-01-01", now));
        assert!(!is_valid_birth_date_at("2024-06-16", now));
        assert!(is_valid_birth_date_at("2024-06-15T11:59:59Z", now));
        assert!(!is_valid_birth_date_at("2024-06-15T12:00:00Z", now));
    }

    #[rstest]
    #[case("")]
    #[case("not a date")]
    #[case("1990-02-30")]
    #[case("01/02/1990")]
    fn birth_date_rejects_unparseable_input(#[case] input: &str) {
        assert!(!is_valid_birth_date(input));
    }

    #[rstest]
    #[case("1234.56", true)]
    #[case("1234.5", true)]
    #[case("1234", true)]
    #[case("0", true)]
    #[case("1234.567", false)]
    #[case("1234.", false)]
    #[case("abc", false)]
    #[case("-10", false)]
    #[case("1,234.00", false)]
    #[case("", false)]
    fn monthly_income_format(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_valid_monthly_income(input), valid);
    }

    #[rstest]
    #[case("42", true)]
    #[case("0", true)]
    #[case("", false)]
    #[case("12a", false)]
    #[case("-1", false)]
    #[case("١٢", false)]
    fn numeric_strings(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(is_numeric(input), valid);
    }

    #[test]
    fn complement_accepts_anything() {
        assert!(is_valid_complement(""));
        assert!(is_valid_complement("Apto 12, bloco B"));
    }

    #[test]
    fn min_length_counts_characters() {
        assert!(!has_min_length("Jo"));
        assert!(has_min_length("Ana"));
        assert!(has_min_length("Zé!"));
        assert!(!has_min_length("Zé"));
    }

    #[test]
    fn marital_status_is_a_closed_set() {
        for status in MaritalStatus::ALL {
            assert!(is_valid_marital_status(status.as_str()));
            assert_eq!(status.as_str().parse::<MaritalStatus>(), Ok(status));
        }
        assert!(!is_valid_marital_status("solteiro(a)"));
        assert!(!is_valid_marital_status("Viúvo"));
        assert!(!is_valid_marital_status(""));
    }

    #[test]
    fn errors_name_their_field() {
        assert_eq!(ValidationError::InvalidCpf.field(), "cpf");
        assert_eq!(
            ValidationError::NameTooShort.to_string(),
            "Nome deve conter no mínimo 3 caracteres."
        );
    }
}
