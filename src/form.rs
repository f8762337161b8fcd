//! The registration form body and its validation pipeline.

use crate::registry::UserDraft;
use crate::validation::{
    has_min_length, is_numeric, is_valid_birth_date, is_valid_cpf, is_valid_monthly_income,
    MaritalStatus, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Fields submitted to `POST /usuarios`. Missing fields arrive as empty
/// strings so that they fail validation instead of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(rename = "dataNascimento")]
    pub birth_date: String,
    #[serde(rename = "sexo")]
    pub sex: String,
    #[serde(rename = "estadoCivil")]
    pub marital_status: String,
    #[serde(rename = "rendaMensal")]
    pub monthly_income: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento")]
    pub complement: String,
}

impl RegistrationForm {
    /// Runs every check in order and stops at the first failure.
    ///
    /// The CPF is checked but not kept on the record.
    pub fn validate(&self) -> Result<UserDraft, ValidationError> {
        if !has_min_length(&self.name) {
            return Err(ValidationError::NameTooShort);
        }
        if !is_valid_cpf(&self.cpf) {
            return Err(ValidationError::InvalidCpf);
        }
        if !is_valid_birth_date(&self.birth_date) {
            return Err(ValidationError::InvalidBirthDate);
        }
        let marital_status: MaritalStatus = self.marital_status.parse()?;
        if !is_valid_monthly_income(&self.monthly_income) {
            return Err(ValidationError::InvalidMonthlyIncome);
        }
        if !has_min_length(&self.street) {
            return Err(ValidationError::StreetTooShort);
        }
        if !is_numeric(&self.number) {
            return Err(ValidationError::InvalidNumber);
        }
        if !has_min_length(&self.city) {
            return Err(ValidationError::CityTooShort);
        }

        Ok(UserDraft {
            name: self.name.clone(),
            birth_date: self.birth_date.clone(),
            sex: self.sex.clone(),
            marital_status,
            monthly_income: self.monthly_income.clone(),
            street: self.street.clone(),
            state: self.state.clone(),
            city: self.city.clone(),
            number: self.number.clone(),
            complement: self.complement.clone(),
        })
    }
}
