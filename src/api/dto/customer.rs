//! Customer DTOs.

use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Customer, CustomerInput};

static CPF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("valid CPF pattern"));
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,11}$").expect("valid phone pattern"));

/// Request body for creating or replacing a customer.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[schema(min_length = 1, example = "João Alfredo")]
    pub name: String,
    #[validate(regex(path = *CPF_REGEX, message = "CPF must have exactly 11 digits"))]
    #[schema(pattern = r"^[0-9]{11}$", example = "01234567890")]
    pub cpf: String,
    #[validate(regex(path = *PHONE_REGEX, message = "Phone must have 10 or 11 digits"))]
    #[schema(pattern = r"^[0-9]{10,11}$", example = "21998899222")]
    pub phone: String,
    #[schema(value_type = String, format = Date, example = "1992-10-05")]
    pub birthday: Date,
}

impl CustomerRequest {
    pub fn into_input(self) -> CustomerInput {
        CustomerInput {
            name: self.name,
            cpf: self.cpf,
            phone: self.phone,
            birthday: self.birthday,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub phone: String,
    #[schema(value_type = String, format = Date)]
    pub birthday: Date,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            cpf: customer.cpf,
            phone: customer.phone,
            birthday: customer.birthday,
        }
    }
}
