use diesel::prelude::*;
use jiff::civil::Date;
use jiff_diesel::ToDiesel;

/// A rental customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub birthday: Date,
}

/// Customer fields used for both creation and full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInput {
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub birthday: Date,
}

impl CustomerInput {
    /// Materializes the input as a customer with the given id.
    pub fn into_customer(self, id: i32) -> Customer {
        Customer {
            id,
            name: self.name,
            cpf: self.cpf,
            phone: self.phone,
            birthday: self.birthday,
        }
    }
}

/// Row read from the customers table
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRecord {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub birthday: jiff_diesel::Date,
}

impl From<CustomerRecord> for Customer {
    fn from(record: CustomerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            cpf: record.cpf,
            phone: record.phone,
            birthday: record.birthday.to_jiff(),
        }
    }
}

/// Insert and full-update payload for the customers table
#[derive(Debug, Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::customers)]
pub struct CustomerChangeset {
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub birthday: jiff_diesel::Date,
}

impl From<CustomerInput> for CustomerChangeset {
    fn from(input: CustomerInput) -> Self {
        Self {
            name: input.name,
            cpf: input.cpf,
            phone: input.phone,
            birthday: input.birthday.to_diesel(),
        }
    }
}
