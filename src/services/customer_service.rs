//! Customer service for business logic operations.
//!
//! Enforces CPF uniqueness and existence checks before delegating writes
//! to the customer repository.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Customer, CustomerInput};
use crate::repositories::CustomerRepository;

/// Customer service for handling customer-related business rules.
///
/// Cloning is cheap: the repository sits behind an `Arc`.
#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    /// Gets a customer by id.
    ///
    /// # Returns
    /// The customer if found, or `NotFound` error
    pub async fn get_customer_by_id(&self, id: i32) -> AppResult<Customer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("customer", "id", id))
    }

    /// Lists all customers ordered by id.
    pub async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        self.repo.list_all().await
    }

    /// Creates a customer.
    ///
    /// # Errors
    /// `Conflict` when another customer already holds the CPF
    pub async fn create_customer(&self, input: CustomerInput) -> AppResult<Customer> {
        if self.repo.find_by_cpf(&input.cpf).await?.is_some() {
            tracing::warn!(cpf = %input.cpf, "Customer CPF already registered");
            return Err(AppError::conflict("customer", "cpf", &input.cpf));
        }

        let customer = self.repo.create(input).await?;
        tracing::info!(customer_id = customer.id, "Customer created");
        Ok(customer)
    }

    /// Replaces the data of an existing customer.
    ///
    /// A customer may keep its own CPF; taking the CPF of a different
    /// customer is a `Conflict`.
    pub async fn update_customer(&self, id: i32, input: CustomerInput) -> AppResult<Customer> {
        self.get_customer_by_id(id).await?;

        if let Some(holder) = self.repo.find_by_cpf(&input.cpf).await? {
            if holder.id != id {
                tracing::warn!(
                    customer_id = id,
                    holder_id = holder.id,
                    "CPF belongs to another customer"
                );
                return Err(AppError::conflict("customer", "cpf", &input.cpf));
            }
        }

        let customer = self.repo.update(id, input).await?;
        tracing::info!(customer_id = customer.id, "Customer updated");
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryCustomerRepository;
    use jiff::civil::date;

    fn customer(id: i32, name: &str, cpf: &str) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            cpf: cpf.to_string(),
            phone: "21999999999".to_string(),
            birthday: date(1990, 5, 17),
        }
    }

    fn input(name: &str, cpf: &str) -> CustomerInput {
        CustomerInput {
            name: name.to_string(),
            cpf: cpf.to_string(),
            phone: "21988887777".to_string(),
            birthday: date(1985, 1, 2),
        }
    }

    fn service() -> CustomerService {
        let repo = InMemoryCustomerRepository::with_customers([
            customer(1, "Jeff", "00011122233"),
            customer(2, "Rai", "11122233300"),
            customer(3, "Margaret", "22233344400"),
            customer(4, "João", "33344455500"),
        ]);
        CustomerService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_get_customer_by_id_returns_customer() {
        let customer = service().get_customer_by_id(3).await.unwrap();
        assert_eq!(customer.name, "Margaret");
    }

    #[tokio::test]
    async fn test_get_customer_by_id_not_found_for_unknown_ids() {
        let service = service();
        for id in [-1, 0, 5, i32::MAX] {
            let result = service.get_customer_by_id(id).await;
            assert!(
                matches!(result, Err(AppError::NotFound { .. })),
                "id {id} should not be found"
            );
        }
    }

    #[tokio::test]
    async fn test_create_customer_with_existing_cpf_conflicts() {
        let result = service()
            .create_customer(input("Someone", "11122233300"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_customer_assigns_next_id() {
        let service = service();
        let created = service
            .create_customer(input("Ana", "44455566600"))
            .await
            .unwrap();

        assert_eq!(created.id, 5);
        assert_eq!(service.get_customer_by_id(5).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_customer_not_found() {
        let result = service()
            .update_customer(9, input("Nobody", "99988877766"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_customer_to_cpf_of_another_customer_conflicts() {
        let result = service()
            .update_customer(1, input("Jeff", "22233344400"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_customer_keeping_own_cpf_succeeds() {
        let updated = service()
            .update_customer(2, input("Rai Souza", "11122233300"))
            .await
            .unwrap();

        assert_eq!(updated.id, 2);
        assert_eq!(updated.name, "Rai Souza");
        assert_eq!(updated.cpf, "11122233300");
    }

    #[tokio::test]
    async fn test_list_customers_in_id_order() {
        let ids: Vec<i32> = service()
            .list_customers()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
