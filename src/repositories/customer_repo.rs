//! Customer repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Customer, CustomerChangeset, CustomerInput, CustomerRecord};
use crate::repositories::CustomerRepository;
use crate::schema::customers;

/// Customer repository holding an async connection pool.
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: AsyncDbPool,
}

impl PgCustomerRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_by_id(&self, customer_id: i32) -> AppResult<Option<Customer>> {
        let mut conn = self.pool.get().await?;

        let record = customers::table
            .filter(customers::id.eq(customer_id))
            .select(CustomerRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)?;

        Ok(record.map(Customer::from))
    }

    async fn find_by_cpf(&self, customer_cpf: &str) -> AppResult<Option<Customer>> {
        let mut conn = self.pool.get().await?;

        let record = customers::table
            .filter(customers::cpf.eq(customer_cpf))
            .select(CustomerRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)?;

        Ok(record.map(Customer::from))
    }

    async fn list_all(&self) -> AppResult<Vec<Customer>> {
        let mut conn = self.pool.get().await?;

        let records = customers::table
            .order(customers::id.asc())
            .select(CustomerRecord::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(records.into_iter().map(Customer::from).collect())
    }

    async fn create(&self, input: CustomerInput) -> AppResult<Customer> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(customers::table)
            .values(CustomerChangeset::from(input))
            .returning(CustomerRecord::as_returning())
            .get_result(&mut conn)
            .await
            .map(Customer::from)
            .map_err(AppError::from)
    }

    async fn update(&self, customer_id: i32, input: CustomerInput) -> AppResult<Customer> {
        let mut conn = self.pool.get().await?;

        diesel::update(customers::table.filter(customers::id.eq(customer_id)))
            .set(CustomerChangeset::from(input))
            .returning(CustomerRecord::as_returning())
            .get_result(&mut conn)
            .await
            .map(Customer::from)
            .map_err(AppError::from)
    }
}
