use std::ops::Deref;
use std::sync::Arc;

use driver::database::PostgresDatabase;
use kernel::KernelError;
use vodca::References;

/// State shared by every route. Cloning only bumps the reference count.
#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let handler = Handler::init().await?;
        Ok(Self(Arc::new(handler)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(References)]
pub struct Handler {
    database: PostgresDatabase,
}

impl Handler {
    async fn init() -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;
        database.migrate().await?;
        tracing::info!("Database migrated");

        Ok(Self { database })
    }
}
