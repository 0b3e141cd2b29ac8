use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::domain_service::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Composition root: the one place that knows which adapters back the ports.
pub struct Server {
    pub create_user: Arc<dyn CreateUser>,
    pub get_user: Arc<dyn GetUser>,
    pool: Option<MySqlPool>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let (persistence, pool): (Arc<dyn UserPersistence>, Option<MySqlPool>) =
            match settings.user.backend.as_str() {
                "memory" => {
                    let persistence: Arc<dyn UserPersistence> =
                        Arc::new(InMemoryUserPersistence::new());
                    (persistence, None)
                }
                "mysql" => {
                    let pool = connect_pool(
                        &settings.database.url,
                        settings.database.max_connections,
                    )
                    .await?;
                    let mysql = MySqlUserPersistence::new(pool.clone());
                    if settings.database.create_schema {
                        mysql.ensure_schema().await?;
                    }
                    let persistence: Arc<dyn UserPersistence> = Arc::new(mysql);
                    (persistence, Some(pool))
                }
                other => return Err(anyhow::anyhow!("Unknown user backend: {}", other)),
            };

        let server = Self::with_persistence(persistence, Arc::new(PermissiveUserValidator::new()));
        info!(backend = %settings.user.backend, "server started");

        Ok(Self { pool, ..server })
    }

    pub fn with_persistence(
        persistence: Arc<dyn UserPersistence>,
        validator: Arc<dyn UserValidator>,
    ) -> Self {
        let user_service = Arc::new(RealUserService::new(persistence, validator));

        Self {
            create_user: user_service.clone(),
            get_user: user_service,
            pool: None,
        }
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("database pool closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::User;
    use crate::settings::parse_settings_str;

    fn settings(backend: &str) -> Settings {
        parse_settings_str(&format!(
            "[http]\naddress = \"127.0.0.1:0\"\n[log]\nfilter = \"info\"\n[user]\nbackend = \"{backend}\"\n"
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn memory_backend_wires_both_use_cases_to_one_store() {
        let server = Server::try_new(&settings("memory")).await.unwrap();

        let created = server
            .create_user
            .create_user(User::new("Ada", "Lovelace"))
            .await
            .unwrap();
        let found = server.get_user.find_by_id(created.id().unwrap()).await.unwrap();

        assert_eq!(found, Some(created));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn unknown_backend_is_rejected() {
        let result = Server::try_new(&settings("postgres")).await;

        assert!(result.is_err());
    }
}
