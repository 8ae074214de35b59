//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (REST, credential store) / 创建 infra 层具体实现
//! - ✅ Inject them into the use cases through port traits / 通过 Port trait 注入用例
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide what a signed-out user may see
//! - 不判断未登录用户能看到什么
//!
//! ❌ **No configuration validation / 禁止做配置验证**
//! - Missing values were recorded as facts in config.rs
//! - 缺失的值已在 config.rs 中作为事实记录
//!
//! > **This is the only place allowed to depend on pt-infra and pt-app simultaneously.**
//! > **这是唯一允许同时依赖 pt-infra 和 pt-app 的地方。**

use std::path::PathBuf;
use std::sync::Arc;

use pt_app::{
    AnalyzeFoodUsage, DishCatalog, DishRecordLog, IngredientCatalog, NotificationService,
};
use pt_core::config::AppConfig;
use pt_core::ports::{IdentityProviderPort, NotificationPort};
use pt_core::routing::RouteTable;
use pt_core::table::PageWindow;
use pt_infra::{
    RestClient, RestDishRecordRepository, RestDishRepository, RestIngredientRepository,
    StoredCredentialIdentityProvider, SystemClock, TracingNotifier,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),
}

/// Fully assembled application.
///
/// 组装完成的应用：身份提供方、通知服务与各个用例。
pub struct PantryApp {
    pub identity: Arc<StoredCredentialIdentityProvider>,
    pub notifications: Arc<NotificationService>,
    pub ingredients: IngredientCatalog,
    pub dishes: DishCatalog,
    pub dish_records: DishRecordLog,
    pub analysis: AnalyzeFoodUsage,
    pub routes: RouteTable,
    pub api_base_url: String,
    pub page_size: usize,
}

impl PantryApp {
    /// Identity provider as the port the session gate consumes.
    pub fn identity_port(&self) -> Arc<dyn IdentityProviderPort> {
        self.identity.clone()
    }

    pub fn notifier(&self) -> Arc<dyn NotificationPort> {
        self.notifications.clone()
    }
}

/// Assemble every adapter and use case from the loaded configuration.
///
/// `data_dir` is where the credential file lives when the config does not
/// name one.
pub fn wire_dependencies(config: &AppConfig, data_dir: PathBuf) -> WiringResult<PantryApp> {
    let credential_path = if config.credential_path.as_os_str().is_empty() {
        AppConfig::with_system_defaults(data_dir).credential_path
    } else {
        config.credential_path.clone()
    };
    let page_size = if config.page_size == 0 {
        PageWindow::DEFAULT_PAGE_SIZE
    } else {
        config.page_size
    };

    let notifications = Arc::new(NotificationService::new());
    notifications.initialize(Arc::new(TracingNotifier));
    let notifier: Arc<dyn NotificationPort> = notifications.clone();

    let identity = Arc::new(StoredCredentialIdentityProvider::new(credential_path));
    let client = Arc::new(
        RestClient::new(&config.api_base_url, identity.clone())
            .map_err(|e| WiringError::HttpClient(e.to_string()))?,
    );

    let dish_record_repository = Arc::new(RestDishRecordRepository::new(client.clone()));

    tracing::debug!(
        api_base_url = %config.api_base_url,
        credential_path = %identity.path().display(),
        page_size,
        "Dependencies wired"
    );

    Ok(PantryApp {
        ingredients: IngredientCatalog::new(
            Arc::new(RestIngredientRepository::new(client.clone())),
            notifier.clone(),
        ),
        dishes: DishCatalog::new(Arc::new(RestDishRepository::new(client)), notifier.clone()),
        dish_records: DishRecordLog::new(dish_record_repository.clone(), notifier.clone()),
        analysis: AnalyzeFoodUsage::new(dish_record_repository, Arc::new(SystemClock), notifier),
        identity,
        notifications,
        routes: RouteTable::new(&config.routing_base_path),
        api_base_url: config.api_base_url.clone(),
        page_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let app = wire_dependencies(&AppConfig::empty(), PathBuf::from("/data/pantry")).unwrap();

        assert_eq!(
            app.identity.path(),
            PathBuf::from("/data/pantry/credential.json").as_path()
        );
        assert_eq!(app.page_size, PageWindow::DEFAULT_PAGE_SIZE);
        assert_eq!(app.routes.base_path(), "");
    }

    #[test]
    fn test_configured_values_win() {
        let config = AppConfig {
            api_base_url: "http://localhost:8080/api".into(),
            credential_path: PathBuf::from("/tmp/cred.json"),
            routing_base_path: "pantry".into(),
            page_size: 25,
            log_dir: PathBuf::new(),
        };

        let app = wire_dependencies(&config, PathBuf::from("/unused")).unwrap();

        assert_eq!(app.identity.path(), PathBuf::from("/tmp/cred.json").as_path());
        assert_eq!(app.page_size, 25);
        assert_eq!(app.routes.href("/home"), "/pantry/home");
        assert_eq!(app.api_base_url, "http://localhost:8080/api");
    }
}
