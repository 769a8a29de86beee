//! Roster Client - employee directory client
//!
//! Typed access to the employee directory API plus the client-side logic
//! around it: the filter/pagination list controller, the create/edit form
//! subsystem, avatar uploads and the session.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod form;
pub mod http;
pub mod options;
pub mod session;
pub mod upload;

pub use api::{EmployeeApi, EmployeeService, HealthProbe};
pub use config::ClientConfig;
pub use controller::{FetchOutcome, ListController, ListView};
pub use error::{ClientError, ClientResult};
pub use filter::{FilterState, FilterUpdate};
pub use form::{AvatarField, AvatarKind, EditSession, EmployeeForm, FieldErrors, FormError};
pub use http::{HttpClient, NetworkHttpClient};
pub use options::OptionSets;
pub use session::{Session, SessionStore};
pub use upload::{ImageHostClient, ImageUploader};

// Re-export shared types for convenience
pub use shared::client::{SessionRecord, UserInfo};
pub use shared::{Employee, EmployeeCreate, EmployeePage, EmployeeQuery, EmployeeStats, EmployeeUpdate};

use std::sync::Arc;

/// Session, API and uploader wired from one [`ClientConfig`]
pub struct Directory {
    pub session: Arc<Session>,
    pub api: Arc<EmployeeApi<NetworkHttpClient>>,
    pub uploader: ImageHostClient,
    config: ClientConfig,
}

impl Directory {
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let session = Arc::new(match &config.session_path {
            Some(path) => Session::persistent(SessionStore::new(path)),
            None => Session::in_memory(),
        });
        let http = NetworkHttpClient::new(&config, Arc::clone(&session))?;
        let uploader = ImageHostClient::new(&config)?;
        tracing::debug!(base_url = %http.base_url(), "Directory client ready");
        Ok(Self {
            session,
            api: Arc::new(EmployeeApi::new(http)),
            uploader,
            config,
        })
    }

    /// List controller over this directory, honouring the search debounce
    pub fn list_controller(&self) -> ListController<EmployeeApi<NetworkHttpClient>> {
        ListController::new(Arc::clone(&self.api)).with_search_debounce(self.config.search_debounce())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
