pub mod config;
pub mod error;
pub mod form;
pub mod registry;
pub mod server;
pub mod storage;
pub mod validation;
pub mod views;

pub use config::{SeedData, ServerConfig, DEFAULT_PORT};
pub use error::{Error, Result};
pub use form::RegistrationForm;
pub use registry::{UserDraft, UserRecord, UserRegistry};
pub use server::WebServer;
pub use storage::{MemoryUserStore, UserStore};
pub use validation::{MaritalStatus, ValidationError};
