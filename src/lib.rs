//! # HandyHub API
//!
//! Backend for a three-sided home-services marketplace: customers (`user`)
//! book services offered by partners (`service_provider`), and
//! administrators (`admin`) oversee the marketplace.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── handyhub-core/    # AppError, AccessError, capabilities, password hashing
//! ├── handyhub-config/  # Environment-driven configuration
//! ├── handyhub-auth/    # Roles, permission table, portal admission, JWT
//! ├── handyhub-models/  # Entities, DTOs, booking lifecycle rules
//! └── handyhub-db/      # MarketplaceStore seam, Postgres and in-memory backends
//! src/
//! ├── cli/              # create-admin
//! ├── middleware/       # Bearer and portal extractors
//! └── modules/          # auth, services, bookings (controller/service/router)
//! ```
//!
//! ## Access model
//!
//! Every privileged entry point asks the shared
//! [`AccessControl`](handyhub_auth::AccessControl) in [`state::AppState`].
//! Capabilities are never inferred from role names at call sites.
//!
//! | Portal | Admitted roles (default) |
//! |--------|--------------------------|
//! | `frontend` | user |
//! | `admin-panel` | admin |
//! | `partner-app` | service_provider, admin |
//!
//! Administrators are created with `handyhub-cli create-admin`; the API
//! refuses to register them.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod cli;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use handyhub_auth;
pub use handyhub_config;
pub use handyhub_core;
pub use handyhub_db;
pub use handyhub_models;
