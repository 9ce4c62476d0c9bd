pub mod bearer;
pub mod eligibility;
pub mod factory;
pub mod guard;
pub mod token;

pub use bearer::extract_bearer;
pub use eligibility::{Ineligible, check_eligibility};
pub use factory::build_auth_service;
pub use guard::{AuthFailure, AuthService};
pub use token::{Claims, SignError, TokenCodec, TokenError};
