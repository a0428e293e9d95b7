//! Login checkers.
//!
//! Contains the login checker capability, its backends, and the registry
//! the dispatching checker selects backends from.
//!
//! ## Adding a New Backend
//!
//! 1. Create a new file in this directory implementing [`LoginChecker`]
//! 2. Add a variant to [`Backend`] and forward to it
//! 3. Add a `kind` to `CheckerKind` in the configuration and build it in
//!    `CheckerRegistry::from_settings`

mod backend;
mod digest;
mod directory;
mod progressive;
mod registry;
mod traits;

pub use backend::Backend;
pub use digest::DigestChecker;
pub use directory::DirectoryChecker;
pub use progressive::{AccountProblem, ProblemKind, ProgressiveChecker};
pub use registry::{CheckerRegistry, RegistryBuilder};
pub use traits::LoginChecker;
