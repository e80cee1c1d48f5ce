pub mod error;
pub mod outcome;
pub mod service;
pub mod templates;
pub mod types;

pub use error::ReflectError;
pub use outcome::UpstreamOutcome;
pub use service::ReflectionService;
pub use types::{PromptPair, Reflection, ReflectionContext, ReflectionKind, ReflectionRequest};
