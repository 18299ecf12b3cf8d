//! Engine modules: the pure computations behind a data-disk plan.
//!
//! Every function here reads an immutable [`DevicesConfiguration`] and
//! returns freshly allocated results. Nothing is cached between calls.
//!
//! [`DevicesConfiguration`]: crate::config_file::DevicesConfiguration

pub mod cost;
pub mod lun;
pub mod performance;
pub mod resolver;
pub mod template;
pub mod validator;
