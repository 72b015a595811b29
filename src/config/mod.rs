//! Translation configuration (§3, §4.D): the builder, the frozen config it
//! produces, the boolean flag set, and the validation scaffolding they share.

pub mod builder;
pub mod flags;
pub mod translation_configuration;
pub mod validation;

pub use builder::TranslationConfigurationBuilder;
pub use flags::{InferenceConfiguration, TranslationFlags};
pub use translation_configuration::TranslationConfiguration;
pub use validation::{Validatable, ValidatableCollection};
