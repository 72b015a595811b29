//! Minimal validation scaffolding, kept independent of any one config type
//! so the rest of the crate depends on the trait, not a concrete struct.

use crate::errors::ConfigurationError;

pub trait Validatable {
    fn validate(&self) -> Result<(), ConfigurationError>;

    fn config_name(&self) -> &'static str {
        "Config"
    }
}

pub trait ValidatableCollection {
    fn validate_all(&self) -> Result<(), ConfigurationError>;
}

impl<T: Validatable> ValidatableCollection for Vec<T> {
    fn validate_all(&self) -> Result<(), ConfigurationError> {
        for item in self {
            item.validate()?;
        }
        Ok(())
    }
}

impl<T: Validatable> ValidatableCollection for Option<T> {
    fn validate_all(&self) -> Result<(), ConfigurationError> {
        if let Some(item) = self {
            item.validate()?;
        }
        Ok(())
    }
}
